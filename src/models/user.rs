use serde::{Deserialize, Serialize};

use super::Identified;

/// A registered account as persisted in the users file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub token: String,
}

/// Body of `POST /register` and `POST /login`. No `Debug`, it carries a password.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// What registration reveals about an account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
