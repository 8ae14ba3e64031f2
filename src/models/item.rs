use serde::{Deserialize, Serialize};

use super::Identified;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Body of `POST /items`. Any client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
}

/// Fields applied by a bulk update. Empty name and zero price mean "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    pub name: String,
    pub price: f64,
}

impl Identified for Item {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Item {
    pub fn from_new(id: i64, new: NewItem) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
        }
    }

    /// Overwrite the fields the patch carries a value for
    pub fn apply(&mut self, patch: &ItemPatch) {
        if !patch.name.is_empty() {
            self.name = patch.name.clone();
        }
        if patch.price != 0.0 {
            self.price = patch.price;
        }
    }
}
