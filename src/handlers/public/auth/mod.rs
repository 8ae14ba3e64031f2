// handlers/public/auth/mod.rs - account creation and token acquisition

pub mod login; // POST /login - exchange credentials for the account token
pub mod register; // POST /register - create an account

pub use login::login_post;
pub use register::register_post;
