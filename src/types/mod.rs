//! Row models read from the chat backend.

pub mod allowed_user;

pub use allowed_user::AllowedUser;
