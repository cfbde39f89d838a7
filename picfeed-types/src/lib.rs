pub mod models;
pub mod password;
pub mod views;

pub use models::*;
pub use password::Password;
pub use views::*;
