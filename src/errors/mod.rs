pub mod auth_error;
pub mod store_error;

pub use auth_error::AuthError;
pub use store_error::StoreError;
