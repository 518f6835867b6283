use crate::errors::store_error::StoreError;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email is already registered")]
    DuplicateEmail,
    #[error("Wrong email or password")]
    InvalidCredentials,
    #[error("Account is locked until {until}")]
    AccountLocked { until: DateTime<Utc> },
    #[error("Could not access the users table: {0}")]
    Store(#[from] StoreError),
}
