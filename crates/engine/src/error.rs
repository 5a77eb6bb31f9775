//! The module contains the error the engine can throw.
//!
//! Validation problems ([`InvalidAmount`]) are recovered inside a turn and
//! turned into a user-facing message. Storage problems ([`Database`],
//! [`UnknownUser`]) end the turn with a generic message, while
//! [`Delivery`] errors are surfaced to the adapter that started the turn.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`Database`]: EngineError::Database
//!  [`UnknownUser`]: EngineError::UnknownUser
//!  [`Delivery`]: EngineError::Delivery
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("User {0} not found!")]
    UnknownUser(i64),
    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),
    #[error("Missing {0}")]
    Incomplete(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::UnknownUser(a), Self::UnknownUser(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::Incomplete(a), Self::Incomplete(b)) => a == b,
            (Self::Delivery(a), Self::Delivery(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
