//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomesimError`] via `#[from]`.

use crate::catalog::{CharacteristicType, ServiceType};

/// Base error for every fallible homesim operation.
#[derive(Debug, thiserror::Error)]
pub enum HomesimError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("unsupported characteristic")]
    Unsupported(#[from] UnsupportedCharacteristicError),
}

/// A domain invariant was violated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("device name {0:?} is configured more than once")]
    DuplicateName(String),

    #[error("{characteristic} expects {expected} value")]
    ValueType {
        characteristic: CharacteristicType,
        expected: &'static str,
    },
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The host addressed a `(service, characteristic)` pair the accessory does not expose.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{characteristic} is not bound on {service}")]
pub struct UnsupportedCharacteristicError {
    pub service: ServiceType,
    pub characteristic: CharacteristicType,
}
