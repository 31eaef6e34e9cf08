use thiserror::Error;

use crate::store::{StoreError, UniqueField};

/// Machine-readable reason attached to a rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    MissingField,
    InvalidAmount,
    InvalidColor,
    InvalidUsername,
    InvalidPassword,
    InvalidEmail,
    InvalidName,
    InvalidBody,
}

impl ValidationReason {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::MissingField => "missing-field",
            ValidationReason::InvalidAmount => "invalid-amount",
            ValidationReason::InvalidColor => "invalid-color",
            ValidationReason::InvalidUsername => "invalid-username",
            ValidationReason::InvalidPassword => "invalid-password",
            ValidationReason::InvalidEmail => "invalid-email",
            ValidationReason::InvalidName => "invalid-name",
            ValidationReason::InvalidBody => "invalid-body",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    DuplicateTitle,
    DuplicateUsername,
    DuplicateEmail,
}

impl ConflictReason {
    pub fn code(&self) -> &'static str {
        match self {
            ConflictReason::DuplicateTitle => "duplicate-title",
            ConflictReason::DuplicateUsername => "duplicate-username",
            ConflictReason::DuplicateEmail => "duplicate-email",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConflictReason::DuplicateTitle => "A budget item with this title already exists",
            ConflictReason::DuplicateUsername => "Username already exists",
            ConflictReason::DuplicateEmail => "Email already exists",
        }
    }
}

impl From<UniqueField> for ConflictReason {
    fn from(field: UniqueField) -> Self {
        match field {
            UniqueField::BudgetTitle => ConflictReason::DuplicateTitle,
            UniqueField::Username => ConflictReason::DuplicateUsername,
            UniqueField::Email => ConflictReason::DuplicateEmail,
        }
    }
}

/// Errors produced by the budget and users processors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        reason: ValidationReason,
        message: String,
    },

    #[error("{}", reason.message())]
    Conflict { reason: ConflictReason },

    /// Wrong password and unknown username share this variant.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(StoreError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl AppError {
    pub fn validation(reason: ValidationReason, message: impl Into<String>) -> Self {
        Self::Validation {
            reason,
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::validation(
            ValidationReason::MissingField,
            format!("{} is required", field),
        )
    }

    pub fn conflict(reason: ConflictReason) -> Self {
        Self::Conflict { reason }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => AppError::conflict(field.into()),
            other => AppError::Store(other),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
