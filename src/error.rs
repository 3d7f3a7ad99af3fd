use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a signup or unregister was refused for an existing activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    AlreadySignedUp,
    NotSignedUp,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictReason::AlreadySignedUp => f.write_str("Student is already signed up"),
            ConflictReason::NotSignedUp => {
                f.write_str("Student is not signed up for this activity")
            }
        }
    }
}

/// Domain failures of the registration service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No activity with this exact name exists.
    #[error("Activity not found")]
    NotFound { activity: String },

    /// The membership state does not allow the requested transition.
    #[error("{reason}")]
    Conflict {
        activity: String,
        email: String,
        reason: ConflictReason,
    },
}

impl RegistrationError {
    pub fn activity(&self) -> &str {
        match self {
            RegistrationError::NotFound { activity } => activity,
            RegistrationError::Conflict { activity, .. } => activity,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            RegistrationError::NotFound { .. } => None,
            RegistrationError::Conflict { email, .. } => Some(email),
        }
    }
}

/// Errors raised while building the catalog at startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Activity {0:?} is defined more than once")]
    DuplicateActivity(String),

    #[error("Activity {activity:?} lists participant {email:?} more than once")]
    DuplicateParticipant { activity: String, email: String },
}

/// Invalid environment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
