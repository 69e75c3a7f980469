//! Error types for zonesync
//!
//! This module defines all error types used throughout the workspace.
//! Provider crates map their transport failures into these kinds so callers
//! can classify a failure without knowing which provider produced it.

use std::fmt;
use thiserror::Error;

/// Result type alias for zonesync operations
pub type Result<T> = std::result::Result<T, Error>;

/// The step of a zone operation during which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetching the current zone document
    FetchZone,
    /// Converting provider rows into generic records
    Decode,
    /// Converting caller records into provider rows
    Encode,
    /// Writing the reconciled zone document back
    WriteZone,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::FetchZone => "fetching zone",
            Stage::Decode => "decoding records",
            Stage::Encode => "encoding records",
            Stage::WriteZone => "writing zone",
        };
        f.write_str(stage)
    }
}

/// Core error type for zonesync
#[derive(Error, Debug)]
pub enum Error {
    /// Bad caller input; never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record value cannot be decoded or encoded
    #[error("Malformed {rtype} value {value:?}: {reason}")]
    MalformedValue {
        /// Record type the value belongs to
        rtype: String,
        /// The offending value
        value: String,
        /// What is wrong with it
        reason: String,
    },

    /// A record name cannot be decoded or encoded
    #[error("Malformed record name {name:?}: {reason}")]
    MalformedName {
        /// The offending name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A record could not be converted between representations
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Network-level failure (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider rejected the request
    #[error("API error {code}: {text}")]
    Api {
        /// Provider status code
        code: String,
        /// Provider status text
        text: String,
    },

    /// Zone does not exist at the provider
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error annotated with the zone and stage it happened in
    #[error("zone {zone}: {stage}: {source}")]
    Operation {
        /// Zone the operation targeted
        zone: String,
        /// Step that failed
        stage: Stage,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a malformed value error
    pub fn malformed_value(
        rtype: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            rtype: rtype.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed name error
    pub fn malformed_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API error from a provider status code and text
    pub fn api(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            text: text.into(),
        }
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an authorization error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach zone and stage context to this error
    pub fn in_zone(self, zone: impl Into<String>, stage: Stage) -> Self {
        Self::Operation {
            zone: zone.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any operation context
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Self::Operation { source, .. } = err {
            err = source;
        }
        err
    }

    /// The stage the error was raised in, if context was attached
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Operation { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns `true` for bad caller input
    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation(_))
    }

    /// Returns `true` when the zone was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Returns `true` when a record could not be decoded or encoded
    pub fn is_malformed(&self) -> bool {
        matches!(
            self.root(),
            Self::MalformedValue { .. } | Self::MalformedName { .. }
        )
    }

    /// Returns `true` for conversion failures
    pub fn is_conversion(&self) -> bool {
        matches!(self.root(), Self::Conversion(_))
    }

    /// Returns `true` for network-level failures
    pub fn is_transport(&self) -> bool {
        matches!(self.root(), Self::Transport(_))
    }

    /// Extract the provider error code, if available
    pub fn api_error_code(&self) -> Option<&str> {
        match self.root() {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_skips_operation_context() {
        let err = Error::not_found("example.com").in_zone("example.com", Stage::FetchZone);

        assert!(err.is_not_found());
        assert_eq!(err.stage(), Some(Stage::FetchZone));
        assert!(matches!(err.root(), Error::NotFound(_)));
    }

    #[test]
    fn api_code_is_reachable_through_context() {
        let err = Error::api("EF02020", "zone is locked").in_zone("example.com", Stage::WriteZone);

        assert_eq!(err.api_error_code(), Some("EF02020"));
        assert!(!err.is_transport());
    }

    #[test]
    fn display_names_zone_and_stage() {
        let err = Error::malformed_value("CAA", "0 issue", "expected 3 fields")
            .in_zone("example.com", Stage::Decode);

        let msg = err.to_string();
        assert!(msg.contains("example.com"));
        assert!(msg.contains("decoding records"));
        assert!(msg.contains("expected 3 fields"));
        assert!(err.is_malformed());
    }
}
