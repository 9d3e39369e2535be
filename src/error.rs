//! Error types for the messaging boundary and configuration.
//!
//! The simulation itself has no error surface: every failure it can hit is
//! recovered locally. These types belong to its collaborators.

use thiserror::Error;

/// A tilt payload that is not `"<x>,<y>"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Payload bytes are not UTF-8.
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    /// Wrong number of comma-separated fields.
    #[error("expected 2 comma-separated fields, got {0}")]
    FieldCount(usize),

    /// A field does not parse as a float.
    #[error("field {index} is not a number: {value:?}")]
    NotANumber {
        /// Zero-based field index.
        index: usize,
        /// Offending text.
        value: String,
    },

    /// A field parses but is NaN or infinite.
    #[error("field {index} is not finite")]
    NotFinite {
        /// Zero-based field index.
        index: usize,
    },
}

/// Failures talking to the broker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Operation needs an open connection.
    #[error("not connected to broker {0}")]
    NotConnected(String),

    /// Broker could not be reached.
    #[error("could not connect to broker {broker}: {reason}")]
    Connect {
        /// Broker URI.
        broker: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Publish was rejected.
    #[error("publish to {topic} failed: {reason}")]
    Publish {
        /// Destination topic.
        topic: String,
        /// Human-readable cause.
        reason: String,
    },
}

/// Failures loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`crate::Settings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::FieldCount(3);
        assert!(format!("{err}").contains('3'));

        let err = DecodeError::NotANumber {
            index: 1,
            value: "abc".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("field 1"));
        assert!(msg.contains("abc"));

        let err = DecodeError::NotFinite { index: 0 };
        assert!(format!("{err}").contains("not finite"));
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Publish {
            topic: "StA/message".to_string(),
            reason: "offline".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("StA/message"));
        assert!(msg.contains("offline"));
    }
}
