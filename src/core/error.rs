// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for orbcodec.
//!
//! Provides the error taxonomy shared by the CDR codec and the locator parser:
//! - Decoding failures (`Underflow`, `Malformed`)
//! - Locator grammar failures (`InvalidArgument`, `UnsupportedProtocol`)
//! - Resolution failures (`UnknownInitialReference`)

use thiserror::Error;

/// Errors raised while encoding, decoding or parsing object references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrbError {
    /// Decode attempted to read beyond the available bytes
    #[error(
        "Underflow: requested {requested} bytes at position {position}, but only {available} bytes available"
    )]
    Underflow {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the read was attempted
        position: usize,
    },

    /// Decoded bytes violate the format's self-consistency rules
    #[error("Malformed {context}: {message}")]
    Malformed {
        /// What was being decoded
        context: String,
        /// Error message
        message: String,
    },

    /// Locator string violates the grammar
    #[error("Invalid argument: {message}{}", .token.as_ref().map(|t| format!(" ('{t}')")).unwrap_or_default())]
    InvalidArgument {
        /// Error message
        message: String,
        /// Offending token or substring, if any
        token: Option<String>,
    },

    /// Locator names a protocol other than `iiop`, bare or `rir`
    #[error("Unsupported protocol: '{protocol}'")]
    UnsupportedProtocol {
        /// Protocol tag found in the locator
        protocol: String,
    },

    /// `rir:` name not known to the initial-reference resolver
    #[error("Unknown initial reference: '{name}'")]
    UnknownInitialReference {
        /// Name that was looked up
        name: String,
    },
}

impl OrbError {
    /// Create an underflow error.
    pub fn underflow(requested: usize, available: usize, position: usize) -> Self {
        OrbError::Underflow {
            requested,
            available,
            position,
        }
    }

    /// Create a malformed data error.
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        OrbError::Malformed {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error without an offending token.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        OrbError::InvalidArgument {
            message: message.into(),
            token: None,
        }
    }

    /// Create an invalid argument error quoting the offending token.
    pub fn invalid_token(message: impl Into<String>, token: impl Into<String>) -> Self {
        OrbError::InvalidArgument {
            message: message.into(),
            token: Some(token.into()),
        }
    }

    /// Create an unsupported protocol error.
    pub fn unsupported_protocol(protocol: impl Into<String>) -> Self {
        OrbError::UnsupportedProtocol {
            protocol: protocol.into(),
        }
    }

    /// Create an unknown initial reference error.
    pub fn unknown_initial_reference(name: impl Into<String>) -> Self {
        OrbError::UnknownInitialReference { name: name.into() }
    }

    /// True when the caller supplied bad bytes or a bad string.
    pub fn is_input_error(&self) -> bool {
        !self.is_resolution_error()
    }

    /// True when the input was fine but the environment could not resolve it.
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, OrbError::UnknownInitialReference { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OrbError::Underflow {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            OrbError::Malformed { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            OrbError::InvalidArgument { message, token } => {
                let mut fields = vec![("message", message.clone())];
                if let Some(token) = token {
                    fields.push(("token", token.clone()));
                }
                fields
            }
            OrbError::UnsupportedProtocol { protocol } => vec![("protocol", protocol.clone())],
            OrbError::UnknownInitialReference { name } => vec![("name", name.clone())],
        }
    }
}

/// Result type for orbcodec operations.
pub type Result<T> = std::result::Result<T, OrbError>;
