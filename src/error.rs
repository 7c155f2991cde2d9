#![allow(non_shorthand_field_patterns)]
#![doc = "Error taxonomy shared across the connector crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

/// Unified error type returned by the remote client and the orchestrator.
///
/// Every failure crossing the crate boundary is normalized into one of these
/// variants. Transport-level failures (`Network`, `Server`) are never
/// reported as `Validation`: they describe transient external conditions,
/// not a configuration mistake by the caller.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The remote endpoint could not be reached at all.
    ///
    /// Connection refusals and transport timeouts are collapsed into this
    /// variant so upstream logic treats them uniformly as "remote
    /// unreachable".
    #[error("remote unreachable: {message}")]
    Network {
        /// Human readable description of the transport failure.
        message: String
    },
    /// The remote answered with a client-error status (4xx).
    #[error("remote rejected the request with status {status}")]
    Client {
        /// HTTP status code reported by the remote.
        status: u16
    },
    /// The remote answered with a server-error status (5xx).
    #[error("remote failed with status {status}")]
    Server {
        /// HTTP status code reported by the remote.
        status: u16
    },
    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode remote response: {message}")]
    Decode {
        /// Human readable description of the decode failure.
        message: String
    },
    /// A business-rule violation attributable to caller configuration.
    ///
    /// Carries the offending parameter key and a stable error code so the
    /// caller can localize the message.
    #[error("validation failed for parameter {parameter}: {code}")]
    Validation {
        /// Key of the parameter that violated the rule.
        parameter: String,
        /// Stable error code identifying the rule.
        code:      String
    }
}

impl Error {
    /// Constructs a [`Error::Network`] from the provided displayable value.
    pub fn network<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Network {
            message: message.into()
        }
    }

    /// Constructs a [`Error::Decode`] from the provided displayable value.
    pub fn decode<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Decode {
            message: message.into()
        }
    }

    /// Constructs a [`Error::Validation`] naming the parameter and rule code.
    ///
    /// # Parameters
    ///
    /// * `parameter` - Key of the parameter that violated the rule.
    /// * `code` - Stable error code identifying the rule.
    pub fn validation<P, C>(parameter: P, code: C) -> Self
    where
        P: Into<String>,
        C: Into<String>
    {
        Self::Validation {
            parameter: parameter.into(),
            code:      code.into()
        }
    }

    /// Maps an HTTP status code to the matching variant.
    ///
    /// Status codes in `[400, 500)` become [`Error::Client`]; everything
    /// else outside the success range becomes [`Error::Server`].
    pub fn from_status(status: u16) -> Self {
        if (400..500).contains(&status) {
            Self::Client {
                status
            }
        } else {
            Self::Server {
                status
            }
        }
    }

    /// Returns true when the error is a client-error class response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Intended for CLI contexts where the variant name does not add value
    /// to end users. The returned string matches the [`std::fmt::Display`]
    /// implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        if source.is_decode() {
            return Self::Decode {
                message: source.to_string()
            };
        }

        match source.status() {
            Some(status) => Self::from_status(status.as_u16()),
            None => Self::Network {
                message: source.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn network_constructor_populates_message() {
        let error = Error::network("connection refused");
        match error {
            Error::Network {
                ref message
            } => {
                assert_eq!(message, "connection refused");
            }
            other => panic!("expected network error, got {other:?}")
        }
    }

    #[test]
    fn validation_constructor_populates_parameter_and_code() {
        let error = Error::validation("service:scm:github:repository", "github-repository");
        match error {
            Error::Validation {
                ref parameter,
                ref code
            } => {
                assert_eq!(parameter, "service:scm:github:repository");
                assert_eq!(code, "github-repository");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn from_status_splits_client_and_server_classes() {
        assert!(matches!(Error::from_status(404), Error::Client { status: 404 }));
        assert!(matches!(Error::from_status(429), Error::Client { status: 429 }));
        assert!(matches!(Error::from_status(500), Error::Server { status: 500 }));
        assert!(matches!(Error::from_status(503), Error::Server { status: 503 }));
    }

    #[test]
    fn is_client_error_matches_only_client_variant() {
        assert!(Error::from_status(404).is_client_error());
        assert!(!Error::from_status(502).is_client_error());
        assert!(!Error::network("down").is_client_error());
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::validation("key", "code");
        assert_eq!(error.to_string(), error.to_display_string());
    }
}
