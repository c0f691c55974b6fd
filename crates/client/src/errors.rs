//! Error types for the Gitsap API client domain.
//!
//! The envelope client never returns these to its callers: every request
//! resolves to an [`crate::Envelope`]. [`TransportError`] is the contract
//! between a [`crate::Transport`] implementation and the client, which logs it
//! and normalizes it into the network-error envelope. [`ClientError`] covers
//! construction-time failures only.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// A request that produced no HTTP response at all.
///
/// A response with a non-success status is *not* a transport error; it is
/// delivered as a [`crate::TransportResponse`] and normalized by the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request or the response body did not complete in time.
    #[error("Request timed out")]
    Timeout,

    /// No connection could be established with the server.
    #[error("Connection failed: {message}")]
    Connect {
        /// Description reported by the underlying transport.
        message: String,
    },

    /// The request could not be built (invalid URL, header value, or body).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of the offending request component.
        message: String,
    },

    /// The response started but its body could not be read.
    #[error("Response body could not be read: {message}")]
    Body {
        /// Description reported by the underlying transport.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Client errors
// ---------------------------------------------------------------------------

/// Errors raised while configuring a client, before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The client configuration is invalid.
    ///
    /// Produced at load time; a client is never built from an invalid config.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}
