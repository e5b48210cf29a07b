//! Classified failure categories for one fetch cycle.
//!
//! These carry no user-facing wording; see
//! [`presentation::error_message`](crate::presentation::error_message).

/// Why a payload could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The field is present but holds the wrong type (including `null`).
    TypeMismatch,
    MissingKey,
    /// Not parseable as JSON at all.
    Corrupted,
    /// The payload stops in the middle of a value.
    UnexpectedEnd,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NoConnectivity,
    Timeout,
    HostUnreachable,
    BadServerResponse { status: u16 },
    DecodingFailed { kind: DecodeErrorKind, detail: String },
    Unknown { detail: String },
}

impl ErrorKind {
    /// Transport failures are worth retrying as-is; decode failures usually
    /// are not until the feed changes.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::NoConnectivity
                | ErrorKind::Timeout
                | ErrorKind::HostUnreachable
                | ErrorKind::BadServerResponse { .. }
        )
    }
}
