//! Reply definitions
//!
//! Represents replies sent to clients.

/// Reply status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    Error = 0x01,
}

/// A reply to send to a client
///
/// The text carries the response grammar on success ("a = 10", "a = None",
/// "NO COMMANDS", a decimal count, "CLEANED", "PONG") or an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Status code
    pub status: Status,

    /// Reply text
    pub text: String,
}

impl Reply {
    /// Create an OK reply with the given text
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            text: text.into(),
        }
    }

    /// Create an ERROR reply
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            text: message.to_string(),
        }
    }
}
