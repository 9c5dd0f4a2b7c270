//! Request definitions
//!
//! Represents the operation set clients can issue.

/// Request type bytes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestType {
    Set = 0x01,
    Get = 0x02,
    Unset = 0x03,
    NumEqualTo = 0x04,
    Undo = 0x05,
    Redo = 0x06,
    Reset = 0x07,
    Ping = 0x08,
}

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Set a variable to a value
    Set { name: String, value: String },

    /// Read a variable's current value
    Get { name: String },

    /// Remove a variable
    Unset { name: String },

    /// How many variables currently hold this value
    NumEqualTo { value: String },

    /// Reverse the last applied mutation
    Undo,

    /// Re-apply the last undone mutation
    Redo,

    /// Clear variables, counts, and history
    Reset,

    /// Ping (health check)
    Ping,
}

impl Request {
    /// Get the request type
    pub fn request_type(&self) -> RequestType {
        match self {
            Request::Set { .. } => RequestType::Set,
            Request::Get { .. } => RequestType::Get,
            Request::Unset { .. } => RequestType::Unset,
            Request::NumEqualTo { .. } => RequestType::NumEqualTo,
            Request::Undo => RequestType::Undo,
            Request::Redo => RequestType::Redo,
            Request::Reset => RequestType::Reset,
            Request::Ping => RequestType::Ping,
        }
    }
}
