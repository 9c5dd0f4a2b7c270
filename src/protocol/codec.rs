//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Request Type
//! - SET:        name_len (4 bytes) + name + value
//! - GET:        name_len (4 bytes) + name
//! - UNSET:      name_len (4 bytes) + name
//! - NUMEQUALTO: value_len (4 bytes) + value
//! - UNDO/REDO/RESET/PING: empty
//!
//! ### Reply Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │      Payload (UTF-8)        │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{Read, Write};

use crate::error::{Result, VarError};
use super::{Reply, Request, Status};

/// Header size: 1 byte request/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (1 MB — names and values are short strings)
pub const MAX_PAYLOAD_SIZE: u32 = 1024 * 1024;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to bytes
///
/// Format: request_type (1) + payload_len (4) + payload
pub fn encode_request(request: &Request) -> Vec<u8> {
    let request_type = request.request_type() as u8;

    // Build payload based on request type
    let payload = match request {
        Request::Set { name, value } => {
            let mut payload = Vec::with_capacity(4 + name.len() + value.len());
            payload.extend_from_slice(&(name.len() as u32).to_be_bytes());
            payload.extend_from_slice(name.as_bytes());
            payload.extend_from_slice(value.as_bytes());
            payload
        }
        Request::Get { name } | Request::Unset { name } => {
            let mut payload = Vec::with_capacity(4 + name.len());
            payload.extend_from_slice(&(name.len() as u32).to_be_bytes());
            payload.extend_from_slice(name.as_bytes());
            payload
        }
        Request::NumEqualTo { value } => {
            let mut payload = Vec::with_capacity(4 + value.len());
            payload.extend_from_slice(&(value.len() as u32).to_be_bytes());
            payload.extend_from_slice(value.as_bytes());
            payload
        }
        Request::Undo | Request::Redo | Request::Reset | Request::Ping => Vec::new(),
    };

    // Build full message: header + payload
    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(request_type);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(&payload);

    message
}

/// Decode a request from bytes
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    if bytes.len() < HEADER_SIZE {
        return Err(VarError::Protocol(format!(
            "incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    // Parse header
    let request_type = bytes[0];
    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(VarError::Protocol(format!(
            "payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(VarError::Protocol(format!(
            "incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    let payload = &bytes[HEADER_SIZE..total_len];

    // Parse request based on type
    match request_type {
        0x01 => decode_set(payload),
        0x02 => {
            let name = decode_single_field(payload, "GET", "name")?;
            Ok(Request::Get { name })
        }
        0x03 => {
            let name = decode_single_field(payload, "UNSET", "name")?;
            Ok(Request::Unset { name })
        }
        0x04 => {
            let value = decode_single_field(payload, "NUMEQUALTO", "value")?;
            Ok(Request::NumEqualTo { value })
        }
        0x05 => decode_empty(payload, "UNDO", Request::Undo),
        0x06 => decode_empty(payload, "REDO", Request::Redo),
        0x07 => decode_empty(payload, "RESET", Request::Reset),
        0x08 => decode_empty(payload, "PING", Request::Ping),
        _ => Err(VarError::Protocol(format!(
            "unknown request type: 0x{:02x}",
            request_type
        ))),
    }
}

/// Decode SET payload: name_len (4) + name + value
fn decode_set(payload: &[u8]) -> Result<Request> {
    if payload.len() < 4 {
        return Err(VarError::Protocol(
            "SET request: missing name length".to_string(),
        ));
    }

    let name_len = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;

    if payload.len() < 4 + name_len {
        return Err(VarError::Protocol(format!(
            "SET request: incomplete name (expected {}, got {})",
            name_len,
            payload.len() - 4
        )));
    }

    let name = utf8_field(&payload[4..4 + name_len], "SET", "name")?;
    let value = utf8_field(&payload[4 + name_len..], "SET", "value")?;

    Ok(Request::Set { name, value })
}

/// Decode a single length-prefixed string payload
fn decode_single_field(payload: &[u8], request: &str, field: &str) -> Result<String> {
    if payload.len() < 4 {
        return Err(VarError::Protocol(format!(
            "{} request: missing {} length",
            request, field
        )));
    }

    let field_len = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;

    if payload.len() < 4 + field_len {
        return Err(VarError::Protocol(format!(
            "{} request: incomplete {} (expected {}, got {})",
            request,
            field,
            field_len,
            payload.len() - 4
        )));
    }

    utf8_field(&payload[4..4 + field_len], request, field)
}

/// Decode a request that carries no payload
fn decode_empty(payload: &[u8], request: &str, parsed: Request) -> Result<Request> {
    if !payload.is_empty() {
        return Err(VarError::Protocol(format!(
            "{} request: unexpected payload of {} bytes",
            request,
            payload.len()
        )));
    }
    Ok(parsed)
}

fn utf8_field(bytes: &[u8], request: &str, field: &str) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| {
        VarError::Protocol(format!("{} request: {} is not valid UTF-8", request, field))
    })
}

// =============================================================================
// Reply Encoding/Decoding
// =============================================================================

/// Encode a reply to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_reply(reply: &Reply) -> Vec<u8> {
    let payload = reply.text.as_bytes();

    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(reply.status as u8);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(payload);

    message
}

/// Decode a reply from bytes
pub fn decode_reply(bytes: &[u8]) -> Result<Reply> {
    if bytes.len() < HEADER_SIZE {
        return Err(VarError::Protocol(format!(
            "incomplete reply header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    // Parse header
    let status_byte = bytes[0];
    let payload_len = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(VarError::Protocol(format!(
            "reply payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(VarError::Protocol(format!(
            "incomplete reply payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    // Parse status
    let status = match status_byte {
        0x00 => Status::Ok,
        0x01 => Status::Error,
        _ => {
            return Err(VarError::Protocol(format!(
                "unknown reply status: 0x{:02x}",
                status_byte
            )))
        }
    };

    let text = String::from_utf8(bytes[HEADER_SIZE..total_len].to_vec())
        .map_err(|_| VarError::Protocol("reply text is not valid UTF-8".to_string()))?;

    Ok(Reply { status, text })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until a complete request is received or an error occurs
pub fn read_request<R: Read>(reader: &mut R) -> Result<Request> {
    let message = read_frame(reader)?;
    decode_request(&message)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete reply from a stream
pub fn read_reply<R: Read>(reader: &mut R) -> Result<Reply> {
    let message = read_frame(reader)?;
    decode_reply(&message)
}

/// Write a reply to a stream
pub fn write_reply<W: Write>(writer: &mut W, reply: &Reply) -> Result<()> {
    let bytes = encode_reply(reply);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one length-prefixed frame (header + payload)
fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    // Read header first
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    // Parse payload length
    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;

    // Validate payload length
    if payload_len > MAX_PAYLOAD_SIZE as usize {
        return Err(VarError::Protocol(format!(
            "payload too large: {} bytes (max {})",
            payload_len, MAX_PAYLOAD_SIZE
        )));
    }

    // Read payload
    let mut message = Vec::with_capacity(HEADER_SIZE + payload_len);
    message.extend_from_slice(&header);
    if payload_len > 0 {
        let mut payload = vec![0u8; payload_len];
        reader.read_exact(&mut payload)?;
        message.extend_from_slice(&payload);
    }

    Ok(message)
}
