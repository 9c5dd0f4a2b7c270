//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: SET        - Payload: name_len (4) + name + value
//! - 0x02: GET        - Payload: name_len (4) + name
//! - 0x03: UNSET      - Payload: name_len (4) + name
//! - 0x04: NUMEQUALTO - Payload: value_len (4) + value
//! - 0x05: UNDO       - Payload: empty
//! - 0x06: REDO       - Payload: empty
//! - 0x07: RESET      - Payload: empty
//! - 0x08: PING       - Payload: empty
//!
//! All string fields are UTF-8.
//!
//! ### Reply Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │      Payload (UTF-8)        │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK     - payload is the reply text (e.g. "a = 10", "NO COMMANDS")
//! - 0x01: ERROR  - payload is the error message

mod command;
mod response;
mod codec;

pub use command::{Request, RequestType};
pub use response::{Reply, Status};
pub use codec::{
    decode_reply, decode_request, encode_reply, encode_request, read_reply, read_request,
    write_reply, write_request, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
