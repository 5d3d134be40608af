//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Framed Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Cmd (1)  │ Len (4)  │    Payload (bincode body)   │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - 0x01: CREATE           - Payload: laptop
//! - 0x02: FIND             - Payload: id
//! - 0x03: SEARCH           - Payload: filter
//! - 0x04: UPDATE           - Payload: laptop
//! - 0x05: DELETE           - Payload: id
//! - 0x06: DELETE_BY_FILTER - Payload: filter
//! - 0x07: DELETE_BY_IDS    - Payload: list of ids
//! - 0x08: PING             - Payload: empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: ERROR
//! - 0x03: ALREADY_EXISTS
//! - 0x04: INVALID_ARGUMENT
//! - 0x05: CANCELLED
//! - 0x06: ITEM (one streamed search result)
//!
//! A SEARCH is answered by zero or more ITEM frames and a final OK frame
//! carrying the number of items sent.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_command,
    read_response, write_command, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
