//! Response definitions
//!
//! Represents responses to clients.

use crate::error::{CatalogError, Result};
use crate::model::Laptop;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    Error = 0x02,
    AlreadyExists = 0x03,
    InvalidArgument = 0x04,
    Cancelled = 0x05,
    Item = 0x06,
}

impl Status {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::NotFound),
            0x02 => Some(Status::Error),
            0x03 => Some(Status::AlreadyExists),
            0x04 => Some(Status::InvalidArgument),
            0x05 => Some(Status::Cancelled),
            0x06 => Some(Status::Item),
            _ => None,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (meaning depends on the command and status)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// OK carrying an id
    pub fn id(id: &str) -> Self {
        Self::ok(Some(id.as_bytes().to_vec()))
    }

    /// OK carrying a count (deletes, search terminator)
    pub fn count(count: u64) -> Self {
        Self::ok(Some(count.to_be_bytes().to_vec()))
    }

    /// OK carrying a laptop
    pub fn laptop(laptop: &Laptop) -> Result<Self> {
        Ok(Self::ok(Some(bincode::serialize(laptop)?)))
    }

    /// One streamed search result
    pub fn item(laptop: &Laptop) -> Result<Self> {
        Ok(Self {
            status: Status::Item,
            payload: Some(bincode::serialize(laptop)?),
        })
    }

    /// Create a NOT_FOUND response
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: None,
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self::with_message(Status::Error, message)
    }

    fn with_message(status: Status, message: &str) -> Self {
        Self {
            status,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Map a failed request to the status a client sees
    pub fn from_error(err: &CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound(_) => Self::with_message(Status::NotFound, &message),
            CatalogError::AlreadyExists(_) => Self::with_message(Status::AlreadyExists, &message),
            CatalogError::Invalid(_) => Self::with_message(Status::InvalidArgument, &message),
            CatalogError::Cancelled => Self::with_message(Status::Cancelled, &message),
            _ => Self::error(&message),
        }
    }

    // -------------------------------------------------------------------------
    // Payload accessors (client side)
    // -------------------------------------------------------------------------

    /// Payload as UTF-8 text (ids, error messages)
    pub fn text(&self) -> Result<String> {
        let bytes = self.payload.clone().unwrap_or_default();
        String::from_utf8(bytes)
            .map_err(|e| CatalogError::Protocol(format!("payload is not UTF-8: {}", e)))
    }

    pub fn decode_count(&self) -> Result<u64> {
        let bytes = self.payload.as_deref().unwrap_or_default();
        let bytes: [u8; 8] = bytes.try_into().map_err(|_| {
            CatalogError::Protocol(format!("count payload must be 8 bytes, got {}", bytes.len()))
        })?;
        Ok(u64::from_be_bytes(bytes))
    }

    pub fn decode_laptop(&self) -> Result<Laptop> {
        match self.payload.as_deref() {
            Some(bytes) => Ok(bincode::deserialize(bytes)?),
            None => Err(CatalogError::Protocol("missing laptop payload".to_string())),
        }
    }

    /// Turn a non-OK status back into the error it stands for
    ///
    /// `missing_id` names the id the request was about, for NOT_FOUND
    /// responses that carry no message.
    pub fn into_error(self, missing_id: &str) -> CatalogError {
        let message = self.text().unwrap_or_default();
        match self.status {
            Status::NotFound => CatalogError::NotFound(missing_id.to_string()),
            Status::AlreadyExists => CatalogError::AlreadyExists(missing_id.to_string()),
            Status::InvalidArgument => CatalogError::Invalid(message),
            Status::Cancelled => CatalogError::Cancelled,
            Status::Error => CatalogError::Network(message),
            Status::Ok | Status::Item => {
                CatalogError::Protocol(format!("unexpected {:?} response", self.status))
            }
        }
    }
}
