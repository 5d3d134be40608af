//! Command definitions
//!
//! Represents requests from clients.

use crate::filter::Filter;
use crate::model::Laptop;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Create = 0x01,
    Find = 0x02,
    Search = 0x03,
    Update = 0x04,
    Delete = 0x05,
    DeleteByFilter = 0x06,
    DeleteByIds = 0x07,
    Ping = 0x08,
}

impl CommandType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(CommandType::Create),
            0x02 => Some(CommandType::Find),
            0x03 => Some(CommandType::Search),
            0x04 => Some(CommandType::Update),
            0x05 => Some(CommandType::Delete),
            0x06 => Some(CommandType::DeleteByFilter),
            0x07 => Some(CommandType::DeleteByIds),
            0x08 => Some(CommandType::Ping),
            _ => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Store a new laptop (empty id: server assigns one)
    Create { laptop: Laptop },

    /// Look a laptop up by id
    Find { id: String },

    /// Stream every laptop matching a filter
    Search { filter: Filter },

    /// Replace the laptop with the same id
    Update { laptop: Laptop },

    /// Delete one laptop by id
    Delete { id: String },

    /// Delete every laptop matching a filter
    DeleteByFilter { filter: Filter },

    /// Delete a batch of ids, skipping unknown ones
    DeleteByIds { ids: Vec<String> },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Create { .. } => CommandType::Create,
            Command::Find { .. } => CommandType::Find,
            Command::Search { .. } => CommandType::Search,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::DeleteByFilter { .. } => CommandType::DeleteByFilter,
            Command::DeleteByIds { .. } => CommandType::DeleteByIds,
            Command::Ping => CommandType::Ping,
        }
    }
}
