//! Client Module
//!
//! Blocking TCP client for the laptop catalog protocol.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{CatalogError, Result};
use crate::filter::Filter;
use crate::model::Laptop;
use crate::protocol::{read_response, write_command, Command, Response, Status};

/// A connection to a catalog server
///
/// One request is in flight at a time; a search holds the connection until
/// its final frame arrives.
pub struct LaptopClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl LaptopClient {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| CatalogError::Network(format!("connect failed: {}", e)))?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a command and wait for the single response it gets
    fn call(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    /// Create a laptop and return the id the server stored it under
    pub fn create_laptop(&mut self, laptop: &Laptop) -> Result<String> {
        let response = self.call(&Command::Create {
            laptop: laptop.clone(),
        })?;
        match response.status {
            Status::Ok => {
                let id = response.text()?;
                tracing::info!("laptop created with ID: {}", id);
                Ok(id)
            }
            _ => Err(response.into_error(&laptop.id)),
        }
    }

    pub fn find_laptop(&mut self, id: &str) -> Result<Option<Laptop>> {
        let response = self.call(&Command::Find { id: id.to_string() })?;
        match response.status {
            Status::Ok => Ok(Some(response.decode_laptop()?)),
            Status::NotFound => Ok(None),
            _ => Err(response.into_error(id)),
        }
    }

    /// Run a search, handing each laptop to `on_laptop` as it arrives
    ///
    /// Returns the number of results the server reported.
    pub fn search_laptop<F>(&mut self, filter: &Filter, mut on_laptop: F) -> Result<u64>
    where
        F: FnMut(Laptop),
    {
        tracing::info!("Search started");
        write_command(&mut self.writer, &Command::Search { filter: *filter })?;

        loop {
            let response = read_response(&mut self.reader)?;
            match response.status {
                Status::Item => {
                    let laptop = response.decode_laptop()?;
                    tracing::debug!("- found: {}", laptop.id);
                    on_laptop(laptop);
                }
                Status::Ok => {
                    let found = response.decode_count()?;
                    tracing::info!("Search completed, {} found", found);
                    return Ok(found);
                }
                _ => return Err(response.into_error("")),
            }
        }
    }

    /// Collect every search result
    pub fn search_all(&mut self, filter: &Filter) -> Result<Vec<Laptop>> {
        let mut found = Vec::new();
        self.search_laptop(filter, |laptop| found.push(laptop))?;
        Ok(found)
    }

    pub fn update_laptop(&mut self, laptop: &Laptop) -> Result<String> {
        let response = self.call(&Command::Update {
            laptop: laptop.clone(),
        })?;
        match response.status {
            Status::Ok => response.text(),
            _ => Err(response.into_error(&laptop.id)),
        }
    }

    pub fn delete_laptop(&mut self, id: &str) -> Result<()> {
        let response = self.call(&Command::Delete { id: id.to_string() })?;
        match response.status {
            Status::Ok => Ok(()),
            _ => Err(response.into_error(id)),
        }
    }

    pub fn delete_by_filter(&mut self, filter: &Filter) -> Result<u64> {
        let response = self.call(&Command::DeleteByFilter { filter: *filter })?;
        match response.status {
            Status::Ok => response.decode_count(),
            _ => Err(response.into_error("")),
        }
    }

    pub fn delete_by_ids(&mut self, ids: &[String]) -> Result<u64> {
        let response = self.call(&Command::DeleteByIds { ids: ids.to_vec() })?;
        match response.status {
            Status::Ok => response.decode_count(),
            _ => Err(response.into_error("")),
        }
    }

    pub fn ping(&mut self) -> Result<()> {
        let response = self.call(&Command::Ping)?;
        match response.status {
            Status::Ok => Ok(()),
            _ => Err(response.into_error("")),
        }
    }
}
