//! Proxy parser module for extracting proxy records from definition files
//!
//! The input grammar is small:
//! - a block is `{ name: ..., key: value, ... }`, may span lines and ends at
//!   the first closing brace (nested braces are not supported)
//! - a block body is split on commas into entries
//! - an entry is `key: value`, split on the first colon only

use crate::error::GeneratorError;
use crate::proxy::models::ProxyRecord;
use crate::Result;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Regex pattern to match a brace block whose first key is `name`
static BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\s*?(name.*?)\}").expect("Invalid block regex")
});

/// Regex pattern to split an entry on its first colon, trimming both sides
static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*([^:]*?)\s*:\s*(.*?)\s*$").expect("Invalid entry regex")
});

/// Separator between entries inside a block
const ENTRY_SEPARATOR: char = ',';

/// Proxy parser for extracting proxy records from strings and files
pub struct ProxyParser;

impl ProxyParser {
    /// Find the body of every block in `content`, in order of appearance
    pub fn find_blocks(content: &str) -> Vec<&str> {
        BLOCK_REGEX
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Parse a single `key: value` entry
    ///
    /// Blank entries (such as the one after a trailing comma) yield `None`.
    pub fn parse_entry(segment: &str) -> Result<Option<(&str, &str)>> {
        if segment.trim().is_empty() {
            return Ok(None);
        }

        let caps = ENTRY_REGEX.captures(segment).ok_or_else(|| {
            GeneratorError::malformed(format!("expected `key: value`, got `{}`", segment.trim()))
        })?;

        match (caps.get(1), caps.get(2)) {
            (Some(key), Some(value)) => Ok(Some((key.as_str(), value.as_str()))),
            _ => Err(GeneratorError::malformed(format!(
                "expected `key: value`, got `{}`",
                segment.trim()
            ))),
        }
    }

    /// Parse the body of one block into a record
    pub fn parse_block(body: &str, conn_num: u32) -> Result<ProxyRecord> {
        let mut record = ProxyRecord::new(conn_num);

        for segment in body.split(ENTRY_SEPARATOR) {
            let Some((key, value)) = Self::parse_entry(segment)? else {
                continue;
            };

            match key {
                "type" => record.proxy_type = Some(value.to_string()),
                "server" => record.host = Some(value.to_string()),
                "port" => {
                    let port = value.parse::<u16>().map_err(|_| {
                        GeneratorError::malformed(format!("invalid port `{}`", value))
                    })?;
                    record.port = Some(port);
                }
                "password" => record.password = Some(value.to_string()),
                _ => {
                    record.params.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(record)
    }

    /// Parse every block in `content`
    ///
    /// Content without any block is not an error and yields an empty list.
    pub fn parse_string(content: &str, conn_num: u32) -> Result<Vec<ProxyRecord>> {
        Self::find_blocks(content)
            .into_iter()
            .map(|body| -> Result<ProxyRecord> {
                let record = Self::parse_block(body, conn_num)?;
                debug!("Parsed proxy {}", record);
                Ok(record)
            })
            .collect()
    }

    /// Parse proxy records from a file
    pub fn parse_file<P: AsRef<Path>>(path: P, conn_num: u32) -> Result<Vec<ProxyRecord>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::parse_string(&content, conn_num).map_err(|e| e.in_file(path))
    }
}
