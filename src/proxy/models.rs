//! Proxy list data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single proxy server definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRecord {
    #[serde(rename = "connNum")]
    pub conn_num: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Only `0..=65535` is accepted, any other integer is a malformed record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Every key that has no dedicated field, values kept verbatim
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl ProxyRecord {
    /// Create a record with only the connection count set
    pub fn new(conn_num: u32) -> Self {
        Self {
            conn_num,
            proxy_type: None,
            host: None,
            port: None,
            password: None,
            params: BTreeMap::new(),
        }
    }

    /// Get the `host:port` address when both parts are known
    pub fn address(&self) -> Option<String> {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => Some(format!("{}:{}", host, port)),
            _ => None,
        }
    }
}

impl fmt::Display for ProxyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.proxy_type.as_deref().unwrap_or("unknown");
        match self.address() {
            Some(address) => write!(f, "{}://{}", kind, address),
            None => write!(f, "{}://?", kind),
        }
    }
}

/// Proxies extracted from one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyGroup {
    /// Path of the source file
    pub name: String,
    pub list: Vec<ProxyRecord>,
}

impl ProxyGroup {
    pub fn new(name: String, list: Vec<ProxyRecord>) -> Self {
        Self { name, list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// The generated proxy list document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyGroups {
    /// How many proxies a consumer should pick from each group
    #[serde(rename = "selectPerGroup")]
    pub select_per_group: u32,
    pub groups: Vec<ProxyGroup>,
}

impl ProxyGroups {
    pub fn new(select_per_group: u32) -> Self {
        Self {
            select_per_group,
            groups: Vec::new(),
        }
    }

    /// Total number of records across all groups
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(ProxyGroup::len).sum()
    }
}
