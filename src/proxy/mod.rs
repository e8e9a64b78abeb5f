//! Proxy module for building proxy list documents
//!
//! This module provides functionality for:
//! - Extracting proxy records from `{ name: ..., key: value }` blocks
//! - Building one group per input file
//! - Rendering and loading the grouped proxy list document

pub mod codec;
pub mod generator;
pub mod models;
pub mod parser;

pub use codec::{decode_document, encode_document};
pub use generator::{GeneratorConfig, ProxyListGenerator};
pub use models::{ProxyGroup, ProxyGroups, ProxyRecord};
pub use parser::ProxyParser;
