//! Proxy List Generator
//!
//! Converts proxy definition files into a single grouped proxy list
//! document. Every input file becomes one group named after its path.

pub mod error;
pub mod proxy;

pub use error::GeneratorError;
pub use proxy::*;

/// Library result type
pub type Result<T> = std::result::Result<T, GeneratorError>;
