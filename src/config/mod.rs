//! Configuration module for Paper Digest
//!
//! `Settings` and the code that reads and writes them under the platform
//! config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
