//! CLI commands

pub mod convert;

pub use convert::{ConvertArgs, handle_convert};
