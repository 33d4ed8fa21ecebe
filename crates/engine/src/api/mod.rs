//! API layer - the command/query boundary.

pub mod commands;
pub mod mapping;

pub use commands::CommandApi;
