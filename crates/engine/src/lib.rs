//! ChoreWars Engine library.
//!
//! Quest lifecycle, progression, loot and the party activity feed.
//!
//! ## Structure
//!
//! - `use_cases/` - Quest lifecycle orchestration and its collaborators
//! - `infrastructure/` - Port traits plus in-memory, clock and random adapters
//! - `api/` - Command boundary returning `AppResult` envelopes
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests over the fully wired `App`.
#[cfg(test)]
mod e2e_tests;

pub use api::CommandApi;
pub use app::App;
