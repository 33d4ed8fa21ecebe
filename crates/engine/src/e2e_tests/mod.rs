//! End-to-end tests for the quest lifecycle.
//!
//! Every test builds the complete `App` over a shared in-memory store with a
//! fixed clock and a scripted random source, then drives it through the
//! `CommandApi` the way a caller would.
//!
//! ```bash
//! cargo test -p chorewars-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
