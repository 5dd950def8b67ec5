//! Integration test suite for the component builder.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **pipeline**: full view compilation through the library API
//! - **cli**: the `cbuild` binary end to end

mod cli;
mod pipeline;
