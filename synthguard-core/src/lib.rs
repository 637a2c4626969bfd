//! Shared primitives for the synthguard DNA construct analysis crates.
//!
//! - **Error types**: [`SynthguardError`] and [`Result`] for structured error handling
//! - **Traits**: [`Scored`] and [`Summarizable`], implemented by report types

pub mod error;
pub mod traits;

pub use error::{Result, SynthguardError};
pub use traits::*;
