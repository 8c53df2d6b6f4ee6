//! Evaluation through the facade.
//!
//! - `programs` - whole programs exercising several features at once
//! - `properties` - property tests for arithmetic and comparison

mod programs;
mod properties;
