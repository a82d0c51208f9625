//! Dashboard insight derivation.
//!
//! This module provides pure business logic for deriving narrative insights
//! from an aggregate dashboard snapshot:
//! - Profit warning (most concerning product)
//! - Growth opportunity (most profitable category)
//! - Revenue pattern (highest-growth month)
//! - Customer acquisition note
//! - Recommended actions

pub mod engine;
pub mod types;


pub use engine::InsightEngine;
pub use types::*;
