//! Core business logic for Salient.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types and insight calculations live here.
//!
//! # Modules
//!
//! - `insights` - Dashboard snapshot types and insight derivation

pub mod insights;
