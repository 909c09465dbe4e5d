//! # Shared Types Crate
//!
//! Primitive types used across the session escrow workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate primitives are defined here.
//! - **Explicit Identity**: Every protocol operation carries the caller's
//!   [`Address`] as a parameter; there is no ambient caller context.

pub mod entities;

pub use entities::*;
