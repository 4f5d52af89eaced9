//! Public API for the shepard-recolor crate.
//!
//! This module provides the high-level API: [`Recolorer`] builder and
//! [`RecolorError`] unified error type.

mod builder;
mod error;

pub use builder::Recolorer;
pub use error::RecolorError;
