//! Core data structures and traits for meshlod
//!
//! This crate provides the fundamental types shared by the simplification
//! pipeline: points and vectors, the indexed triangle mesh, and the error type.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;
