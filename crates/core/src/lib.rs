//! Domain types and pure logic for the try-on generation service.
//!
//! Nothing in this crate performs I/O: catalog lookups, request validation,
//! prompt construction and pagination maths live here so the persistence,
//! provider and HTTP crates can share them.

pub mod catalog;
pub mod error;
pub mod garment;
pub mod pagination;
pub mod prompt;
pub mod tryon;
pub mod types;
