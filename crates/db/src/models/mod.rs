//! Row structs and DTOs, one module per table.

pub mod garment;
pub mod status;
pub mod tryon_history;
