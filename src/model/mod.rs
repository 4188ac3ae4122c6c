//! Schema-mapping table and its lookup index.

pub mod entities;
mod registry;
mod types;

pub use registry::ClinicModel;
pub use types::*;
