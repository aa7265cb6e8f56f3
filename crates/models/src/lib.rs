//! Domain model: records, field specifications, validation and the
//! catalogue of built-in resources.

pub mod errors;
pub mod field;
pub mod record;
pub mod resource;
pub mod validation;

pub mod book;
pub mod movie;
pub mod product;
pub mod task;
pub mod user;

pub use errors::ValidationError;
pub use field::{FieldKind, FieldRule, FieldSpec};
pub use record::{Collection, IdStrategy, Record, RecordId};
pub use resource::ResourceDef;

#[cfg(test)]
mod tests;
