//! The resource store: validated, id-allocating CRUD over a persistence port.

mod store;

pub use store::{ListPage, ResourceStore};
