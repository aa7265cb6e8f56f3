//! Service layer: id allocation, persistence ports, the per-collection
//! resource store, accounts and seeding.
//! - Business rules live here; the HTTP adapter only maps results.
//! - Validation and resource definitions come from the `models` crate.

pub mod accounts;
pub mod allocator;
pub mod errors;
pub mod pagination;
pub mod query;
pub mod resource;
pub mod runtime;
pub mod seed;
pub mod storage;
