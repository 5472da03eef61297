//! Taste store module - the persisted knowledge base of gift tastes.
//!
//! - **Facts**: confirmed (entity, item, category) triples
//! - **Store**: per-entity, per-category item sets with visibility-filtered reports
//! - **Persistence**: JSON load/save with fallback to an empty skeleton

mod fact;
mod persist;
mod store;

pub use fact::*;
pub use persist::*;
pub use store::*;
