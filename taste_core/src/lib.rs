//! # Taste Core
//!
//! Learns which gifts each entity loves, likes, dislikes, hates or is neutral
//! about by watching two host event streams, and keeps what it learns in a
//! persisted per-entity knowledge base.
//!
//! ## Core Components
//!
//! - **inference**: Relationship index, per-entity dialogue templates, and the
//!   engine that recovers third-party gift reactions from speech
//! - **taste_store**: The deduplicated, visibility-filtered, persisted fact store
//! - **classifier**: Direct-path correlation of inventory losses with reaction lines
//! - **session**: The per-save context wiring host callbacks to the above
//!
//! ## Case Rules
//!
//! - Entity identifiers compare case-insensitively everywhere
//! - Item names are opaque host strings and compare case-sensitively

pub mod classifier;
pub mod config;
pub mod error;
pub mod inference;
pub mod session;
pub mod taste_store;

pub use classifier::*;
pub use config::*;
pub use error::*;
pub use inference::*;
pub use session::*;
pub use taste_store::*;
