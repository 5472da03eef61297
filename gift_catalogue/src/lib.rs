//! # Gift Catalogue
//!
//! Host-facing data for the gift tracker: entity identifiers, reaction
//! categories, inventory and dialogue observations, and the content snapshot
//! (relationships, dialogue templates, reactive lines) the host exposes.
//! This crate holds no inference logic.

pub mod catalogue;
pub mod entities;
pub mod reactions;

pub use catalogue::*;
pub use entities::*;
pub use reactions::*;
