//! Core types for Kaninchenbau: locations, items, story flags, and the world model.
//!
//! This crate holds the story content and everything that is *where* in it.
//! It knows nothing about commands or narration; the fiction engine drives a
//! [`World`] through its placement methods and renders [`Text`] against the
//! player's [`FlagSet`].

/// Story content document and its validation.
pub mod content;
/// Location and item definitions, identifiers, and item placement.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Story flags and flag-conditioned text.
pub mod flag;
/// The world model that owns locations and tracks item placement.
pub mod world;

/// Re-export content types.
pub use content::{Content, ContentWarning, Secrets};
/// Re-export entity types.
pub use entity::{Exit, Item, ItemId, Location, LocationId, Placement, Retirement};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export flag types.
pub use flag::{Flag, FlagSet, Text, Variant};
/// Re-export world model types.
pub use world::World;
