//! Domain models for the changelog service.
//!
//! # Core Concepts
//!
//! - [`Version`]: A release entry (semantic version, product tag, title,
//!   publish date, draft/published status) plus its structured release
//!   notes. This is the unit of persistence.
//! - [`UpdateGroup`] / [`ListItem`]: The structured form of the bullet-list
//!   markup an author types: one group per category heading, items with at
//!   most one level of children.
//! - [`Category`]: The three canonical note categories with their bilingual
//!   heading aliases.
//! - [`AppConfig`]: Site settings, the product list, and the shared admin
//!   credential, stored alongside the changelog data.

mod config;
mod update;
mod version;

pub use config::*;
pub use update::*;
pub use version::*;
