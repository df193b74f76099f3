//! A small self-hosted changelog publishing service.
//!
//! Release notes are authored in a constrained two-level bullet markup
//! ([`markup`]), stored as JSON files on disk ([`store`]), and served over
//! an HTTP API ([`api`]) with a public read side and a cookie-gated admin
//! side for authoring, uploads, and site configuration.

pub mod api;
pub mod markup;
pub mod models;
pub mod store;
