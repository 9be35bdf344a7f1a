//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes a single domain: tools, with the marketing catalog
//! under `tools/definitions/`.

pub mod tools;
