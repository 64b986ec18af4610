//! Domains module containing business logic organized by bounded contexts.
//!
//! The server only exposes tools; prompts and resources are advertised but
//! always empty, so `tools` is the single domain.

pub mod tools;
