//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single bounded context today: tools that callers can
//! invoke. Each tool goes through the same validate → invoke → format
//! pipeline.

pub mod tools;
