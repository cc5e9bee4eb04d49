//! DNS Sentinel Infrastructure Layer
//!
//! Concrete adapters for the application layer's ports: SQLite and
//! in-memory `Store`, a DoH JSON `Resolver`, and webhook/logging
//! `Notifier`s.

pub mod database;
pub mod notifier;
pub mod resolver;
pub mod store;
