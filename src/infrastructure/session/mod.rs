//! Session storage implementations

mod in_memory;

pub use in_memory::{InMemorySessionConfig, InMemorySessionRepository};
