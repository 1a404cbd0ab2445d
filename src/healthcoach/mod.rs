// src/healthcoach/mod.rs

pub mod agents;
pub mod clock;
pub mod config;
pub mod evaluation;
pub mod models;
pub mod session;
pub mod targets;
pub mod tool_protocol;
pub mod tool_protocols;
pub mod tools;

// Export SessionStore so callers can write healthcoach::SessionStore
// instead of healthcoach::healthcoach::session::SessionStore
pub use session::SessionStore;
