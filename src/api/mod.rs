//! HTTP surface: routing, request parsing and page responses

pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the router for convenience
pub use handler::{WebState, build_router, serve};

/// Canonical failure message shown when something outside the broker's control fails.
pub const CANONICAL_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate a summary at this time. Please try again later.";
