//! Quote Summary Generator - turns insurance quote PDFs into a client-ready email summary.
//!
//! A broker uploads quote PDFs through a small web form; the text of every page
//! is extracted and sent, inside a fixed instruction template, to an `OpenAI`
//! chat-completions endpoint. The reply is shown in a read-only text box ready
//! to paste into an email.
//!
//! # Architecture
//!
//! The system uses:
//! - axum for the HTTP form and page rendering
//! - lopdf for PDF text extraction
//! - openai-api-rs message types and reqwest for the completion call
//! - Tokio for the async runtime
//!
//! Each user action is an explicit [`features::Interaction`] routed by
//! [`features::dispatch`] to one handler, with per-session state passed in by
//! the caller.
//!
//! # Example
//!
//! ```no_run
//! use quote_summary::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     quote_summary::setup_logging();
//!
//!     let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
//!     quote_summary::api::serve(&config).await
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod features;
pub mod feedback;
pub mod pipeline;
pub mod prompt;
pub mod views;

pub use errors::QuoteError;

/// Configure structured logging with JSON format.
///
/// Verbosity comes from `RUST_LOG` and defaults to `info`. Safe to call more
/// than once; only the first call installs the subscriber.
///
/// # Example
///
/// ```
/// quote_summary::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
