//! The upload → extract → summarize pipeline

pub mod extract;
pub mod summarize;
pub mod upload_gate;

pub use extract::{DocumentReader, LopdfReader, extract_text};
pub use summarize::generate_summary;
pub use upload_gate::check_uploads;
