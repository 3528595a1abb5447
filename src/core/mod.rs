//! Configuration, data model and session state shared by every handler

pub mod config;
pub mod models;
pub mod session;
