//! Twigg - streaming course-draft generation client
//!
//! Decodes the server-sent event stream of a course generation request and
//! assembles the frames into a course draft.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod sse;
