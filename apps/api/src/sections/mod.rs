// Single-section operations: refine, feedback, comment, history.

pub mod handlers;
pub mod service;
