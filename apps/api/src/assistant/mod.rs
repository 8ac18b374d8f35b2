//! Career-assistant generation: prompt templates, the service calls behind each
//! content type, resume parsing, and the HTTP handlers that persist their results.

pub mod handlers;
pub mod outcome;
pub mod prompts;
pub mod resume_parser;
pub mod service;
