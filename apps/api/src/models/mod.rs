pub mod application;
pub mod content;
pub mod job_posting;
pub mod profile;
