//! Input processing module
//! Detects document formats and extracts plain text from resumes and job descriptions

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::DocumentLoader;
