//! Report envelopes and their console, JSON, Markdown and HTML renderings

pub mod formatter;
pub mod report;
