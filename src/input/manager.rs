//! Document loading with a per-run text cache

use crate::error::Result;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct DocumentLoader {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a resume or job description as plain text
    pub async fn load_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let text = match DocumentFormat::detect(path)? {
            DocumentFormat::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            DocumentFormat::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            DocumentFormat::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
        };

        if text.trim().is_empty() {
            log::warn!("{} contains no text", path.display());
        }

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkillGapError;

    #[tokio::test]
    async fn test_load_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.md");
        std::fs::write(&path, "## Requirements\n\n* Python\n* AWS\n").unwrap();

        let mut loader = DocumentLoader::new();
        let text = loader.load_text(&path).await.unwrap();
        assert_eq!(text, "Requirements\nPython\nAWS");
        assert_eq!(loader.cache_size(), 1);

        // cached copy survives the file going away
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loader.load_text(&path).await.unwrap(), text);

        loader.clear_cache();
        assert!(matches!(loader.load_text(&path).await, Err(SkillGapError::Io(_))));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let mut loader = DocumentLoader::new().with_cache(false);
        let result = loader.load_text(Path::new("resume.docx")).await;
        assert!(matches!(result, Err(SkillGapError::UnsupportedFormat(_))));
    }
}
