//! Document format detection by file extension

use crate::error::{Result, SkillGapError};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Markdown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" | "text" => Some(DocumentFormat::Text),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }

    pub fn detect(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                SkillGapError::UnsupportedFormat(format!(
                    "{} (expected .txt, .md or .pdf)",
                    path.display()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(DocumentFormat::detect(Path::new("cv.PDF")).unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::detect(Path::new("job.markdown")).unwrap(), DocumentFormat::Markdown);
        assert_eq!(DocumentFormat::detect(Path::new("a/b/notes.txt")).unwrap(), DocumentFormat::Text);
        assert!(matches!(
            DocumentFormat::detect(Path::new("resume.docx")),
            Err(SkillGapError::UnsupportedFormat(_))
        ));
        assert!(DocumentFormat::detect(Path::new("README")).is_err());
    }
}
