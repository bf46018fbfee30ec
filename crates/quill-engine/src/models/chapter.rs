use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::models::Doc;

/// On-disk shape of one chapter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFile {
    pub title: String,
    #[serde(default)]
    pub order: u32,
    /// Refreshed on every save
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub content: Doc,
}

/// A chapter file located inside a manuscript directory
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    relative_path: RelativePathBuf,
    file: ChapterFile,
}

impl Chapter {
    pub fn new(relative_path: RelativePathBuf, file: ChapterFile) -> Self {
        Self {
            relative_path,
            file,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    pub fn file(&self) -> &ChapterFile {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut ChapterFile {
        &mut self.file
    }

    /// Title, falling back to the file stem for untitled chapters
    pub fn display_name(&self) -> &str {
        if !self.file.title.trim().is_empty() {
            return &self.file.title;
        }
        self.relative_path
            .file_name()
            .map(|name| name.strip_suffix(".json").unwrap_or(name))
            .unwrap_or("Untitled")
    }
}
