use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::editing::Document;
use crate::models::{ChapterFile, Doc};

/// Create a temporary manuscript directory
pub fn create_test_manuscript_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with raw content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Serialized chapter with a single paragraph
pub fn chapter_json(title: &str, order: u32, text: &str) -> String {
    let chapter = ChapterFile {
        title: title.to_string(),
        order,
        word_count: 0,
        content: Doc::from_paragraphs([text]),
    };
    serde_json::to_string(&chapter).unwrap()
}

/// Editing surface over plain paragraphs
pub fn document(paragraphs: &[&str]) -> Document {
    Document::new(Doc::from_paragraphs(paragraphs.iter().copied()))
}
