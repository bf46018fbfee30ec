use crate::models::{Chapter, ChapterFile};
use crate::stats::TextStats;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid chapter file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid manuscript directory: {0}")]
    InvalidManuscriptDir(String),
}

/// Read and parse a chapter file
pub fn read_chapter(relative_path: &RelativePath, root: &Path) -> Result<ChapterFile, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let content = fs::read_to_string(&absolute_path)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: absolute_path,
        source,
    })
}

/// Write a chapter file, refreshing its stored word count
pub fn write_chapter(
    relative_path: &RelativePath,
    root: &Path,
    chapter: &mut ChapterFile,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    chapter.word_count = TextStats::of(&chapter.content).words;
    let json = serde_json::to_string_pretty(chapter).map_err(|source| IoError::Json {
        path: absolute_path.clone(),
        source,
    })?;
    fs::write(&absolute_path, json).map_err(IoError::Io)
}

/// Scan for chapter files (`*.json`) in the manuscript directory
pub fn scan_chapter_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidManuscriptDir(
            "manuscript directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Load every chapter of a manuscript, ordered by `order` then path.
///
/// A chapter file that cannot be read or parsed is logged and left out;
/// it stays on disk untouched.
pub fn load_manuscript(root: &Path) -> Result<Vec<Chapter>, IoError> {
    let mut chapters = Vec::new();
    for path in scan_chapter_files(root)? {
        let Ok(stripped) = path.strip_prefix(root) else {
            continue;
        };
        let Ok(relative_path) = RelativePathBuf::from_path(stripped) else {
            log::warn!("Skipping chapter with non-relative path {}", path.display());
            continue;
        };
        let file = match read_chapter(&relative_path, root) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Skipping unreadable chapter: {err}");
                continue;
            }
        };
        chapters.push(Chapter::new(relative_path, file));
    }
    chapters.sort_by(|a, b| {
        a.file()
            .order
            .cmp(&b.file().order)
            .then_with(|| a.relative_path().cmp(b.relative_path()))
    });
    Ok(chapters)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_manuscript_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidManuscriptDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
