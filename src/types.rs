/*!
 * Core types and data structures for ccopier
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use strum::Display;

/// Classification of a file for copy purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FileType {
    /// Readable text content
    Text,
    /// Image, video or audio file
    Media,
    /// Any other non-text content
    Binary,
}

/// A file in a scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Content classification
    pub file_type: FileType,
}

impl FileNode {
    /// Create a file node, deriving the name from the path
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        let path = path.into();
        Self {
            name: file_name(&path),
            path,
            file_type,
        }
    }

    /// Read the whole file as UTF-8 text
    pub fn read_text(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn is_media(&self) -> bool {
        self.file_type == FileType::Media
    }
}

/// A directory snapshot: direct files and direct subdirectories, each in
/// enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Direct child files
    pub files: Vec<FileNode>,
    /// Direct child directories
    pub subdirectories: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Create an empty directory node
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: file_name(&path),
            path,
            files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    /// Total number of files in this directory and all of its descendants
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }
}

/// Anything that can be walked like a directory: a raw listing or a tree
/// view node
pub trait DirectoryLike {
    /// Files directly in this directory, in enumeration order
    fn files(&self) -> Vec<&FileNode>;

    /// Directories directly in this directory, in enumeration order
    fn subdirectories(&self) -> Vec<&Self>;
}

impl DirectoryLike for DirectoryNode {
    fn files(&self) -> Vec<&FileNode> {
        self.files.iter().collect()
    }

    fn subdirectories(&self) -> Vec<&Self> {
        self.subdirectories.iter().collect()
    }
}

/// Last component of a path, lossily converted
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
