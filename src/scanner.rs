/*!
 * Directory scanning: snapshots a folder on disk into a [`DirectoryNode`]
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use mime_guess::mime;
use walkdir::{DirEntry, WalkDir};

use crate::types::{file_name, DirectoryNode, FileNode, FileType};
use crate::utils::is_default_ignored;

/// Bytes sampled when sniffing whether a file holds text
const SNIFF_LEN: usize = 8192;

/// Scanner for directory contents
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    /// Skip VCS metadata and OS junk entries
    use_default_ignore: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Scanner {
    /// Create a new scanner
    pub fn new(use_default_ignore: bool) -> Self {
        Self { use_default_ignore }
    }

    /// Scan `path` recursively and return its directory tree.
    ///
    /// Entries are listed in file-name order; symlinked directories are not
    /// followed.
    pub fn scan(&self, path: &Path) -> io::Result<DirectoryNode> {
        let abs_path = fs::canonicalize(path)?;
        if !abs_path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a directory: {}", abs_path.display()),
            ));
        }
        self.scan_directory(&abs_path)
    }

    fn scan_directory(&self, abs_path: &Path) -> io::Result<DirectoryNode> {
        log::debug!("scanning directory {}", abs_path.display());
        let mut node = DirectoryNode::new(abs_path);

        let entries: Vec<DirEntry> = WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Error reading entry in {}: {}", abs_path.display(), e);
                    None
                }
            })
            .filter(|e| !self.should_ignore(e))
            .collect();

        // Files first, then directories, each keeping listing order
        let (dirs, files): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|e| e.file_type().is_dir());

        for entry in files {
            let entry_path = entry.path();
            // Symlinks count as files only when they resolve to one
            if !entry_path.is_file() {
                log::debug!("skipping non-file entry {}", entry_path.display());
                continue;
            }
            match classify(entry_path) {
                Ok(file_type) => node.files.push(FileNode::new(entry_path, file_type)),
                Err(e) => log::warn!("Error processing {}: {}", entry_path.display(), e),
            }
        }

        for entry in dirs {
            match self.scan_directory(entry.path()) {
                Ok(dir_node) => node.subdirectories.push(dir_node),
                Err(e) => log::warn!(
                    "Error processing directory {}: {}",
                    entry.path().display(),
                    e
                ),
            }
        }

        Ok(node)
    }

    /// Check if an entry should be left out of the snapshot
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if !self.use_default_ignore {
            return false;
        }
        let name = file_name(entry.path());
        if is_default_ignored(&name) {
            log::debug!("ignoring {}", entry.path().display());
            return true;
        }
        false
    }
}

/// Whether the extension maps to an image, video or audio MIME type
pub fn is_media_file(path: &Path) -> bool {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    matches!(mime.type_(), mime::IMAGE | mime::VIDEO | mime::AUDIO)
}

/// Classify a file as media (by extension) or text/binary (by content)
pub fn classify(path: &Path) -> io::Result<FileType> {
    if is_media_file(path) {
        return Ok(FileType::Media);
    }

    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut buffer)?;

    if looks_like_text(&buffer) {
        Ok(FileType::Text)
    } else {
        Ok(FileType::Binary)
    }
}

/// Text heuristic: valid UTF-8 (a multi-byte character cut off at the end
/// of the sample is fine) and under 10% control bytes
fn looks_like_text(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }

    if let Err(e) = std::str::from_utf8(sample) {
        if e.error_len().is_some() {
            return false;
        }
    }

    // Count binary characters (0x00-0x08, 0x0E-0x1F)
    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    let binary_ratio = binary_count as f32 / sample.len() as f32;

    binary_ratio < 0.1
}
