/*!
 * Folder serialization: turns directory trees into one text document
 *
 * A single depth-first walk (direct files first, then subdirectories) is
 * shared by the configurable folder copy and the fixed-format tree copy;
 * the differences between the two live in [`FormatPolicy`].
 */

use std::path::Path;

use crate::options::CopyOptions;
use crate::types::{file_name, DirectoryLike, FileNode, FileType};
use crate::utils::truncate_chars_from_end;

/// Body written in place of a media file's content
pub const MEDIA_PLACEHOLDER: &str = "[Media file content not included]";

/// Shape of the line introducing each file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `<comment_prefix> [<file_prefix> ]<path>`
    Commented,
    /// `//FileName: <path>`
    FileName,
}

/// What to do with files that are not text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaHandling {
    /// Leave media and binary files out entirely
    Exclude,
    /// Keep media files with a placeholder body
    Redact,
}

/// Formatting parameters for one serialization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPolicy {
    pub top_instruction: String,
    pub comment_prefix: String,
    pub to_file_instructions: String,
    pub file_prefix: String,
    pub file_separator: String,
    pub use_relative_paths: bool,
    pub include_last_separator: bool,
    pub header: HeaderStyle,
    pub media: MediaHandling,
}

impl FormatPolicy {
    /// Policy for the configurable folder copy
    pub fn from_options(options: &CopyOptions) -> Self {
        Self {
            top_instruction: options.top_instruction.clone(),
            comment_prefix: options.comment_prefix.clone(),
            to_file_instructions: options.to_file_instructions.clone(),
            file_prefix: options.file_prefix.clone(),
            file_separator: options.file_separator.clone(),
            use_relative_paths: options.use_relative_paths,
            include_last_separator: options.include_last_separator,
            header: HeaderStyle::Commented,
            media: MediaHandling::Exclude,
        }
    }

    /// Fixed policy for copying a tree view selection
    pub fn tool_window() -> Self {
        Self {
            top_instruction: String::new(),
            comment_prefix: "//".to_string(),
            to_file_instructions: String::new(),
            file_prefix: String::new(),
            file_separator: "\n\n".to_string(),
            use_relative_paths: true,
            include_last_separator: true,
            header: HeaderStyle::FileName,
            media: MediaHandling::Redact,
        }
    }
}

/// Output of a serialization run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serialization {
    /// The accumulated document
    pub text: String,
    /// Display paths of the included files, in emission order
    pub copied: Vec<String>,
}

impl Serialization {
    /// True when no file was included; nothing should be copied
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty()
    }
}

/// Serializes directory-like trees according to a [`FormatPolicy`]
pub struct Serializer<'a> {
    policy: &'a FormatPolicy,
    project_root: Option<&'a Path>,
}

impl<'a> Serializer<'a> {
    pub fn new(policy: &'a FormatPolicy, project_root: Option<&'a Path>) -> Self {
        Self {
            policy,
            project_root,
        }
    }

    /// Serialize `roots` in order into a single document.
    ///
    /// The top instruction is written once for the whole call, and the
    /// trailing separator is trimmed once after the last root.
    pub fn serialize<D: DirectoryLike>(&self, roots: &[&D]) -> Serialization {
        let mut out = Serialization::default();

        if !self.policy.top_instruction.is_empty() {
            out.text.push_str(&self.policy.comment_prefix);
            out.text.push(' ');
            out.text.push_str(&self.policy.top_instruction);
            out.text.push_str("\n\n");
        }

        for root in roots {
            self.collect(*root, &mut out);
        }

        let separator_len = self.policy.file_separator.chars().count();
        if !self.policy.include_last_separator && out.text.chars().count() >= separator_len {
            truncate_chars_from_end(&mut out.text, separator_len);
        }

        log::debug!(
            "serialized {} files into {} bytes",
            out.copied.len(),
            out.text.len()
        );
        out
    }

    fn collect<D: DirectoryLike>(&self, dir: &D, out: &mut Serialization) {
        for file in dir.files() {
            self.write_file(file, out);
        }
        for sub in dir.subdirectories() {
            self.collect(sub, out);
        }
    }

    fn write_file(&self, file: &FileNode, out: &mut Serialization) {
        let policy = self.policy;

        if policy.media == MediaHandling::Exclude && file.file_type != FileType::Text {
            log::debug!("skipping {} file {}", file.file_type, file.path.display());
            return;
        }

        let display_path = self.display_path(file);

        match policy.header {
            HeaderStyle::Commented => {
                out.text.push_str(&policy.comment_prefix);
                out.text.push(' ');
                if !policy.file_prefix.is_empty() {
                    out.text.push_str(&policy.file_prefix);
                    out.text.push(' ');
                }
                out.text.push_str(&display_path);
                out.text.push('\n');
            }
            HeaderStyle::FileName => {
                out.text.push_str("//FileName: ");
                out.text.push_str(&display_path);
                out.text.push('\n');
            }
        }

        if !policy.to_file_instructions.is_empty() {
            out.text.push_str(&policy.comment_prefix);
            out.text.push(' ');
            out.text.push_str(&policy.to_file_instructions);
            out.text.push('\n');
        }

        if policy.media == MediaHandling::Redact && file.is_media() {
            out.text.push_str(MEDIA_PLACEHOLDER);
        } else {
            match file.read_text() {
                Ok(content) => out.text.push_str(&content),
                Err(e) => {
                    log::warn!("Error reading file {}: {}", file.path.display(), e);
                    out.text.push_str(&format!("Error reading file: {}", e));
                }
            }
        }

        out.text.push_str(&policy.file_separator);
        out.copied.push(display_path);
    }

    /// Path written into a file's header line
    pub fn display_path(&self, file: &FileNode) -> String {
        display_path(&file.path, self.project_root, self.policy.use_relative_paths)
    }
}

/// Project-relative path when `relative` is set and the file lies under
/// `project_root`, its base name when it does not, and the absolute path
/// otherwise
pub fn display_path(path: &Path, project_root: Option<&Path>, relative: bool) -> String {
    if !relative {
        return path.to_string_lossy().to_string();
    }

    if let Some(rest) = project_root.and_then(|root| path.strip_prefix(root).ok()) {
        if !rest.as_os_str().is_empty() {
            return rest.to_string_lossy().to_string();
        }
    }

    file_name(path)
}
