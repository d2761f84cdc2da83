/*!
 * User-facing copy operations
 *
 * Each action resolves its inputs, runs the serializer, and hands the
 * result to the clipboard sink and the notifier. An empty result leaves the
 * clipboard untouched.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::clipboard::ClipboardSink;
use crate::error::Result;
use crate::notify::Notifier;
use crate::options;
use crate::scanner::Scanner;
use crate::serializer::{FormatPolicy, Serialization, Serializer};
use crate::tree::{Module, ProjectTree};

/// Notice shown when a selection holds no files
pub const NO_FILES_MESSAGE: &str = "No files to copy in the selected folder";

/// Result of a copy action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text went to the clipboard sink
    Copied(Serialization),
    /// Nothing was found; the clipboard was not touched
    NothingToCopy,
}

/// Collaborators shared by the copy actions
pub struct CopyContext<'a> {
    project_root: PathBuf,
    scanner: Scanner,
    clipboard: &'a dyn ClipboardSink,
    notifier: &'a dyn Notifier,
}

impl<'a> CopyContext<'a> {
    pub fn new(
        project_root: &Path,
        scanner: Scanner,
        clipboard: &'a dyn ClipboardSink,
        notifier: &'a dyn Notifier,
    ) -> Result<Self> {
        let project_root = fs::canonicalize(project_root).map_err(|e| {
            crate::error!(
                PathNotFound,
                "Project root {}: {}",
                project_root.display(),
                e
            )
        })?;
        Ok(Self {
            project_root,
            scanner,
            clipboard,
            notifier,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the tool-window tree for `modules`
    pub fn build_tree(&self, modules: &[Module]) -> Result<ProjectTree> {
        Ok(ProjectTree::build(&self.project_root, modules, &self.scanner)?)
    }

    /// Copy the content of `folders`, formatted with the project's options
    pub fn copy_folders(&self, folders: &[PathBuf]) -> Result<CopyOutcome> {
        let options = options::resolve(Some(&self.project_root), self.notifier);
        let policy = FormatPolicy::from_options(&options);

        let dirs = folders
            .iter()
            .map(|folder| self.scanner.scan(folder))
            .collect::<std::io::Result<Vec<_>>>()?;
        let roots: Vec<_> = dirs.iter().collect();

        let result = Serializer::new(&policy, Some(&self.project_root)).serialize(&roots);
        if result.is_empty() {
            self.notifier.info(NO_FILES_MESSAGE);
            return Ok(CopyOutcome::NothingToCopy);
        }

        self.clipboard.set_text(&result.text)?;
        self.notifier
            .info(&format!("Copied content of {} files", result.copied.len()));
        Ok(CopyOutcome::Copied(result))
    }

    /// Copy the subtree under the tree node matching `query`
    pub fn copy_tree_selection(&self, tree: &ProjectTree, query: &str) -> Result<CopyOutcome> {
        let Some(node) = tree.select(query) else {
            crate::bail!(Selection, "{}", query);
        };

        let policy = FormatPolicy::tool_window();
        let result = Serializer::new(&policy, Some(&tree.project_root)).serialize(&[node]);
        if result.is_empty() {
            self.notifier.info(NO_FILES_MESSAGE);
            return Ok(CopyOutcome::NothingToCopy);
        }

        self.clipboard.set_text(&result.text)?;
        log::debug!("content copied, length {}", result.text.len());
        self.notifier.info(&format!(
            "Copied {} files:\n{}",
            result.copied.len(),
            result.copied.join("\n")
        ));
        Ok(CopyOutcome::Copied(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::error::CopierError;
    use crate::notify::{RecordingNotifier, Severity};
    use crate::options::PROJECT_CONFIG_FILE;
    use tempfile::tempdir;

    #[test]
    fn test_copy_folders_writes_clipboard_and_notifies() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("lib.rs"), "pub fn a() {}\n").unwrap();
        let clipboard = MemoryClipboard::new();
        let notifier = RecordingNotifier::new();
        let ctx = CopyContext::new(dir.path(), Scanner::default(), &clipboard, &notifier).unwrap();

        let outcome = ctx.copy_folders(&[dir.path().join("src")]).unwrap();

        assert!(matches!(outcome, CopyOutcome::Copied(_)));
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("// src/lib.rs\npub fn a() {}\n")
        );
        assert_eq!(
            notifier.notices(),
            vec![(Severity::Info, "Copied content of 1 files".to_string())]
        );
    }

    #[test]
    fn test_copy_empty_folder_leaves_clipboard_alone() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let clipboard = MemoryClipboard::new();
        let notifier = RecordingNotifier::new();
        let ctx = CopyContext::new(dir.path(), Scanner::default(), &clipboard, &notifier).unwrap();

        let outcome = ctx.copy_folders(&[dir.path().join("empty")]).unwrap();

        assert_eq!(outcome, CopyOutcome::NothingToCopy);
        assert_eq!(clipboard.contents(), None);
        assert_eq!(notifier.messages(Severity::Info), vec![NO_FILES_MESSAGE]);
    }

    #[test]
    fn test_bad_project_config_still_copies_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "- a\n- b\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        let clipboard = MemoryClipboard::new();
        let notifier = RecordingNotifier::new();
        let ctx = CopyContext::new(dir.path(), Scanner::default(), &clipboard, &notifier).unwrap();

        ctx.copy_folders(&[dir.path().to_path_buf()]).unwrap();

        let text = clipboard.contents().unwrap();
        assert!(text.contains("// notes.txt\nhi"));
        assert_eq!(notifier.messages(Severity::Error).len(), 1);
        assert_eq!(
            notifier.messages(Severity::Info),
            vec!["Copied content of 2 files"]
        );
    }

    #[test]
    fn test_copy_tree_selection() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("src").join("logo.png"), [0u8, 1, 2]).unwrap();
        let clipboard = MemoryClipboard::new();
        let notifier = RecordingNotifier::new();
        let ctx = CopyContext::new(dir.path(), Scanner::default(), &clipboard, &notifier).unwrap();
        let modules = vec![Module::new("demo", vec![ctx.project_root().to_path_buf()])];
        let tree = ctx.build_tree(&modules).unwrap();

        let outcome = ctx.copy_tree_selection(&tree, "demo").unwrap();

        let CopyOutcome::Copied(result) = outcome else {
            panic!("expected a copy");
        };
        assert_eq!(result.copied, vec!["src/logo.png", "src/main.rs"]);
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("//FileName: src/logo.png\n[Media file content not included]\n\n//FileName: src/main.rs\nfn main() {}\n\n")
        );
        assert_eq!(
            notifier.messages(Severity::Info),
            vec!["Copied 2 files:\nsrc/logo.png\nsrc/main.rs"]
        );
    }

    #[test]
    fn test_copy_tree_selection_unknown_node() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let clipboard = MemoryClipboard::new();
        let notifier = RecordingNotifier::new();
        let ctx = CopyContext::new(dir.path(), Scanner::default(), &clipboard, &notifier).unwrap();
        let modules = vec![Module::new("demo", vec![ctx.project_root().to_path_buf()])];
        let tree = ctx.build_tree(&modules).unwrap();

        let err = ctx.copy_tree_selection(&tree, "nope").unwrap_err();

        assert!(matches!(err, CopierError::Selection(_)));
        assert_eq!(clipboard.contents(), None);
    }
}
