/*!
 * Tool-window tree view of a project
 *
 * The tree has one node per module. Each module lists a "Media Files"
 * bucket first, gathering every image, video and audio file found under
 * its source roots, followed by the source roots themselves with media
 * files removed. Directories left without children are pruned.
 */

use std::io;
use std::path::{Path, PathBuf};

use crate::scanner::Scanner;
use crate::types::{file_name, DirectoryLike, DirectoryNode, FileNode};

/// Label of the tree root
pub const PROJECT_LABEL: &str = "Project";

/// Label of a module's media bucket
pub const MEDIA_BUCKET_LABEL: &str = "Media Files";

/// A named group of source roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub source_roots: Vec<PathBuf>,
}

impl Module {
    pub fn new(name: impl Into<String>, source_roots: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_roots,
        }
    }
}

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Project,
    Module,
    MediaBucket,
    Directory(PathBuf),
    File(FileNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            children: Vec::new(),
        }
    }

    fn file(file: &FileNode) -> Self {
        Self::new(file.name.clone(), NodeKind::File(file.clone()))
    }

    /// Filesystem path for directory and file nodes
    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            NodeKind::Directory(path) => Some(path.as_path()),
            NodeKind::File(file) => Some(file.path.as_path()),
            _ => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }
}

/// A selected file node yields itself, so copying a single file works the
/// same way as copying a folder
impl DirectoryLike for TreeNode {
    fn files(&self) -> Vec<&FileNode> {
        if let NodeKind::File(file) = &self.kind {
            return vec![file];
        }
        self.children
            .iter()
            .filter_map(|child| match &child.kind {
                NodeKind::File(file) => Some(file),
                _ => None,
            })
            .collect()
    }

    fn subdirectories(&self) -> Vec<&Self> {
        self.children.iter().filter(|child| !child.is_file()).collect()
    }
}

/// The whole tree view for a project
#[derive(Debug, Clone)]
pub struct ProjectTree {
    pub project_root: PathBuf,
    pub root: TreeNode,
}

impl ProjectTree {
    /// Build the tree by scanning every source root of every module
    pub fn build(project_root: &Path, modules: &[Module], scanner: &Scanner) -> io::Result<Self> {
        let mut root = TreeNode::new(PROJECT_LABEL, NodeKind::Project);

        for module in modules {
            let mut module_node = TreeNode::new(module.name.clone(), NodeKind::Module);
            let mut media = TreeNode::new(MEDIA_BUCKET_LABEL, NodeKind::MediaBucket);
            let mut roots = Vec::new();

            for source_root in &module.source_roots {
                let dir = scanner.scan(source_root)?;
                if let Some(node) = add_directory(&dir, &mut media) {
                    roots.push(node);
                }
            }

            if !media.children.is_empty() {
                module_node.children.push(media);
            }
            module_node.children.extend(roots);
            log::debug!(
                "module {} has {} top-level nodes",
                module.name,
                module_node.children.len()
            );
            root.children.push(module_node);
        }

        Ok(Self {
            project_root: project_root.to_path_buf(),
            root,
        })
    }

    /// Find the first node, depth-first, whose project-relative path or label
    /// equals `query`. An empty query selects the root.
    pub fn select(&self, query: &str) -> Option<&TreeNode> {
        let query = query.trim_end_matches('/');
        if query.is_empty() {
            return Some(&self.root);
        }
        self.find(&self.root, query)
    }

    fn find<'a>(&'a self, node: &'a TreeNode, query: &str) -> Option<&'a TreeNode> {
        if node.label == query || self.relative_path(node).as_deref() == Some(query) {
            return Some(node);
        }
        node.children
            .iter()
            .find_map(|child| self.find(child, query))
    }

    fn relative_path(&self, node: &TreeNode) -> Option<String> {
        let rest = node.path()?.strip_prefix(&self.project_root).ok()?;
        Some(rest.to_string_lossy().to_string())
    }

    /// Draw the tree as indented text, one node per line
    pub fn render(&self) -> String {
        let mut output = String::new();
        render_node(&self.root, 0, &mut output);
        output.trim_end().to_string()
    }
}

fn render_node(node: &TreeNode, depth: usize, output: &mut String) {
    let indent = "    ".repeat(depth);
    let marker = match node.kind {
        NodeKind::Directory(_) => "/",
        _ => "",
    };
    output.push_str(&format!("{}{}{}\n", indent, node.label, marker));
    for child in &node.children {
        render_node(child, depth + 1, output);
    }
}

/// Convert a scanned directory into a tree node, moving media files into
/// `media`. Returns `None` when nothing is left in the directory.
fn add_directory(dir: &DirectoryNode, media: &mut TreeNode) -> Option<TreeNode> {
    log::debug!("adding files from directory {}", dir.name);
    let mut node = TreeNode::new(file_name(&dir.path), NodeKind::Directory(dir.path.clone()));

    for file in &dir.files {
        if file.is_media() {
            media.children.push(TreeNode::file(file));
        } else {
            node.children.push(TreeNode::file(file));
        }
    }

    for sub in &dir.subdirectories {
        if let Some(child) = add_directory(sub, media) {
            node.children.push(child);
        }
    }

    if node.children.is_empty() {
        None
    } else {
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// project/
    ///   src/main.rs
    ///   src/icon.png
    ///   assets/intro.mp3
    ///   empty/
    fn fixture() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("src").join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("src").join("icon.png"), "png").unwrap();
        fs::write(root.join("assets").join("intro.mp3"), "mp3").unwrap();
        (dir, root)
    }

    fn build(root: &Path) -> ProjectTree {
        let modules = vec![Module::new("demo", vec![root.to_path_buf()])];
        ProjectTree::build(root, &modules, &Scanner::default()).unwrap()
    }

    #[test]
    fn test_media_bucket_and_pruning() {
        let (_dir, root) = fixture();
        let tree = build(&root);

        let module = &tree.root.children[0];
        assert_eq!(module.label, "demo");
        assert_eq!(module.children[0].label, MEDIA_BUCKET_LABEL);

        let media: Vec<_> = module.children[0]
            .children
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        // assets/ is scanned before src/
        assert_eq!(media, vec!["intro.mp3", "icon.png"]);

        // assets/ and empty/ held no text files and are gone
        let source_root = &module.children[1];
        let children: Vec<_> = source_root
            .children
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(children, vec!["src"]);
    }

    #[test]
    fn test_no_media_bucket_without_media() {
        let dir = tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::write(root.join("notes.txt"), "n").unwrap();

        let tree = build(&root);

        let module = &tree.root.children[0];
        assert_eq!(module.children.len(), 1);
        assert!(matches!(module.children[0].kind, NodeKind::Directory(_)));
    }

    #[test]
    fn test_select() {
        let (_dir, root) = fixture();
        let tree = build(&root);

        assert_eq!(tree.select("").map(|n| n.label.as_str()), Some(PROJECT_LABEL));
        assert_eq!(tree.select("src/").map(|n| n.label.as_str()), Some("src"));
        assert_eq!(
            tree.select("src/main.rs").map(|n| n.label.as_str()),
            Some("main.rs")
        );
        assert_eq!(
            tree.select(MEDIA_BUCKET_LABEL).map(|n| &n.kind),
            Some(&NodeKind::MediaBucket)
        );
        assert!(tree.select("missing").is_none());
    }

    #[test]
    fn test_directory_like_view() {
        let (_dir, root) = fixture();
        let tree = build(&root);

        let module = &tree.root.children[0];
        assert!(module.files().is_empty());
        assert_eq!(module.subdirectories().len(), 2);

        let main = tree.select("src/main.rs").unwrap();
        assert_eq!(main.files().len(), 1);
        assert!(main.subdirectories().is_empty());
    }

    #[test]
    fn test_render() {
        let (_dir, root) = fixture();
        let tree = build(&root);
        let root_name = file_name(&root);

        let expected = format!(
            "Project\n    demo\n        Media Files\n            intro.mp3\n            icon.png\n        {}/\n            src/\n                main.rs",
            root_name
        );
        assert_eq!(tree.render(), expected);
    }
}
