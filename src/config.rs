/*!
 * Command-line configuration for ccopier
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::tree::Module;

/// Command-line arguments for ccopier
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ccopier",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy the text content of project folders to the clipboard",
    long_about = "Concatenates every file under the selected folders into one document, with a header line per file and separators taken from the project's cCopier.yaml, and puts it on the system clipboard."
)]
pub struct Args {
    /// Folders to copy, in order
    #[clap(default_value = ".")]
    pub folders: Vec<String>,

    /// Project root used for relative paths and for locating cCopier.yaml
    #[clap(long)]
    pub project_root: Option<String>,

    /// Print the copied text to stdout instead of the clipboard
    #[clap(long)]
    pub stdout: bool,

    /// Show the project tree with media files bucketed per module
    #[clap(long)]
    pub tree: bool,

    /// Copy a node of the project tree (path relative to the project root, or a node label)
    #[clap(long, value_name = "NODE")]
    pub select: Option<String>,

    /// Module for the project tree, as NAME=DIR[,DIR...]; may be repeated
    #[clap(long = "module", value_name = "NAME=DIRS")]
    pub modules: Vec<String>,

    /// Include VCS metadata and OS junk files that are skipped by default
    #[clap(long)]
    pub no_default_ignore: bool,

    /// Print a table of the copied files
    #[clap(long)]
    pub report: bool,

    /// Enable diagnostic logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// What the invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Copy the listed folders with the configurable format
    CopyFolders,
    /// Print the project tree
    ShowTree,
    /// Copy one node of the project tree with the fixed format
    CopySelection(String),
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Folders to copy
    pub folders: Vec<PathBuf>,

    /// Project root
    pub project_root: PathBuf,

    /// Modules of the project tree
    pub modules: Vec<Module>,

    /// Selected operation
    pub mode: Mode,

    /// Write to stdout instead of the clipboard
    pub stdout: bool,

    /// Skip VCS metadata and OS junk entries
    pub use_default_ignore: bool,

    /// Print a report after copying
    pub report: bool,

    /// Diagnostic logging
    pub verbose: bool,

    /// Suppress informational notices
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let project_root = PathBuf::from(args.project_root.unwrap_or_else(|| ".".to_string()));

        let modules = if args.modules.is_empty() {
            vec![default_module(&project_root)]
        } else {
            args.modules
                .iter()
                .map(|value| parse_module(value))
                .collect::<Result<Vec<_>>>()?
        };

        let mode = match args.select {
            Some(node) => Mode::CopySelection(node),
            None if args.tree => Mode::ShowTree,
            None => Mode::CopyFolders,
        };

        Ok(Self {
            folders: args.folders.into_iter().map(PathBuf::from).collect(),
            project_root,
            modules,
            mode,
            stdout: args.stdout,
            use_default_ignore: !args.no_default_ignore,
            report: args.report,
            verbose: args.verbose,
            quiet: args.quiet,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.project_root.is_dir(),
            PathNotFound,
            "Project root not found: {}",
            self.project_root.display()
        );

        if self.mode == Mode::CopyFolders {
            crate::ensure!(
                !self.folders.is_empty(),
                InvalidArgument,
                "No folders selected"
            );
            for folder in &self.folders {
                crate::ensure!(
                    folder.is_dir(),
                    PathNotFound,
                    "Folder not found: {}",
                    folder.display()
                );
            }
        } else {
            for module in &self.modules {
                for root in &module.source_roots {
                    crate::ensure!(
                        root.is_dir(),
                        PathNotFound,
                        "Source root of module {} not found: {}",
                        module.name,
                        root.display()
                    );
                }
            }
        }

        Ok(())
    }
}

/// One module named after the project directory, rooted at the project root
fn default_module(project_root: &Path) -> Module {
    let name = project_root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "project".to_string());
    Module::new(name, vec![project_root.to_path_buf()])
}

/// Parse `NAME=DIR[,DIR...]`
fn parse_module(value: &str) -> Result<Module> {
    let Some((name, dirs)) = value.split_once('=') else {
        crate::bail!(InvalidArgument, "Module must look like NAME=DIR[,DIR...]: {}", value);
    };
    let name = name.trim();
    crate::ensure!(!name.is_empty(), InvalidArgument, "Module name is empty: {}", value);

    let source_roots: Vec<PathBuf> = dirs
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .collect();
    crate::ensure!(
        !source_roots.is_empty(),
        InvalidArgument,
        "Module {} has no source roots",
        name
    );

    Ok(Module::new(name, source_roots))
}
