/*!
 * ccopier - Copy the text content of project folders to the clipboard
 *
 * This library walks selected folders, formats every file with a header
 * line and configurable separators, and produces one document ready to be
 * pasted into a chat prompt.
 */

pub mod actions;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod notify;
pub mod options;
pub mod report;
pub mod scanner;
pub mod serializer;
pub mod tree;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use actions::{CopyContext, CopyOutcome};
pub use clipboard::{ClipboardSink, MemoryClipboard, StdoutSink, SystemClipboard};
pub use config::{Args, Config, Mode};
pub use error::{CopierError, Result};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier, Severity};
pub use options::{resolve, CopyOptions};
pub use report::{CopyReport, Reporter};
pub use scanner::Scanner;
pub use serializer::{FormatPolicy, Serialization, Serializer};
pub use tree::{Module, ProjectTree, TreeNode};
pub use types::{DirectoryLike, DirectoryNode, FileNode, FileType};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
