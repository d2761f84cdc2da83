/*!
 * Copy options: built-in defaults overlaid with the project's `cCopier.yaml`
 */

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::notify::Notifier;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "cCopier.yaml";

const DEFAULT_CONFIG: &str = include_str!("../resources/default-config.yaml");

/// Embedded defaults, parsed once. A malformed resource collapses to an
/// empty mapping so the hard-coded defaults below take over.
static DEFAULT_MAPPING: Lazy<Mapping> = Lazy::new(|| parse_default_mapping(DEFAULT_CONFIG));

fn parse_default_mapping(source: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(source) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(other) => {
            log::debug!("embedded default config is not a mapping: {:?}", other);
            Mapping::new()
        }
        Err(e) => {
            log::debug!("embedded default config is malformed: {}", e);
            Mapping::new()
        }
    }
}

/// Formatting options for the folder copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Comment line emitted once before any file content
    pub top_instruction: String,
    /// Prefix of every generated comment line
    pub comment_prefix: String,
    /// Comment line emitted before each file's content
    pub to_file_instructions: String,
    /// Extra token in each file's header line
    pub file_prefix: String,
    /// Appended after each file's content
    pub file_separator: String,
    /// Project-relative header paths instead of absolute ones
    pub use_relative_paths: bool,
    /// Keep the separator after the last file
    pub include_last_separator: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            top_instruction: String::new(),
            comment_prefix: "//".to_string(),
            to_file_instructions: String::new(),
            file_prefix: String::new(),
            file_separator: "\n\n".to_string(),
            use_relative_paths: true,
            include_last_separator: false,
        }
    }
}

impl CopyOptions {
    /// Build typed options from a raw mapping. Unknown keys are ignored and
    /// values of the wrong type fall back to the default.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let defaults = Self::default();
        Self {
            top_instruction: string_or(mapping, "top_instruction", defaults.top_instruction),
            comment_prefix: string_or(mapping, "comment_prefix", defaults.comment_prefix),
            to_file_instructions: string_or(
                mapping,
                "to_file_instructions",
                defaults.to_file_instructions,
            ),
            file_prefix: string_or(mapping, "file_prefix", defaults.file_prefix),
            file_separator: string_or(mapping, "file_separator", defaults.file_separator),
            use_relative_paths: bool_or(
                mapping,
                "use_relative_paths",
                defaults.use_relative_paths,
            ),
            include_last_separator: bool_or(
                mapping,
                "include_last_separator",
                defaults.include_last_separator,
            ),
        }
    }
}

fn string_or(mapping: &Mapping, key: &str, default: String) -> String {
    match mapping.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default,
    }
}

fn bool_or(mapping: &Mapping, key: &str, default: bool) -> bool {
    match mapping.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

/// Resolve the typed copy options for a project.
///
/// Never fails: problems with `cCopier.yaml` are reported through
/// `notifier` and the defaults are used instead.
pub fn resolve(project_root: Option<&Path>, notifier: &dyn Notifier) -> CopyOptions {
    CopyOptions::from_mapping(&resolve_mapping(project_root, notifier))
}

/// Resolve the merged raw mapping: defaults with the project file's keys on top
pub fn resolve_mapping(project_root: Option<&Path>, notifier: &dyn Notifier) -> Mapping {
    let mut merged = DEFAULT_MAPPING.clone();

    let Some(root) = project_root else {
        return merged;
    };

    let config_path = root.join(PROJECT_CONFIG_FILE);
    if !config_path.exists() {
        log::debug!("no {} under {}", PROJECT_CONFIG_FILE, root.display());
        return merged;
    }

    match load_project_mapping(&config_path) {
        Ok(project) => {
            log::debug!(
                "merging {} keys from {}",
                project.len(),
                config_path.display()
            );
            for (key, value) in project {
                merged.insert(key, value);
            }
        }
        Err(e) => {
            notifier.error(&format!("Error reading {}: {}", PROJECT_CONFIG_FILE, e));
        }
    }

    merged
}

/// Read and parse a project configuration file, which must hold a mapping
fn load_project_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => crate::bail!(Config, "Invalid YAML format in {}", PROJECT_CONFIG_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{RecordingNotifier, Severity};
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        fs::write(dir.join(PROJECT_CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_embedded_defaults_match_hard_coded_defaults() {
        assert_eq!(
            CopyOptions::from_mapping(&DEFAULT_MAPPING),
            CopyOptions::default()
        );
    }

    #[test]
    fn test_malformed_default_resource_collapses_to_empty() {
        assert!(parse_default_mapping("- just\n- a list\n").is_empty());
        assert!(parse_default_mapping("key: [unclosed").is_empty());
        assert_eq!(
            CopyOptions::from_mapping(&parse_default_mapping("")),
            CopyOptions::default()
        );
    }

    #[test]
    fn test_resolve_without_project_file() {
        let dir = tempdir().unwrap();
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(options, CopyOptions::default());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_resolve_without_project_root() {
        let notifier = RecordingNotifier::new();
        assert_eq!(resolve(None, &notifier), CopyOptions::default());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_project_file_overrides_single_key() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "comment_prefix: \"#\"\n");
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(
            options,
            CopyOptions {
                comment_prefix: "#".to_string(),
                ..CopyOptions::default()
            }
        );
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_project_file_with_list_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "- comment_prefix\n- \"#\"\n");
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(options, CopyOptions::default());
        assert_eq!(
            notifier.messages(Severity::Error),
            vec!["Error reading cCopier.yaml: Invalid YAML format in cCopier.yaml"]
        );
    }

    #[test]
    fn test_unparseable_project_file_reports_cause() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "comment_prefix: [\"#\"\nfile_prefix: x\n");
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(options, CopyOptions::default());
        let errors = notifier.messages(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error reading cCopier.yaml: YAML error:"));
    }

    #[test]
    fn test_empty_project_file_is_not_a_mapping() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "");
        let notifier = RecordingNotifier::new();

        assert_eq!(resolve(Some(dir.path()), &notifier), CopyOptions::default());
        assert_eq!(notifier.messages(Severity::Error).len(), 1);
    }

    #[test]
    fn test_wrong_types_and_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            "comment_prefix: 42\nuse_relative_paths: \"no\"\nfile_prefix: File:\nmystery: true\n",
        );
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(
            options,
            CopyOptions {
                file_prefix: "File:".to_string(),
                ..CopyOptions::default()
            }
        );
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_full_override() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r##"
top_instruction: "Review these files"
comment_prefix: "#"
to_file_instructions: "Summarize"
file_prefix: "FILE"
file_separator: "\n---\n"
use_relative_paths: false
include_last_separator: true
"##,
        );
        let notifier = RecordingNotifier::new();

        let options = resolve(Some(dir.path()), &notifier);

        assert_eq!(
            options,
            CopyOptions {
                top_instruction: "Review these files".to_string(),
                comment_prefix: "#".to_string(),
                to_file_instructions: "Summarize".to_string(),
                file_prefix: "FILE".to_string(),
                file_separator: "\n---\n".to_string(),
                use_relative_paths: false,
                include_last_separator: true,
            }
        );
    }

    #[test]
    fn test_merged_mapping_keeps_unknown_keys() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "extra: 1\n");
        let notifier = RecordingNotifier::new();

        let mapping = resolve_mapping(Some(dir.path()), &notifier);

        assert_eq!(mapping.get("extra").and_then(Value::as_u64), Some(1));
        assert_eq!(
            mapping.get("comment_prefix").and_then(Value::as_str),
            Some("//")
        );
    }
}
