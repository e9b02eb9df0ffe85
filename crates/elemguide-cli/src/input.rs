//! Input discovery and loading.
//!
//! Finds element records and Custom Elements Manifests under a path, reads
//! them, and extracts descriptors. Per-file and per-definition problems are
//! collected as malformed definitions so one bad file does not stop a run.

use anyhow::{Context, Result};
use elemguide_lint::{
    extract, parse_source, reject_duplicate_tags, ComponentDescriptor, ExtractError, LintConfig, SourceKind,
    CONFIG_FILE_NAME,
};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never scanned.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target"];

/// Descriptors and extraction failures gathered from a path.
#[derive(Debug, Default)]
pub struct LoadedDefinitions {
    /// Files that were read, in scan order.
    pub files: Vec<PathBuf>,
    pub descriptors: Vec<ComponentDescriptor>,
    pub malformed: Vec<ExtractError>,
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Lists definition source files under `path`, sorted for deterministic
/// output. A file path is returned as-is when its kind is recognized.
pub fn discover(path: &Path) -> Result<Vec<(PathBuf, SourceKind)>> {
    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }

    if path.is_file() {
        let kind = SourceKind::from_path(path).with_context(|| {
            format!(
                "Not an element record or custom-elements.json manifest: {}",
                path.display()
            )
        })?;
        return Ok(vec![(path.to_path_buf(), kind)]);
    }

    let mut files: Vec<(PathBuf, SourceKind)> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            SourceKind::from_path(entry.path()).map(|kind| (entry.path().to_path_buf(), kind))
        })
        .collect();

    files.sort();
    tracing::debug!(root = %path.display(), files = files.len(), "discovered definition sources");
    Ok(files)
}

/// Reads every source under `path` and extracts descriptors.
pub fn load(path: &Path) -> Result<LoadedDefinitions> {
    let mut loaded = LoadedDefinitions::default();

    for (file, kind) in discover(path)? {
        let origin = file.display().to_string();
        let parsed = std::fs::read_to_string(&file)
            .map_err(|err| err.to_string())
            .and_then(|text| {
                parse_source(&text, kind, Some(origin.as_str())).map_err(|err| err.to_string())
            });

        match parsed {
            Ok(raws) => {
                tracing::debug!(file = %origin, %kind, definitions = raws.len(), "parsed source");
                for raw in &raws {
                    match extract(raw) {
                        Ok(descriptor) => loaded.descriptors.push(descriptor),
                        Err(err) => {
                            tracing::debug!(error = %err, "malformed definition");
                            loaded.malformed.push(err);
                        }
                    }
                }
            }
            Err(reason) => {
                tracing::warn!(file = %origin, %reason, "could not read definition source");
                loaded.malformed.push(
                    ExtractError::malformed(file_label(&file), format!("cannot read {}: {}", kind, reason))
                        .with_origin(Some(origin.clone())),
                );
            }
        }
        loaded.files.push(file);
    }

    let (descriptors, duplicates) = reject_duplicate_tags(std::mem::take(&mut loaded.descriptors));
    loaded.descriptors = descriptors;
    loaded.malformed.extend(duplicates);

    Ok(loaded)
}

fn file_label(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

/// Loads the lint configuration.
///
/// An explicit path must exist. Otherwise `elemguide.json` in the scanned
/// directory is used when present, and defaults apply when it is not.
pub fn load_config(explicit: Option<&Path>, scan_root: &Path) -> Result<LintConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let dir = if scan_root.is_dir() {
                Some(scan_root)
            } else {
                scan_root.parent()
            };
            dir.map(|dir| dir.join(CONFIG_FILE_NAME))
                .filter(|path| path.is_file())
        }
    };

    let Some(path) = candidate else {
        return Ok(LintConfig::default());
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = LintConfig::from_json(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    tracing::debug!(config = %path.display(), "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_discover_finds_known_sources_sorted() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b/button.element.json", "{}");
        write(tmp.path(), "a/custom-elements.json", "{}");
        write(tmp.path(), "a/menu.element.yaml", "{}");
        write(tmp.path(), "a/readme.md", "# hi");
        write(tmp.path(), "node_modules/dep/custom-elements.json", "{}");

        let files = discover(tmp.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|(path, _)| {
                path.strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "a/custom-elements.json",
                "a/menu.element.yaml",
                "b/button.element.json"
            ]
        );
    }

    #[test]
    fn test_discover_missing_path() {
        assert!(discover(Path::new("/definitely/not/here")).is_err());
    }

    #[test]
    fn test_discover_rejects_unknown_file() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "notes.txt", "");
        assert!(discover(&file).is_err());
    }

    #[test]
    fn test_load_collects_malformed_and_continues() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "ok.element.json",
            r#"[{"tagName": "org-ok"}, {"tagName": "broken"}]"#,
        );
        write(tmp.path(), "bad.element.json", "{ not json");

        let loaded = load(tmp.path()).unwrap();
        assert_eq!(loaded.files.len(), 2);
        assert_eq!(loaded.descriptors.len(), 1);
        assert_eq!(loaded.descriptors[0].tag_name, "org-ok");
        assert_eq!(loaded.malformed.len(), 2);
        assert!(loaded
            .malformed
            .iter()
            .any(|err| err.tag() == "bad.element.json"));
        assert!(loaded.malformed.iter().any(|err| err.tag() == "broken"));
    }

    #[test]
    fn test_load_rejects_tag_defined_twice() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "a.element.json",
            r#"[{"tagName": "org-a"}, {"tagName": "org-a", "slots": ["x", ""]}]"#,
        );

        let loaded = load(tmp.path()).unwrap();
        assert_eq!(loaded.descriptors.len(), 1);
        assert!(loaded.descriptors[0].slots.is_empty());
        assert_eq!(loaded.malformed.len(), 1);
        assert_eq!(loaded.malformed[0].tag(), "org-a");
        assert!(loaded.malformed[0].reason().starts_with("tag is already defined in"));
    }

    #[test]
    fn test_load_config_from_scan_root() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            load_config(None, tmp.path()).unwrap(),
            LintConfig::default()
        );

        write(tmp.path(), CONFIG_FILE_NAME, r#"{"prefix": "acme"}"#);
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("acme"));
    }

    #[test]
    fn test_load_config_explicit_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(Some(&tmp.path().join("missing.json")), tmp.path()).is_err());

        let bad = write(tmp.path(), "bad.json", r#"{"unknown": true}"#);
        assert!(load_config(Some(&bad), tmp.path()).is_err());
    }
}
