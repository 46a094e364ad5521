//! Manifest document storage
//!
//! Manifests are YAML (default) or JSON documents. Loading is tolerant at
//! the entry level: a malformed tool entry is skipped with a warning and the
//! rest of the document still loads. Duplicate names are resolved
//! deterministically, last one in file order wins. Saving is atomic
//! (temp file + rename) so a reader never observes a half-written manifest.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, ToolshedError};
use crate::manifest::{Manifest, RawToolEntry};

/// A manifest document before entry validation
#[derive(Debug, Default, Deserialize)]
struct RawManifestDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tools: Vec<serde_yaml::Value>,
    #[serde(default)]
    profiles: BTreeMap<String, Vec<String>>,
}

/// Summary of one stored manifest, for listings
#[derive(Debug, Clone)]
pub struct ManifestSummary {
    pub name: String,
    pub path: PathBuf,
    pub tool_count: usize,
}

/// Load a manifest document from a path.
///
/// The format is chosen by file extension: `.json` parses as JSON,
/// everything else as YAML. Malformed entries are skipped, not fatal.
pub fn load(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(ToolshedError::ManifestNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ToolshedError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let doc: RawManifestDoc = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| parse_error(path, e.to_string()))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| parse_error(path, e.to_string()))?
    };

    let mut manifest = Manifest::new(doc.name.unwrap_or_else(|| file_stem(path)));
    manifest.profiles = doc.profiles;

    for (index, value) in doc.tools.into_iter().enumerate() {
        let entry: RawToolEntry = match serde_yaml::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(manifest = %path.display(), index, "skipping unreadable entry: {}", e);
                continue;
            }
        };
        match entry.validate() {
            Ok(tool) => manifest.upsert(tool),
            Err(e) => {
                warn!(manifest = %path.display(), index, "skipping invalid entry: {}", e);
            }
        }
    }

    Ok(manifest)
}

/// Load a manifest, falling back to an empty one named after the file stem
/// when the document does not exist yet.
pub fn load_or_default(path: &Path) -> Result<Manifest> {
    if path.exists() {
        load(path)
    } else {
        Ok(Manifest::new(file_stem(path)))
    }
}

/// Save a manifest document atomically.
pub fn save(manifest: &Manifest, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(manifest).map_err(|e| write_error(path, e.to_string()))?
    } else {
        serde_yaml::to_string(manifest).map_err(|e| write_error(path, e.to_string()))?
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| write_error(path, e.to_string()))?;

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(path, e.to_string()))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| write_error(path, e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| write_error(path, e.to_string()))?;

    Ok(())
}

/// List the manifest documents in a directory.
///
/// Unreadable documents are skipped with a warning, matching entry-level
/// tolerance on load.
pub fn list(dir: &Path) -> Result<Vec<ManifestSummary>> {
    let mut summaries = Vec::new();

    if !dir.is_dir() {
        return Ok(summaries);
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ToolshedError::FileReadFailed {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_manifest_file(p))
        .collect();
    paths.sort();

    for path in paths {
        match load(&path) {
            Ok(manifest) => summaries.push(ManifestSummary {
                name: manifest.name,
                tool_count: manifest.tools.len(),
                path,
            }),
            Err(e) => warn!(manifest = %path.display(), "skipping unreadable manifest: {}", e),
        }
    }

    Ok(summaries)
}

/// Import a manifest document into a manifests directory.
///
/// The document is loaded first so an invalid file is rejected before it
/// lands next to the good ones. Returns the destination path.
pub fn import(src: &Path, manifests_dir: &Path) -> Result<PathBuf> {
    let manifest = load(src)?;

    let file_name = src
        .file_name()
        .ok_or_else(|| ToolshedError::ManifestNotFound {
            path: src.display().to_string(),
        })?;
    let dest = manifests_dir.join(file_name);
    save(&manifest, &dest)?;

    Ok(dest)
}

/// Export a stored manifest to a destination path
pub fn export(manifest_path: &Path, dest: &Path) -> Result<()> {
    let manifest = load(manifest_path)?;
    save(&manifest, dest)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json")
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest".to_string())
}

fn parse_error(path: &Path, reason: String) -> ToolshedError {
    ToolshedError::ManifestParseFailed {
        path: path.display().to_string(),
        reason,
    }
}

fn write_error(path: &Path, reason: String) -> ToolshedError {
    ToolshedError::ManifestWriteFailed {
        path: path.display().to_string(),
        reason,
    }
}
