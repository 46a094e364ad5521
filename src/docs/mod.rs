//! Documentation scanning
//!
//! Plain text scanning of an installed tool's README and doc files: the
//! title, the first prose paragraph, and the install/usage flavored
//! sections. No markdown engine and no inference, just line scanning,
//! which is all the summary views need.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// README file names probed in order
const README_NAMES: &[&str] = &[
    "README.md",
    "README.txt",
    "README.rst",
    "readme.md",
    "Readme.md",
];

/// Headings counted as install instructions
const INSTALL_KEYWORDS: &[&str] = &["install", "setup", "requirements", "dependencies"];

/// Headings counted as usage instructions
const USAGE_KEYWORDS: &[&str] = &["usage", "quickstart", "quick start", "getting started", "running"];

/// Extracted documentation for one installed tool
#[derive(Debug, Clone, Default)]
pub struct DocsSummary {
    pub tool_name: String,
    pub readme_path: Option<PathBuf>,
    pub title: Option<String>,
    /// First prose paragraph of the README
    pub summary: Option<String>,
    /// Text of the first install-flavored section
    pub install_section: Option<String>,
    /// Text of the first usage-flavored section
    pub usage_section: Option<String>,
    /// Other documentation files near the README
    pub doc_files: Vec<PathBuf>,
}

/// Scan a tool folder for documentation. Missing or unreadable files just
/// leave the corresponding fields empty.
pub fn summarize(tool_name: &str, tool_dir: &Path) -> DocsSummary {
    let mut summary = DocsSummary {
        tool_name: tool_name.to_string(),
        ..DocsSummary::default()
    };

    if let Some(readme_path) = find_readme(tool_dir) {
        if let Ok(content) = fs::read_to_string(&readme_path) {
            summary.title = extract_title(&content);
            summary.summary = extract_first_paragraph(&content);
            summary.install_section = extract_section(&content, INSTALL_KEYWORDS);
            summary.usage_section = extract_section(&content, USAGE_KEYWORDS);
        }
        summary.readme_path = Some(readme_path);
    }

    summary.doc_files = find_doc_files(tool_dir);
    summary
}

/// First matching README in a tool folder
pub fn find_readme(tool_dir: &Path) -> Option<PathBuf> {
    README_NAMES
        .iter()
        .map(|name| tool_dir.join(name))
        .find(|path| path.is_file())
}

/// Documentation files near the README: top-level and docs/ markdown,
/// rst, and txt files, capped so a vendored doc tree cannot flood output.
fn find_doc_files(tool_dir: &Path) -> Vec<PathBuf> {
    const CAP: usize = 20;
    let mut files = Vec::new();

    for entry in WalkDir::new(tool_dir)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
    {
        if files.len() >= CAP {
            break;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_doc = path
            .extension()
            .is_some_and(|ext| ext == "md" || ext == "rst" || ext == "txt");
        let is_readme = path
            .file_name()
            .is_some_and(|n| README_NAMES.iter().any(|r| n == *r));
        let in_docs_dir = path
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|n| n == "docs" || n == "doc");
        let top_level = path.parent() == Some(tool_dir);

        if is_doc && !is_readme && (top_level || in_docs_dir) {
            files.push(path.to_path_buf());
        }
    }

    files
}

fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn heading_text(line: &str) -> &str {
    line.trim_start().trim_start_matches('#').trim()
}

/// First top-level heading
fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| is_heading(line))
        .map(|line| heading_text(line).to_string())
}

/// First run of prose lines: skips headings, badges, html, and fenced code.
fn extract_first_paragraph(content: &str) -> Option<String> {
    let mut in_fence = false;
    let mut paragraph: Vec<&str> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let is_prose = !trimmed.is_empty()
            && !is_heading(trimmed)
            && !trimmed.starts_with("[![")
            && !trimmed.starts_with("![")
            && !trimmed.starts_with('<')
            && !trimmed.starts_with("---")
            && !trimmed.starts_with('|');

        if is_prose {
            paragraph.push(trimmed);
        } else if !paragraph.is_empty() {
            break;
        }
    }

    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.join(" "))
    }
}

/// Text of the first section whose heading contains one of the keywords,
/// up to the next heading, capped at 30 lines.
fn extract_section(content: &str, keywords: &[&str]) -> Option<String> {
    const CAP: usize = 30;
    let lines: Vec<&str> = content.lines().collect();

    let start = lines.iter().position(|line| {
        is_heading(line) && {
            let lowered = heading_text(line).to_lowercase();
            keywords.iter().any(|k| lowered.contains(k))
        }
    })?;

    let mut body: Vec<&str> = Vec::new();
    for line in lines.iter().skip(start + 1) {
        if is_heading(line) {
            break;
        }
        if body.len() >= CAP {
            break;
        }
        body.push(line);
    }

    while body.first().is_some_and(|l| l.trim().is_empty()) {
        body.remove(0);
    }
    while body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }

    if body.is_empty() {
        None
    } else {
        Some(body.join("\n"))
    }
}
