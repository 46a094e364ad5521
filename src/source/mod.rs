//! Source kind classification
//!
//! Tools come from one of four places: a code-hosting site, a model hub,
//! a package index, or somewhere custom. The kind decides which workspace
//! subdirectory a tool lands in and how it is acquired.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a tool's source lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    CodeHost,
    ModelHub,
    PackageIndex,
    Custom,
}

/// Host substrings recognized as code-hosting sites
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org", "codeberg.org"];

/// Host substrings recognized as model hubs
const MODEL_HUBS: &[&str] = &["huggingface.co", "hf.co"];

/// Host substrings recognized as package indexes
const PACKAGE_INDEXES: &[&str] = &["pypi.org", "pypi.python.org"];

impl SourceKind {
    /// Classify a URL by its host segment.
    ///
    /// Matching is substring-based and infallible: anything unrecognized is
    /// `Custom`. Priority when several rules match: code host, then model
    /// hub, then package index.
    pub fn classify(url: &str) -> SourceKind {
        let host = host_segment(url);

        if CODE_HOSTS.iter().any(|h| host.contains(h)) {
            SourceKind::CodeHost
        } else if MODEL_HUBS.iter().any(|h| host.contains(h)) {
            SourceKind::ModelHub
        } else if PACKAGE_INDEXES.iter().any(|h| host.contains(h)) {
            SourceKind::PackageIndex
        } else {
            SourceKind::Custom
        }
    }

    /// Workspace subdirectory name for installed tools of this kind.
    ///
    /// Package-index tools install into an interpreter environment, not a
    /// folder of their own.
    pub fn base_dir_name(&self) -> Option<&'static str> {
        match self {
            SourceKind::CodeHost => Some("code_host"),
            SourceKind::ModelHub => Some("model_hub"),
            SourceKind::Custom => Some("custom"),
            SourceKind::PackageIndex => None,
        }
    }

    /// Whether acquiring this kind means fetching a git checkout
    pub fn is_fetched(&self) -> bool {
        match self {
            SourceKind::CodeHost | SourceKind::ModelHub => true,
            SourceKind::PackageIndex | SourceKind::Custom => false,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceKind::CodeHost => "code_host",
            SourceKind::ModelHub => "model_hub",
            SourceKind::PackageIndex => "package_index",
            SourceKind::Custom => "custom",
        };
        write!(f, "{}", label)
    }
}

/// Extract the host segment of a URL-ish string.
///
/// Good enough for classification: strips the scheme and an optional
/// `user@` prefix, then takes everything up to the first `/` or `:`.
fn host_segment(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let rest = rest.split_once('@').map(|(_, rest)| rest).unwrap_or(rest);
    rest.split(['/', ':']).next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_github() {
        assert_eq!(
            SourceKind::classify("https://github.com/comfyanonymous/ComfyUI"),
            SourceKind::CodeHost
        );
    }

    #[test]
    fn test_classify_gitlab_and_codeberg() {
        assert_eq!(
            SourceKind::classify("https://gitlab.com/org/tool.git"),
            SourceKind::CodeHost
        );
        assert_eq!(
            SourceKind::classify("https://codeberg.org/org/tool"),
            SourceKind::CodeHost
        );
    }

    #[test]
    fn test_classify_huggingface() {
        assert_eq!(
            SourceKind::classify("https://huggingface.co/stabilityai/sdxl-vae"),
            SourceKind::ModelHub
        );
        assert_eq!(
            SourceKind::classify("https://hf.co/org/model"),
            SourceKind::ModelHub
        );
    }

    #[test]
    fn test_classify_pypi() {
        assert_eq!(
            SourceKind::classify("https://pypi.org/project/open-webui/"),
            SourceKind::PackageIndex
        );
    }

    #[test]
    fn test_classify_unknown_is_custom() {
        assert_eq!(
            SourceKind::classify("https://example.com/thing"),
            SourceKind::Custom
        );
        assert_eq!(SourceKind::classify(""), SourceKind::Custom);
        assert_eq!(SourceKind::classify("not a url at all"), SourceKind::Custom);
    }

    #[test]
    fn test_classify_ssh_url() {
        assert_eq!(
            SourceKind::classify("git@github.com:author/repo.git"),
            SourceKind::CodeHost
        );
    }

    #[test]
    fn test_classify_priority_code_host_wins() {
        // A code host match takes priority even if a later rule would also hit
        assert_eq!(
            SourceKind::classify("https://github.com/mirrors/huggingface.co-dump"),
            SourceKind::CodeHost
        );
    }

    #[test]
    fn test_classify_host_only_not_path() {
        // huggingface.co in the path must not make this a model hub
        assert_eq!(
            SourceKind::classify("https://example.com/huggingface.co/model"),
            SourceKind::Custom
        );
    }

    #[test]
    fn test_base_dir_names() {
        assert_eq!(SourceKind::CodeHost.base_dir_name(), Some("code_host"));
        assert_eq!(SourceKind::ModelHub.base_dir_name(), Some("model_hub"));
        assert_eq!(SourceKind::Custom.base_dir_name(), Some("custom"));
        assert_eq!(SourceKind::PackageIndex.base_dir_name(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let yaml = serde_yaml::to_string(&SourceKind::ModelHub).unwrap();
        assert_eq!(yaml.trim(), "model_hub");
        let back: SourceKind = serde_yaml::from_str("package_index").unwrap();
        assert_eq!(back, SourceKind::PackageIndex);
    }
}
