//! Project manifest (`tokenc.yaml`).
//!
//! The manifest names the input files and the default resolve options.
//! Relative paths are taken from the directory holding the manifest.
//! Every field is optional, and command-line flags override them.
//!
//! ```yaml
//! theme: tokens/theme.yaml
//! properties: tokens/properties.yaml
//! mode: dark
//! format: css
//! color-format: hex
//! namespaces:
//!   policy: overlay
//!   namespace: brillu
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emit::OutputFormat;
use crate::error::{Result, TokenError};
use crate::parser::{parse_declarations, parse_properties};
use crate::resolver::{NamespacePolicy, ResolveOptions};
use crate::types::{ColorFormat, CustomPropertyTable, DeclarationTree};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "tokenc.yaml";

/// Project configuration loaded from `tokenc.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// Theme declaration file.
    pub theme: PathBuf,

    /// Custom-property file. Without one, every alias needs a fallback.
    pub properties: Option<PathBuf>,

    /// Property mode to resolve through, e.g. "dark".
    pub mode: Option<String>,

    /// Where `resolve` writes; stdout when unset.
    pub output: Option<PathBuf>,

    pub format: OutputFormat,

    pub color_format: ColorFormat,

    pub namespaces: NamespacePolicy,
}

fn default_theme() -> PathBuf {
    PathBuf::from("theme.yaml")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            properties: None,
            mode: None,
            output: None,
            format: OutputFormat::default(),
            color_format: ColorFormat::default(),
            namespaces: NamespacePolicy::default(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_file(path, "manifest")?;
        Self::parse(&content)
    }

    /// Parse a manifest from YAML. An empty document gives the defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| TokenError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Resolve options carried by the manifest.
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            namespaces: self.namespaces.clone(),
            color_format: self.color_format,
        }
    }

    /// Serialize back to YAML, as written by `tokenc init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| TokenError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }
}

/// A manifest together with the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: Manifest,
    /// Whether a manifest file was found.
    pub has_manifest: bool,
}

impl Project {
    /// Open the project at `config`, or look for `tokenc.yaml` in the
    /// working directory. A missing default manifest is not an error.
    pub fn open(config: Option<&Path>) -> Result<Self> {
        match config {
            Some(path) => Ok(Self {
                root: parent_dir(path),
                manifest: Manifest::load(path)?,
                has_manifest: true,
            }),
            None => {
                let path = Path::new(MANIFEST_FILENAME);
                if path.is_file() {
                    Ok(Self {
                        root: PathBuf::from("."),
                        manifest: Manifest::load(path)?,
                        has_manifest: true,
                    })
                } else {
                    Ok(Self {
                        root: PathBuf::from("."),
                        manifest: Manifest::default(),
                        has_manifest: false,
                    })
                }
            }
        }
    }

    /// A manifest path made absolute against the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn theme_path(&self) -> PathBuf {
        self.resolve_path(&self.manifest.theme)
    }

    pub fn properties_path(&self) -> Option<PathBuf> {
        self.manifest
            .properties
            .as_deref()
            .map(|p| self.resolve_path(p))
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.manifest.output.as_deref().map(|p| self.resolve_path(p))
    }
}

/// Read and parse a theme declaration file.
pub fn load_declarations(path: &Path) -> Result<DeclarationTree> {
    let source = read_file(path, "theme")?;
    parse_declarations(&source)
}

/// Read and parse a custom-property file.
pub fn load_properties(path: &Path) -> Result<CustomPropertyTable> {
    let source = read_file(path, "property file")?;
    parse_properties(&source)
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TokenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read {}: {}", what, e),
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
