//! tokenc - Design-token resolver
//!
//! A library for resolving nested design-token declarations (colours,
//! radii, spacing, keyframes, animations) into a flat, immutable token
//! table and compiled animation timelines.

pub mod cli;
pub mod emit;
pub mod error;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;

pub use emit::{to_css, to_json, OutputFormat};
pub use error::{Result, TokenError};
pub use manifest::{Manifest, Project, MANIFEST_FILENAME};
pub use parser::{parse_declarations, parse_properties};
pub use resolver::{load, NamespacePolicy, ResolveOptions, ResolvedTheme, TokenResolver};
pub use types::{
    AliasTemplate, AnimationBinding, ColorFormat, CompiledAnimation, CustomPropertyTable,
    DeclarationTree, KeyframeDefinition, PhaseOffset, PropertySource, ResolvedTokenTable,
    TokenGroup, TokenValue,
};
pub use validation::{validate_theme, Diagnostic, Severity, ValidationResult};
