//! JSON output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, TokenError};
use crate::resolver::ResolvedTheme;
use crate::types::{CompiledAnimation, ResolvedTokenTable};

#[derive(Serialize)]
struct ThemeDocument<'a> {
    fingerprint: String,
    tokens: &'a ResolvedTokenTable,
    animations: &'a BTreeMap<String, CompiledAnimation>,
    plugins: &'a [String],
}

/// Pretty-printed JSON with a fingerprint of the token table.
pub fn to_json(theme: &ResolvedTheme) -> Result<String> {
    let document = ThemeDocument {
        fingerprint: theme.tokens.fingerprint(),
        tokens: &theme.tokens,
        animations: &theme.animations,
        plugins: &theme.plugins,
    };

    serde_json::to_string_pretty(&document).map_err(|e| TokenError::Build {
        message: format!("Failed to serialize theme: {}", e),
        help: None,
    })
}
