//! Output formats for a resolved theme.

mod css;
mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::ResolvedTheme;

pub(crate) use css::is_default_alias;
pub use css::{custom_property_name, to_css};
pub use json::to_json;

/// How a resolved theme is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Css,
}

impl OutputFormat {
    /// Render `theme` in this format.
    pub fn render(self, theme: &ResolvedTheme) -> Result<String> {
        match self {
            OutputFormat::Json => to_json(theme),
            OutputFormat::Css => Ok(to_css(theme)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Css => "css",
        }
    }
}
