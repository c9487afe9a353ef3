//! Input selection shared by the resolving commands.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::manifest::{load_declarations, load_properties, Project};
use crate::output::{display_path, plural, Printer, Status};
use crate::resolver::{ResolveOptions, ResolvedTheme, TokenResolver};
use crate::types::{ColorFormat, CustomPropertyTable, DeclarationTree, PropertyView};

/// Where to read declarations and properties from.
///
/// Flags override the manifest; flag paths are relative to the working
/// directory, manifest paths to the manifest.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Manifest to read (default: ./tokenc.yaml when present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Theme declaration file
    #[arg(long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Custom-property file
    #[arg(long, value_name = "FILE")]
    pub properties: Option<PathBuf>,

    /// Property mode to resolve through (e.g. dark)
    #[arg(long)]
    pub mode: Option<String>,

    /// Colour output format
    #[arg(long, value_enum)]
    pub color_format: Option<ColorFormat>,
}

/// Parsed inputs ready to resolve.
#[derive(Debug)]
pub struct Inputs {
    pub project: Project,
    pub theme_path: PathBuf,
    pub tree: DeclarationTree,
    pub properties: CustomPropertyTable,
    pub mode: Option<String>,
    pub options: ResolveOptions,
}

impl InputArgs {
    /// Load the manifest and both input files.
    pub fn load(&self, printer: &Printer) -> Result<Inputs> {
        let project = Project::open(self.config.as_deref())?;
        if project.has_manifest {
            tracing::debug!(root = %project.root.display(), "using manifest");
        }

        let theme_path = self.theme.clone().unwrap_or_else(|| project.theme_path());
        let properties_path = self.properties.clone().or_else(|| project.properties_path());

        let tree = load_declarations(&theme_path)?;
        let properties = match &properties_path {
            Some(path) => load_properties(path)?,
            None => CustomPropertyTable::new(),
        };

        let mut options = project.manifest.options();
        if let Some(format) = self.color_format {
            options.color_format = format;
        }
        let mode = self.mode.clone().or_else(|| project.manifest.mode.clone());

        let mut loaded = vec![plural(tree.leaf_count(), "token", "tokens")];
        if properties_path.is_some() {
            loaded.push(plural(properties.len(), "property", "properties"));
        }
        printer.status(
            Status::Loading,
            &format!("{} ({})", display_path(&theme_path), loaded.join(", ")),
        );

        Ok(Inputs {
            project,
            theme_path,
            tree,
            properties,
            mode,
            options,
        })
    }
}

impl Inputs {
    /// The property table seen through the selected mode.
    pub fn view(&self) -> Result<PropertyView<'_>> {
        self.properties.view(self.mode.as_deref())
    }

    /// Resolve the declarations.
    pub fn resolve(&self, printer: &Printer) -> Result<ResolvedTheme> {
        let view = self.view()?;
        let label = match &self.mode {
            Some(mode) => format!("{} (mode: {})", display_path(&self.theme_path), mode),
            None => display_path(&self.theme_path),
        };
        printer.status(Status::Resolving, &label);

        TokenResolver::with_options(self.options.clone()).resolve(&self.tree, &view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_flags_override_manifest() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("tokenc.yaml"),
            "theme: theme.yaml\nproperties: properties.yaml\nmode: dark\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("theme.yaml"),
            "theme:\n  colors:\n    background: hsl(var(--background))\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("properties.yaml"),
            "base:\n  --background: 0 0% 100%\nmodes:\n  dark:\n    --background: 0 0% 0%\n",
        )
        .unwrap();

        let args = InputArgs {
            config: Some(dir.path().join("tokenc.yaml")),
            color_format: Some(ColorFormat::Hex),
            ..Default::default()
        };
        let inputs = args.load(&Printer::plain()).unwrap();
        assert_eq!(inputs.mode.as_deref(), Some("dark"));

        let theme = inputs.resolve(&Printer::plain()).unwrap();
        assert_eq!(theme.tokens.get("colors.background"), Some("#000000"));
    }

    #[test]
    fn test_unknown_mode() {
        let dir = tempdir().unwrap();
        let theme = dir.path().join("theme.yaml");
        std::fs::write(&theme, "theme: {}\n").unwrap();

        let args = InputArgs {
            theme: Some(theme),
            mode: Some("dusk".to_string()),
            ..Default::default()
        };
        let inputs = args.load(&Printer::plain()).unwrap();
        assert!(inputs.resolve(&Printer::plain()).is_err());
    }
}
