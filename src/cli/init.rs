//! Init command implementation.
//!
//! Writes a starter `tokenc.yaml`, and starter input files when the
//! directory has none yet.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, TokenError};
use crate::manifest::MANIFEST_FILENAME;
use crate::output::{display_path, Printer, Status};

const THEME_FILENAME: &str = "theme.yaml";
const PROPERTIES_FILENAME: &str = "properties.yaml";

const STARTER_THEME: &str = r#"theme:
  colors:
    border: hsl(var(--border))
    background: hsl(var(--background))
    foreground: hsl(var(--foreground))
  borderRadius:
    lg: var(--radius)
    md: calc(var(--radius) - 2px)
    sm: calc(var(--radius) - 4px)
  keyframes:
    accordion-down:
      from: { height: "0" }
      to: { height: var(--radix-accordion-content-height) }
    accordion-up:
      from: { height: var(--radix-accordion-content-height) }
      to: { height: "0" }
  animation:
    accordion-down: accordion-down 0.2s ease-out
    accordion-up: accordion-up 0.2s ease-out
plugins: [tailwindcss-animate]
"#;

const STARTER_PROPERTIES: &str = r#"base:
  --radius: 0.5rem
  --border: 214.3 31.8% 91.4%
  --background: 0 0% 100%
  --foreground: 222.2 84% 4.9%
modes:
  dark:
    --border: 217.2 32.6% 17.5%
    --background: 222.2 84% 4.9%
    --foreground: 210 40% 98%
"#;

/// Initialize a tokenc project (writes tokenc.yaml)
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing tokenc.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(TokenError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::create_dir_all(&args.path).map_err(|e| TokenError::Io {
        path: args.path.clone(),
        message: format!("Failed to create project directory: {}", e),
    })?;

    write_if_missing(&args.path.join(THEME_FILENAME), STARTER_THEME, printer)?;
    write_if_missing(&args.path.join(PROPERTIES_FILENAME), STARTER_PROPERTIES, printer)?;

    let yaml = format!(
        "theme: {}\nproperties: {}\nformat: json\n",
        THEME_FILENAME, PROPERTIES_FILENAME
    );
    write(&manifest_path, &yaml)?;
    printer.status(Status::Created, &display_path(&manifest_path));

    Ok(())
}

fn write_if_missing(path: &Path, content: &str, printer: &Printer) -> Result<()> {
    if path.exists() {
        printer.status(Status::Keeping, &display_path(path));
        return Ok(());
    }
    write(path, content)?;
    printer.status(Status::Created, &display_path(path));
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| TokenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}
