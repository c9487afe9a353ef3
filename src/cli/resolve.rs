//! Resolve command implementation.
//!
//! Resolves the theme and writes it as JSON or CSS, to a file or stdout.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::emit::OutputFormat;
use crate::error::{Result, TokenError};
use crate::output::{display_path, plural, Printer, Status};

use super::input::InputArgs;

/// Resolve declarations into a token table and animation timelines
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format (default: manifest format, else json)
    #[arg(long, short, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ResolveArgs, printer: &Printer) -> Result<()> {
    let inputs = args.input.load(printer)?;
    let theme = inputs.resolve(printer)?;

    let format = args.format.unwrap_or(inputs.project.manifest.format);
    let rendered = format.render(&theme)?;

    let summary = format!(
        "{}, {}",
        plural(theme.tokens.len(), "token", "tokens"),
        plural(theme.animations.len(), "animation", "animations")
    );

    match args.output.or_else(|| inputs.project.output_path()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| TokenError::Io {
                    path: parent.to_path_buf(),
                    message: format!("Failed to create output directory: {}", e),
                })?;
            }
            fs::write(&path, &rendered).map_err(|e| TokenError::Io {
                path: path.clone(),
                message: format!("Failed to write output: {}", e),
            })?;
            printer.status(
                Status::Wrote,
                &format!("{} ({})", display_path(&path), summary),
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
            printer.status(
                Status::Resolved,
                &format!("{} as {}", summary, format.extension()),
            );
        }
    }

    Ok(())
}
