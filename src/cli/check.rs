//! Check command implementation.
//!
//! Resolves the theme, then runs lint checks over the result.

use clap::Args;

use crate::error::{Result, TokenError};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, validate_theme, ValidationResult};

use super::input::InputArgs;

/// Resolve declarations and report lint warnings
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let result = lint(&args.input, printer)?;
    print_diagnostics(&result, printer);
    verdict(&result, args.strict)
}

/// Resolve and lint without printing diagnostics.
pub fn lint(input: &InputArgs, printer: &Printer) -> Result<ValidationResult> {
    let inputs = input.load(printer)?;
    let theme = inputs.resolve(printer)?;
    let view = inputs.view()?;
    Ok(validate_theme(&inputs.tree, &view, &theme))
}

fn verdict(result: &ValidationResult, strict: bool) -> Result<()> {
    if result.has_errors() {
        return Err(TokenError::Validation {
            message: plural(result.error_count(), "error", "errors"),
            help: None,
        });
    }
    if strict && result.has_warnings() {
        return Err(TokenError::Validation {
            message: plural(result.warning_count(), "warning", "warnings"),
            help: Some("Run without --strict to allow warnings".to_string()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn input_with(theme_source: &str) -> (tempfile::TempDir, InputArgs) {
        let dir = tempdir().unwrap();
        let theme = dir.path().join("theme.yaml");
        std::fs::write(&theme, theme_source).unwrap();
        let input = InputArgs {
            theme: Some(theme),
            ..Default::default()
        };
        (dir, input)
    }

    #[test]
    fn test_warnings_pass_unless_strict() {
        let (_dir, input) = input_with(
            "theme:\n  keyframes:\n    fade: { from: { opacity: 0 }, to: { opacity: 1 } }\n",
        );
        let result = lint(&input, &Printer::plain()).unwrap();

        assert_eq!(result.warning_count(), 1);
        assert!(verdict(&result, false).is_ok());
        assert!(matches!(
            verdict(&result, true),
            Err(TokenError::Validation { .. })
        ));
    }

    #[test]
    fn test_lint_errors_fail_without_strict() {
        let (_dir, input) = input_with("theme:\n  spacing:\n    a-b: 1px\n    a: { b: 2px }\n");
        let result = lint(&input, &Printer::plain()).unwrap();

        assert_eq!(result.error_count(), 1);
        let err = verdict(&result, false).unwrap_err();
        assert!(matches!(err, TokenError::Validation { message, .. } if message == "1 error"));
    }

    #[test]
    fn test_resolution_errors_propagate() {
        let (_dir, input) = input_with(
            "theme:\n  animation:\n    wobble: wobble 1s\n",
        );
        let err = lint(&input, &Printer::plain()).unwrap_err();
        assert!(matches!(err, TokenError::MissingKeyframe { .. }));
    }
}
