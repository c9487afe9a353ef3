//! Lint checks for token declarations.
//!
//! Runs after a successful resolution and reports declarations that are
//! dead, shadowed or clash in CSS output. Used by `tokenc check`.

mod checks;
mod warning;

pub use checks::{
    CSS_NAME_COLLISION, EMPTY_GROUP, SHADOWED_TOKEN, UNUSED_KEYFRAMES, UNUSED_PROPERTY,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer, Status};
use crate::resolver::ResolvedTheme;
use crate::types::{DeclarationTree, PropertySource};

/// Run all lint checks.
pub fn validate_theme(
    tree: &DeclarationTree,
    properties: &dyn PropertySource,
    theme: &ResolvedTheme,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_unused_keyframes(tree));
    result.merge(checks::check_empty_groups(tree));
    result.merge(checks::check_unused_properties(properties, theme));
    result.merge(checks::check_shadowed_tokens(theme));
    result.merge(checks::check_css_name_collisions(theme));

    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}[{}]: {}", label, printer.dim(&d.code), d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.cyan("help:"), help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.status(
            Status::Failed,
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.status(Status::Warned, &plural(warnings, "warning", "warnings"));
    } else {
        printer.status(Status::Checked, "no issues");
    }
}
