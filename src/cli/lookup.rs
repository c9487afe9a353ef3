//! Lookup command implementation.
//!
//! Prints one resolved value to stdout.

use clap::Args;

use crate::error::{Result, TokenError};
use crate::output::Printer;
use crate::resolver::ResolvedTheme;

use super::input::InputArgs;

/// Prefix for looking up compiled animations instead of tokens.
const ANIMATION_PREFIX: &str = "animation.";

/// Print the resolved value of one token path
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Token path, e.g. colors.brillu.spark.hover (or animation.<name>)
    pub path: String,

    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: LookupArgs, printer: &Printer) -> Result<()> {
    let inputs = args.input.load(printer)?;
    let theme = inputs.resolve(printer)?;
    println!("{}", lookup(&theme, &args.path)?);
    Ok(())
}

/// Find a token value, or an animation's shorthand under `animation.<name>`.
pub fn lookup<'a>(theme: &'a ResolvedTheme, path: &str) -> Result<&'a str> {
    if let Some(value) = theme.tokens.get(path) {
        return Ok(value);
    }
    if let Some(animation) = path
        .strip_prefix(ANIMATION_PREFIX)
        .and_then(|name| theme.animations.get(name))
    {
        return Ok(animation.shorthand.as_str());
    }

    let section = theme.tokens.section(path);
    let help = if section.is_empty() {
        None
    } else {
        let children: Vec<&str> = section
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !name.contains('.'))
            .take(5)
            .collect();
        Some(format!(
            "'{}' is a group; try {}",
            path,
            children
                .iter()
                .map(|c| format!("{}.{}", path, c))
                .collect::<Vec<_>>()
                .join(", ")
        ))
    };

    Err(TokenError::UnknownToken {
        path: path.to_string(),
        help,
    })
}
