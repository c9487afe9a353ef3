pub mod check;
pub mod completions;
pub mod init;
pub mod input;
pub mod lookup;
pub mod resolve;

use clap::{Parser, Subcommand};

/// tokenc - Design-token resolver
#[derive(Parser, Debug)]
#[command(name = "tokenc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print debug tracing to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve declarations into a token table and animation timelines
    Resolve(resolve::ResolveArgs),

    /// Resolve declarations and report lint warnings
    Check(check::CheckArgs),

    /// Print the resolved value of one token path
    Lookup(lookup::LookupArgs),

    /// Initialize a tokenc project (writes tokenc.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
