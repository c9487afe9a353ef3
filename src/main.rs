use clap::Parser;
use miette::Result;
use tokenc::cli::{Cli, Commands};
use tokenc::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("tokenc=debug"))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let printer = Printer::new();

    match cli.command {
        Commands::Resolve(args) => tokenc::cli::resolve::run(args, &printer)?,
        Commands::Check(args) => tokenc::cli::check::run(args, &printer)?,
        Commands::Lookup(args) => tokenc::cli::lookup::run(args, &printer)?,
        Commands::Init(args) => tokenc::cli::init::run(args, &printer)?,
        Commands::Completions(args) => tokenc::cli::completions::run(args)?,
    }

    Ok(())
}
