use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod source;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("plagscan=debug,info")
    } else {
        EnvFilter::new("plagscan=warn")
    };

    // Logs go to stderr so JSON and TSV output stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let engine = cli::load_engine(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Check(args) => {
            cli::check::run(args, cli.format, cli.verbose, &engine)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(args, cli.format, cli.verbose, &engine)?;
        }
        cli::Commands::Interactive => {
            cli::interactive::run(&engine)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, engine)?;
        }
    }

    Ok(())
}
