use clap::{Parser, Subcommand};
use fanduel_lp::formulation::Formulate;
use fanduel_lp::generate::RosterGenerator;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct FanduelLp {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the lp model of the best lineup for a csv of player projections
    Formulate(Formulate),
    /// Write a csv of random players
    Generate(RosterGenerator),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = FanduelLp::parse();
    match cli.command {
        Command::Formulate(formulate) => formulate.formulate()?,
        Command::Generate(generate) => generate.generate()?,
    }
    Ok(())
}
