use beadgen::cli::{Cli, Commands};
use beadgen::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => beadgen::cli::generate::run(args, &printer)?,
        Commands::Palette(args) => beadgen::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => beadgen::cli::completions::run(args)?,
    }

    Ok(())
}
