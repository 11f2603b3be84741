use anyhow::Result;
use clap::Parser;

use bindsmith::cli::{Cli, Command};
use bindsmith::pipeline::{self, GenerateOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();
    bindsmith_utils::init_logging(cli.verbose);

    match cli.command {
        Command::Generate {
            tree,
            namespaces,
            config,
            out,
            timings,
        } => pipeline::run_generate(&GenerateOptions {
            tree,
            namespaces,
            config,
            out,
            timings,
        }),
        Command::Inspect {
            tree,
            namespace,
            config,
        } => pipeline::run_inspect(&tree, &namespace, config.as_deref()),
    }
}
