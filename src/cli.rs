use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bindsmith")]
#[command(about = "Generate Lua bindings from C++ declaration trees", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log materialization and synthesis steps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize binding fragments and write them as JSON
    Generate {
        /// Declaration tree (`.json`, `.yml` or `.yaml`)
        #[arg(long)]
        tree: PathBuf,

        /// Namespaces to generate (`cv`, `cv::ml`); all when omitted
        #[arg(short, long = "namespace")]
        namespaces: Vec<String>,

        /// Generator configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Log the time spent in each phase
        #[arg(long)]
        timings: bool,
    },

    /// Print the bindable view of a namespace and its dispatch plans
    Inspect {
        /// Declaration tree (`.json`, `.yml` or `.yaml`)
        #[arg(long)]
        tree: PathBuf,

        /// Namespace to inspect
        #[arg(short, long)]
        namespace: String,

        /// Generator configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::parse_from([
            "bindsmith",
            "generate",
            "--tree",
            "cv.yml",
            "-n",
            "cv",
            "--namespace",
            "cv::ml",
            "--out",
            "cv.json",
        ]);
        let Command::Generate {
            tree,
            namespaces,
            out,
            config,
            timings,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(tree, PathBuf::from("cv.yml"));
        assert_eq!(namespaces, ["cv", "cv::ml"]);
        assert_eq!(out, Some(PathBuf::from("cv.json")));
        assert!(config.is_none());
        assert!(!timings);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
