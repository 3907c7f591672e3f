use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate the README into every target language
    Run {
        /// Input document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for translated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Translation backend (library, api)
        #[arg(short, long)]
        backend: Option<String>,

        /// Target languages, comma-separated `code` or `code=Name`
        #[arg(short, long)]
        languages: Option<String>,

        /// Additional protected terms (comma-separated)
        #[arg(short, long)]
        terms: Option<String>,
    },

    /// Print the document as the API backend would receive it
    Mask {
        /// Input document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Additional protected terms (comma-separated)
        #[arg(short, long)]
        terms: Option<String>,
    },

    /// List target languages and their output files
    Languages,

    /// Write the default configuration to a file
    Init {
        /// Output configuration file
        #[arg(short, long, default_value = "readme-translate.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let args = Args::try_parse_from([
            "readme-translate",
            "-v",
            "run",
            "--backend",
            "library",
            "--languages",
            "fr,de",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Commands::Run { backend, languages, input, .. } => {
                assert_eq!(backend.as_deref(), Some("library"));
                assert_eq!(languages.as_deref(), Some("fr,de"));
                assert!(input.is_none());
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_init_default_output() {
        let args = Args::try_parse_from(["readme-translate", "init"]).unwrap();
        match args.command {
            Commands::Init { output, force } => {
                assert_eq!(output, PathBuf::from("readme-translate.toml"));
                assert!(!force);
            }
            _ => panic!("Expected init command"),
        }
    }
}
