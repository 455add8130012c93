//! Command-line interface definition.

use crate::tracing::{LogLevel, TracingFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tfgen")]
#[command(about = "Generate deterministic Terraform documents from a cluster model")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging level.
    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "TFGEN_LOG_FORMAT",
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate kubernetes.tf and its data files from a model.
    #[command(about = "Generate kubernetes.tf and data files from a model file")]
    Generate(GenerateArgs),

    /// Print the sanitized form of identifiers.
    #[command(about = "Print the HCL identifier each name sanitizes to")]
    Sanitize {
        /// Names to sanitize.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Arguments of `tfgen generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Model file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(short, long, env = "TFGEN_INPUT", help = "Path to the model file")]
    pub input: PathBuf,

    /// Directory that receives kubernetes.tf and data/.
    #[arg(
        short,
        long,
        env = "TFGEN_OUT_DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub out_dir: PathBuf,

    /// Report what would change without writing.
    #[arg(long, help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Fail if any generated file is missing or differs.
    #[arg(
        long,
        conflicts_with = "dry_run",
        help = "Fail if generated files are out of date"
    )]
    pub check: bool,

    /// Enable the Spotinst provider.
    #[arg(long, env = "TFGEN_FEATURE_SPOTINST", help = "Enable the Spotinst provider")]
    pub spotinst: bool,

    /// Print the document instead of writing files.
    #[arg(
        long,
        conflicts_with_all = ["dry_run", "check"],
        help = "Print kubernetes.tf to stdout instead of writing files"
    )]
    pub stdout: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["tfgen", "generate", "--input", "model.json"]).unwrap();

        assert_eq!(cli.level, LogLevel::Warn);
        assert_eq!(cli.log_format, TracingFormat::Compact);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.input, PathBuf::from("model.json"));
                assert_eq!(args.out_dir, PathBuf::from("."));
                assert!(!args.dry_run);
                assert!(!args.check);
                assert!(!args.stdout);
            }
            Commands::Sanitize { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tfgen",
            "generate",
            "-i",
            "model.yaml",
            "--level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.level, LogLevel::Debug);
        assert_eq!(cli.log_format, TracingFormat::Json);
    }

    #[test]
    fn test_check_conflicts_with_dry_run() {
        let result = Cli::try_parse_from([
            "tfgen",
            "generate",
            "--input",
            "m.json",
            "--check",
            "--dry-run",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stdout_conflicts_with_check() {
        let result =
            Cli::try_parse_from(["tfgen", "generate", "--input", "m.json", "--stdout", "--check"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_requires_names() {
        assert!(Cli::try_parse_from(["tfgen", "sanitize"]).is_err());

        let cli = Cli::try_parse_from(["tfgen", "sanitize", "a.b", "1x"]).unwrap();
        match cli.command {
            Commands::Sanitize { names } => assert_eq!(names, vec!["a.b", "1x"]),
            Commands::Generate(_) => panic!("expected sanitize"),
        }
    }

    #[test]
    fn test_invalid_level() {
        assert!(Cli::try_parse_from(["tfgen", "--level", "loud", "sanitize", "x"]).is_err());
    }
}
