//! tfgen binary entry point.

#![allow(clippy::print_stdout)]

use clap::Parser;
use std::io::Write as _;
use tfgen::cli::{Cli, Commands};
use tfgen::commands::{generate, render_document_text};
use tfgen::tracing::{TracingConfig, init_tracing};
use tfgen_emitter::FeatureFlags;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    })?;

    match cli.command {
        Commands::Generate(args) if args.stdout => {
            let text = render_document_text(
                &args.input,
                FeatureFlags {
                    spotinst: args.spotinst,
                },
            )?;
            std::io::stdout()
                .write_all(text.as_bytes())
                .map_err(|e| miette::miette!("Failed to write to stdout: {e}"))?;
        }
        Commands::Generate(args) => {
            let report = generate(&args)?;
            for file in &report.files {
                println!("{}: {}", file.status, file.path);
            }
        }
        Commands::Sanitize { names } => {
            for name in names {
                println!("{}", tfgen_hcl::sanitize(&name));
            }
        }
    }

    Ok(())
}
