//! xmgen CLI entry point
//!
//! Thin front end over `xmgen-core`: load the spec, bind the trailing
//! command-line arguments to an invocation, generate, and write the result
//! to the configured destination (or stdout when none is configured).

mod args;

use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xmgen_core::{
    Generator, GeneratorSpec, Invocation, OutputWriter, OutputWriterConfig,
};

use args::{split_invocation, Arguments};

fn main() {
    let arguments = Arguments::parse();
    init_logging(arguments.verbose);

    if let Err(err) = run(arguments) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        exit(1);
    }
}

fn run(arguments: Arguments) -> Result<(), Box<dyn Error>> {
    let spec = GeneratorSpec::load(&arguments.input)?;

    let named_arity = spec.named_args().len();
    let Some((named, tail)) = split_invocation(&arguments.args, named_arity) else {
        return Err(format!(
            "expected at least {named_arity} trailing arguments to bind {:?}, got {}",
            spec.named_args(),
            arguments.args.len()
        )
        .into());
    };

    let destination = arguments
        .output
        .or_else(|| spec.output().map(PathBuf::from));

    let generator = Generator::new(spec);
    let text = generator.generate(&Invocation { named, tail })?;

    match destination {
        Some(path) => {
            let writer = OutputWriter::with_config(OutputWriterConfig {
                dry_run: arguments.dry_run,
                create_backups: !arguments.no_backup,
            });
            let result = writer.write(&text, &path)?;
            if result.dry_run {
                print!("{text}");
                info!(path = %result.path.display(), "dry-run, artifact not written");
            } else {
                info!(path = %result.path.display(), "artifact written");
            }
        }
        None => print!("{text}"),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
