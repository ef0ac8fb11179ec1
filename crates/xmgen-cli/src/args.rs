//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

/// Generate synchronized code artifacts from a TOML generator spec.
///
/// Trailing arguments form the invocation: the first values bind to the
/// spec's `core.named_args`, in order, and everything after them is the
/// variadic tail of tag/value groups.
#[derive(Parser, Debug)]
#[command(name = "xmgen", version)]
pub struct Arguments {
    /// Path to the generator spec (TOML)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination path; overrides `common.output` from the spec
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview the artifact without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite an existing destination without keeping a `.bak` copy
    #[arg(long)]
    pub no_backup: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Invocation arguments: named values first, then the variadic tail
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Split the trailing arguments into named values and the variadic tail.
///
/// `None` when fewer than `named_arity` values were supplied.
pub fn split_invocation(
    args: &[String],
    named_arity: usize,
) -> Option<(Vec<String>, Vec<String>)> {
    if args.len() < named_arity {
        return None;
    }
    let (named, tail) = args.split_at(named_arity);
    Some((named.to_vec(), tail.to_vec()))
}
