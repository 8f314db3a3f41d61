//! roster CLI
//!
//! Interactive prisoner roster plus one-shot list/convert commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster::{sample_roster, store, Format, MalformedPolicy, Roster, Shell, ShellConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Prisoner roster manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text save file
    #[arg(long, global = true, default_value = "prisoners.txt")]
    text: PathBuf,

    /// Binary snapshot file
    #[arg(long, global = true, default_value = "prisoners.dat")]
    snapshot: PathBuf,

    /// Drop malformed text blocks instead of failing the load
    #[arg(long, global = true)]
    skip_malformed: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive menu (default)
    Shell {
        /// Don't clear the console between screens
        #[arg(long)]
        no_clear: bool,

        /// Start with an empty roster instead of the sample records
        #[arg(long)]
        empty: bool,
    },

    /// Print every record in a text or snapshot file
    List {
        /// File to read (.dat/.bin = snapshot, otherwise text)
        input: PathBuf,
    },

    /// Convert between text and snapshot files
    Convert {
        /// Source file
        input: PathBuf,

        /// Destination file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let policy = if cli.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Abort
    };

    match cli.command {
        None => run_shell(cli.text, cli.snapshot, policy, false, false)?,
        Some(Commands::Shell { no_clear, empty }) => {
            run_shell(cli.text, cli.snapshot, policy, no_clear, empty)?;
        }
        Some(Commands::List { input }) => list_records(input, policy)?,
        Some(Commands::Convert { input, output }) => convert(input, output, policy)?,
    }

    Ok(())
}

fn run_shell(
    text_path: PathBuf,
    snapshot_path: PathBuf,
    policy: MalformedPolicy,
    no_clear: bool,
    empty: bool,
) -> Result<()> {
    let roster = if empty { Roster::new() } else { sample_roster() };
    let config = ShellConfig {
        text_path,
        snapshot_path,
        clear_screen: !no_clear,
        policy,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(roster, config, stdin.lock(), stdout.lock());
    shell.run().context("Terminal I/O failed")?;

    Ok(())
}

fn list_records(input: PathBuf, policy: MalformedPolicy) -> Result<()> {
    let roster = store::load(&input, policy)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    for (idx, prisoner) in roster.iter().enumerate() {
        println!("=== Prisoner #{} ===", idx + 1);
        println!("{}\n", prisoner);
    }
    println!("{} records", roster.len());

    Ok(())
}

fn convert(input: PathBuf, output: PathBuf, policy: MalformedPolicy) -> Result<()> {
    let roster = store::load(&input, policy)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    store::save(&roster, &output)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    println!(
        "Converted {} records: {} ({}) -> {} ({})",
        roster.len(),
        input.display(),
        Format::from_path(&input).as_str(),
        output.display(),
        Format::from_path(&output).as_str()
    );

    Ok(())
}
