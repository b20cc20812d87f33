use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sortviz_term::{PlayArgs, RunArgs, TraceArgs};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None, styles=get_styles())] // Read from `Cargo.toml`
struct Cli {
    /// Write logs to this file. The interactive visualizer only logs when this is set.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    commands: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive visualizer (default)
    Play(PlayArgs),

    /// Animate one run behind a progress bar
    Run(RunArgs),

    /// Print every step of a run as a table
    Trace(TraceArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let commands = cli
        .commands
        .unwrap_or_else(|| Commands::Play(PlayArgs::default()));

    let interactive = matches!(commands, Commands::Play(_));
    init_logging(cli.log_file.as_deref(), interactive)?;
    info!(interactive, "sortviz starting");

    match commands {
        Commands::Play(play_args) => play_args.run().await,
        Commands::Run(run_args) => run_args.run().await,
        Commands::Trace(trace_args) => trace_args.run().await,
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let from_env = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    // stderr belongs to the alternate screen while the visualizer is open
    let filter = match log_file {
        Some(_) => from_env("sortviz=info,sortviz_core=info,sortviz_term=info"),
        None if interactive => EnvFilter::new("off"),
        None => from_env("warn"),
    };

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

#[test]
fn play_is_the_default() {
    let cli = Cli::try_parse_from(["sortviz"]).unwrap();
    assert!(cli.commands.is_none());

    let cli = Cli::try_parse_from(["sortviz", "trace", "--values", "5,3,1", "-a", "quick"]).unwrap();
    match cli.commands {
        Some(Commands::Trace(args)) => {
            assert_eq!(args.values, Some(vec![5, 3, 1]));
            assert_eq!(args.algorithm, sortviz_core::AlgorithmKind::Quick);
        }
        _ => panic!("expected the trace subcommand"),
    }
}
