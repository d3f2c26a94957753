use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use session_types::{ReadMode, SequenceGenerator, TokenGenerator, UuidGenerator};

use crate::command;

#[derive(Parser)]
#[command(version, about = "Create and inspect session geometry files")]
struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Log at debug level, ignoring RUST_LOG",
        default_value_t = false
    )]
    verbose: bool,
    #[arg(
        long,
        global = true,
        help = "Number identifiers sequentially instead of randomly",
        default_value_t = false
    )]
    seed_ids: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a color, white unless HEX is given
    Color {
        #[arg(value_name = "HEX", help = "#rrggbb or #rrggbbaa")]
        hex: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long, value_name = "FILE", help = "Write to FILE instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Create a point
    #[command(allow_negative_numbers = true)]
    Point {
        x: f64,
        y: f64,
        z: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long, value_name = "HEX")]
        color: Option<String>,
        #[arg(short, long, value_name = "FILE", help = "Write to FILE instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Print the color or point stored in FILE
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(
            long,
            help = "Default missing name, guid and width instead of failing",
            default_value_t = false
        )]
        permissive: bool,
    },
    /// Build a point, print it and its JSON, decode it again and save it
    Demo {
        #[arg(short, long, value_name = "FILE", default_value = "point.json")]
        output: PathBuf,
    },
}

fn initialize(verbose: bool) -> Result<()> {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
            .from_env_lossy()
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(())
}

pub fn run() -> Result<()> {
    let Cli {
        verbose,
        seed_ids,
        command,
    } = Cli::parse();

    initialize(verbose)?;

    let ids: Box<dyn TokenGenerator> = if seed_ids {
        Box::new(SequenceGenerator::new())
    } else {
        Box::new(UuidGenerator)
    };
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Color { hex, name, output } => command::color(
            &mut stdout,
            ids.as_ref(),
            command::ColorArgs { hex, name },
            output.as_deref(),
        ),
        Command::Point {
            x,
            y,
            z,
            name,
            width,
            color,
            output,
        } => command::point(
            &mut stdout,
            ids.as_ref(),
            command::PointArgs {
                x,
                y,
                z,
                name,
                width,
                color,
            },
            output.as_deref(),
        ),
        Command::Show { file, permissive } => {
            let mode = if permissive {
                ReadMode::Permissive
            } else {
                ReadMode::Strict
            };
            command::show(&mut stdout, &file, mode)
        }
        Command::Demo { output } => command::demo(&mut stdout, ids.as_ref(), &output),
    }
}
