mod commands;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "roomcal")]
#[command(about = "Check room availability and pick check-in / check-out dates")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Rooms and reservations file (TOML or JSON); overrides the config
    #[arg(long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Earliest selectable date: "today", "none" or YYYY-MM-DD
    #[arg(long, global = true)]
    pub min: Option<String>,

    /// Only count rooms of this type
    #[arg(long, global = true)]
    pub room_type: Option<String>,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a month with occupied dates and the current stay
    Show {
        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        #[arg(long, default_value = "")]
        check_in: String,

        #[arg(long, default_value = "")]
        check_out: String,
    },
    /// Click dates in order and print the resulting stay
    Pick {
        /// Dates to click (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<String>,

        #[arg(long)]
        json: bool,
    },
    /// List dates with no rooms left
    Occupied {
        /// First date (YYYY-MM-DD), defaults to the start of this month
        #[arg(long)]
        from: Option<String>,

        /// Last date, exclusive (YYYY-MM-DD), defaults to 90 days after --from
        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Pick dates interactively
    Interactive,
    /// Show configuration paths and values
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Show {
            month,
            check_in,
            check_out,
        } => {
            let session = Session::load(&cli.global)?;
            commands::show::run(&session, month, check_in, check_out)
        }
        Commands::Pick { dates, json } => {
            let session = Session::load(&cli.global)?;
            commands::pick::run(&session, &dates, json)
        }
        Commands::Occupied { from, to, json } => {
            let session = Session::load(&cli.global)?;
            commands::occupied::run(&session, from.as_deref(), to.as_deref(), json)
        }
        Commands::Interactive => {
            let session = Session::load(&cli.global)?;
            commands::interactive::run(&session)
        }
        Commands::Config => commands::config::run(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "roomcal=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
