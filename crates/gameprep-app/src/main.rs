// Game prep command-line entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, so stdout carries only answers)
// 2. Load config, copying defaults on first run
// 3. Apply command-line overrides
// 4. Load the pitch dataset and build the season snapshot
// 5. Run the command

use gameprep_app::app::{Answer, GamePrep, Mode};
use gameprep_app::config;
use gameprep_app::report::{render_card, render_roster};
use gameprep_baseball::SeasonFilter;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gameprep", about = "Scouting reports and game plans from pitch charting data")]
struct Cli {
    /// Directory holding config/ (and defaults/ on first run)
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Pitch CSV to load instead of the configured one
    #[arg(long)]
    data: Option<PathBuf>,

    /// Season to analyze: "all" or a four-digit year
    #[arg(long)]
    season: Option<SeasonFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dataset summary for the selected season
    Status,
    /// Seasons present in the dataset
    Seasons,
    /// Every team and player a question can name
    Roster,
    /// Answer a coach's question
    Ask {
        question: String,
        #[arg(long, value_enum, default_value_t = Mode::Dugout)]
        mode: Mode,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the explainer request body for a question
    Request { question: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize tracing
    init_tracing()?;
    info!("gameprep starting: {:?}", cli.command);

    // 2. Load config
    let mut config =
        config::load_config(&cli.config_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, data={}, season={}",
        config.team.name, config.data.pitches, config.season
    );

    // 3. Overrides
    if let Some(season) = cli.season {
        config.season = season;
    }
    if let Some(data) = &cli.data {
        // Relative to where the command was run, not to the config dir.
        config.data.pitches = std::env::current_dir()?.join(data).display().to_string();
    }

    // 4. Dataset
    let app = GamePrep::load(config, &cli.config_dir)?;

    // 5. Command
    match cli.command {
        Command::Status => {
            println!("Season {}: {}", app.config().season, app.status_line());
        }
        Command::Seasons => {
            for year in app.seasons() {
                println!("{}", year);
            }
        }
        Command::Roster => {
            print!("{}", render_roster(&app.roster()));
        }
        Command::Ask {
            question,
            mode,
            json,
        } => match app.ask(&question, mode)? {
            Answer::Card(card) if json => {
                println!("{}", serde_json::to_string_pretty(&card)?);
            }
            Answer::Card(card) => {
                print!("{}", render_card(&card, app.config().small_sample_pitches));
            }
            Answer::Explain { context, .. } if json => {
                println!("{}", serde_json::to_string_pretty(&context)?);
            }
            Answer::Explain { message, .. } => {
                println!("{}", message);
            }
        },
        Command::Request { question } => {
            let body = app.request_body(&question)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

/// Initialize tracing to log to a file (stdout is reserved for answers).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gameprep.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gameprep=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
