use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gcboard::{
    config::create_app,
    settings::Settings,
    source::{DataSource, JsonDirSource},
    standings::{JoinKey, StandingRow, calculate_with},
    state::AppState,
    teams::Category,
    validation::audit,
};
use tracing::Level;

#[derive(Parser)]
#[command(version, about = "General Championship standings")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the live GC table over HTTP.
    Serve {
        /// TOML settings file. Flags given here take precedence over it.
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        join: Option<JoinKey>,
    },
    /// Print the GC table once.
    Compute {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List results that the GC table ignores.
    Check {
        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding `teams.json` and `standings.json`.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Whether placings name teams by `name` or by `id`.
    #[arg(long, default_value = "name")]
    join: JoinKey,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            data_dir,
            join,
        } => {
            let mut settings = Settings::load(config.as_deref())?;
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(data_dir) = data_dir {
                settings.data_dir = data_dir;
            }
            if let Some(join) = join {
                settings.join = join;
            }
            settings.validate()?;
            serve(settings).await?;
        }
        Command::Compute { data, format } => {
            let source = JsonDirSource::new(&data.data_dir);
            let (teams, events) =
                tokio::try_join!(source.teams(), source.events())?;
            let standings = calculate_with(&events, &teams, data.join);

            match format {
                Format::Json => {
                    println!("{}", serde_json::to_string_pretty(&standings)?)
                }
                Format::Table => {
                    for category in [Category::Men, Category::Women] {
                        print_table(category, standings.bucket(category));
                    }
                }
            }
        }
        Command::Check { data } => {
            let source = JsonDirSource::new(&data.data_dir);
            let (teams, events) =
                tokio::try_join!(source.teams(), source.events())?;
            let findings = audit(&events, &teams, data.join);

            for finding in &findings {
                println!("{finding}");
            }
            if !findings.is_empty() {
                tracing::warn!("{} problems found", findings.len());
                std::process::exit(1);
            }
            tracing::info!(
                "{} teams and {} events look consistent",
                teams.len(),
                events.len()
            );
        }
    }

    Ok(())
}

async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let source = Arc::new(JsonDirSource::new(&settings.data_dir));
    let data_dir = source.dir().display().to_string();
    let state = AppState::start(source, &settings);
    let app = create_app(state);

    let listener =
        tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
            .await?;
    tracing::info!("serving {data_dir} on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("could not listen for shutdown: {e}");
            }
        })
        .await?;

    Ok(())
}

fn print_table(category: Category, rows: &[StandingRow]) {
    println!("{category}");
    if rows.is_empty() {
        println!("  (no teams)");
        println!();
        return;
    }

    let width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    println!(
        "{:>3}  {:<width$}  {:>4}  {:>6}  {:>6}  {:>6}",
        "#", "Team", "Gold", "Silver", "Bronze", "Points"
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<width$}  {:>4}  {:>6}  {:>6}  {:>6}",
            i + 1,
            row.name,
            row.gold,
            row.silver,
            row.bronze,
            row.points
        );
    }
    println!();
}
