//! CLI entry point for the COVID-19 dashboard.
//!
//! Provides subcommands for rendering the dashboard charts, printing the
//! derived views, listing the dataset's locations, and running an interactive
//! session that keeps the downloaded dataset in memory between selections.

use anyhow::Result;
use clap::{Parser, Subcommand};
use covid_dashboard::{
    config::{DashboardConfig, Layout},
    dashboard::Dashboard,
    output::{log_snapshot, print_pretty, to_json},
    pipeline::DEFAULT_WINDOW,
    render::PngRenderer,
    selection::CANDIDATE_LOCATIONS,
    session::{HELP, SessionCommand},
    source::{DataSource, source_for},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "covid_dashboard")]
#[command(about = "COVID-19 data analysis dashboard", long_about = None)]
struct Cli {
    /// Dataset URL or local CSV path [default: $COVID_DATA_URL or the OWID URL]
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Comma-separated countries to show [default: all candidates]
    #[arg(short, long, value_delimiter = ',', global = true)]
    countries: Option<Vec<String>>,

    /// Trailing window, in records, of the new-cases average; also named in its chart labels
    #[arg(short, long, global = true, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Directory for charts, tables and the page [default: $DASHBOARD_OUTPUT_DIR or "dashboard"]
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Page layout; only changes chart dimensions
    #[arg(long, value_enum, global = true, default_value_t = Layout::Wide)]
    layout: Layout,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the three charts, CSV tables and an index page
    Render,
    /// Log the cases-per-100k snapshot and print every view as JSON
    Summary,
    /// List the locations present in the dataset
    ListLocations,
    /// Read commands from stdin, keeping the dataset loaded between them
    Interactive,
}

impl Cli {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::from_env();
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config.window = self.window;
        config.layout = self.layout;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/covid_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("covid_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let renderer = PngRenderer::new(config.layout);
    let source = source_for(&config.source);

    info!(
        title = %config.page_title,
        source = %config.source,
        window = config.window,
        "Starting dashboard"
    );

    let mut dashboard = Dashboard::new(config, source)?;
    if let Some(countries) = &cli.countries {
        dashboard.select_names(countries)?;
    }

    match cli.command {
        Commands::Render => {
            let page = dashboard.render(&renderer).await?;
            info!(page = %page.page.display(), "Open the page to view the dashboard");
        }
        Commands::Summary => summary(&mut dashboard).await?,
        Commands::ListLocations => {
            let dataset = dashboard.dataset().await?;
            let locations = dataset.locations();
            for (location, rows) in &locations {
                let candidate = CANDIDATE_LOCATIONS.contains(&location.as_str());
                info!(location = %location, rows, candidate, "Location");
            }
            info!(total = locations.len(), "Location list summary");
        }
        Commands::Interactive => interactive(&mut dashboard, &renderer).await?,
    }

    Ok(())
}

/// Logs the snapshot table and prints all three views as JSON on stdout.
async fn summary<S: DataSource>(dashboard: &mut Dashboard<S>) -> Result<()> {
    let views = dashboard.views().await?;
    print_pretty(&views);
    log_snapshot(&views.cases_per_100k);
    println!("{}", to_json(&views)?);
    info!(footer = %dashboard.config().footer, "Summary complete");
    Ok(())
}

/// Runs session commands from stdin until `quit` or end of input.
///
/// A failing command is logged and the session carries on; the dataset stays
/// memoized until `clear-cache`.
#[tracing::instrument(skip_all)]
async fn interactive<S: DataSource>(
    dashboard: &mut Dashboard<S>,
    renderer: &PngRenderer,
) -> Result<()> {
    info!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command: SessionCommand = match line.parse() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Command rejected");
                continue;
            }
        };

        let outcome = match command {
            SessionCommand::Select(names) => match dashboard.select_names(&names) {
                Ok(()) => dashboard.render(renderer).await.map(|_| ()),
                Err(e) => Err(e),
            },
            SessionCommand::SelectAll => match dashboard.select_all() {
                Ok(()) => dashboard.render(renderer).await.map(|_| ()),
                Err(e) => Err(e),
            },
            SessionCommand::ClearCache => {
                dashboard.clear_cache();
                Ok(())
            }
            SessionCommand::Render => dashboard.render(renderer).await.map(|_| ()),
            SessionCommand::Summary => {
                if let Err(e) = summary(dashboard).await {
                    error!(error = %e, "Summary failed");
                }
                Ok(())
            }
            SessionCommand::Help => {
                info!("{}", HELP);
                Ok(())
            }
            SessionCommand::Quit => break,
        };

        if let Err(e) = outcome {
            error!(error = %e, "Command failed");
        }
    }

    info!("Session ended");
    Ok(())
}
