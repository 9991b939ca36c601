use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, GenerationController, HttpLabApi, LogPaginator, DEFAULT_POINT_COUNT,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Backend base URL; overrides lab.toml and LAB_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a point cloud, then print the first log page.
    Generate {
        #[arg(long, default_value = DEFAULT_POINT_COUNT)]
        count: String,
    },
    /// Print one page of stored logs.
    Logs {
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(api_url) = cli.api_url.as_deref() {
        settings = settings.with_api_url(api_url).context("invalid --api-url")?;
    }
    let api = HttpLabApi::new(&settings).context("failed to build http client")?;
    let mut logs = LogPaginator::new();

    match cli.command {
        Command::Generate { count } => {
            let mut generation = GenerationController::new(count);
            generation
                .generate(&api, &mut logs)
                .await
                .context("point generation failed")?;

            let points = generation.points();
            println!("received {} points", points.len());
            for point in points.iter().take(5) {
                println!("  ({:.3}, {:.3}, {:.3})", point.x, point.y, point.z);
            }
            if points.len() > 5 {
                println!("  ...");
            }
        }
        Command::Logs { start } => {
            logs.load_page(&api, start)
                .await
                .context("log page load failed")?;
        }
    }

    print_page(&logs);
    Ok(())
}

fn print_page(logs: &LogPaginator) {
    println!(
        "{} of {} (previous: {}, next: {})",
        logs.window_label(),
        logs.total()
            .map_or_else(|| "unknown".to_string(), |total| total.to_string()),
        if logs.can_previous() { "yes" } else { "no" },
        if logs.can_next() { "yes" } else { "no" },
    );
    for record in logs.records() {
        println!("ID: {}", record.id().unwrap_or("-"));
        println!("{}", record.display_text());
    }
}
