use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use motocal::export::write_csv_file;
use motocal::scraper::CalendarScraper;
use motocal::utils::{CalendarStats, EventFilter};

#[derive(Parser)]
#[command(name = "motocal")]
#[command(about = "A motogp.com calendar scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List calendar events with their resolved session times
    List {
        #[arg(long, default_value_t = 2026, help = "Season year used to place weekday codes")]
        season: i32,

        #[arg(long, help = "Filter by host city (case-insensitive substring)")]
        city: Option<String>,

        #[arg(long, help = "Maximum number of results to return")]
        limit: Option<usize>,

        #[arg(long, help = "Number of results to skip from the beginning")]
        offset: Option<usize>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Fetch the calendar and write it as a CSV schedule
    Export {
        #[arg(long, default_value_t = 2026, help = "Season year used to place weekday codes")]
        season: i32,

        #[arg(long, help = "Filter by host city (case-insensitive substring)")]
        city: Option<String>,

        #[arg(
            long,
            default_value = "motogp_schedule.csv",
            help = "Path of the CSV file to write"
        )]
        out: PathBuf,
    },
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = CalendarScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    match cli.command {
        Commands::List {
            season,
            city,
            limit,
            offset,
            format,
        } => {
            let filter = EventFilter {
                city,
                limit,
                offset,
            };
            let filter = filter.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            let events = scraper.fetch_calendar(season).await.unwrap_or_else(|e| {
                log::error!("Error fetching calendar: {}", e);
                process::exit(1);
            });
            let events = filter.apply(events);

            match format {
                OutputFormat::Json => serialize_json(&events),
                OutputFormat::Text => {
                    if events.is_empty() {
                        println!("No events to display.");
                    } else {
                        for event in &events {
                            println!("{}", event);
                        }
                        print!("{}", CalendarStats::from_events(&events));
                    }
                }
            }
        }

        Commands::Export { season, city, out } => {
            let filter = EventFilter {
                city,
                ..Default::default()
            };

            let events = scraper.fetch_calendar(season).await.unwrap_or_else(|e| {
                log::error!("Error fetching calendar: {}", e);
                process::exit(1);
            });
            let events = filter.apply(events);

            write_csv_file(&events, &out).unwrap_or_else(|e| {
                log::error!("Error writing CSV: {}", e);
                process::exit(1);
            });

            log::info!("Wrote {} events to {}", events.len(), out.display());
        }
    }
}
