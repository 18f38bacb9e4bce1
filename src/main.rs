use clap::{Parser, Subcommand};
use wealth_tiers::{
    config::Settings,
    models::{TierStanding, UserProfile},
    sources::{DemoSource, JsonFileSource, ProfileSource},
    tiers::{Leaderboard, LeaderboardBuilder, TierModel},
    Decimal,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "wealth-tiers")]
#[clap(about = "Net-worth tiers, progress and leaderboards", long_about = None)]
struct Cli {
    /// Settings file (defaults to config/default + config/local + env)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the tier for a value and progress toward the next one
    Tier {
        /// Net worth in USD
        #[clap(short, long, allow_negative_numbers = true)]
        value: Decimal,
    },

    /// Evaluate a single profile
    Profile {
        /// Display name or handle
        #[clap(short, long)]
        id: String,

        /// Net worth in USD
        #[clap(short, long, allow_negative_numbers = true)]
        value: Decimal,

        /// Print the standing as JSON
        #[clap(long)]
        json: bool,
    },

    /// List the configured tiers
    Tiers,

    /// Rank profiles from a JSON file or generated demo data
    Leaderboard {
        /// JSON array of {"identifier", "metric_value"} records
        #[clap(short, long, conflicts_with = "demo")]
        file: Option<PathBuf>,

        /// Number of synthetic profiles to generate
        #[clap(long)]
        demo: Option<usize>,

        /// Seed for synthetic profiles
        #[clap(long)]
        seed: Option<u64>,

        /// Rows to print
        #[clap(short, long)]
        top: Option<usize>,

        /// Print the leaderboard as JSON
        #[clap(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; a settings file that exists but is broken aborts
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info");
            error!("Failed to load settings: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&settings.app.log_level);

    // Reject a bad tier list before doing anything with it
    let model = match settings.tier_model() {
        Ok(model) => model,
        Err(e) => {
            error!("Invalid settings: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Tier { value } => {
            let standing = model.evaluate(&UserProfile::new("value", value));
            print_standing(&standing);
        }

        Commands::Profile { id, value, json } => {
            info!("Evaluating profile: {}", id);
            let standing = model.evaluate(&UserProfile::new(id, value));

            if json {
                println!("{}", serde_json::to_string_pretty(&standing)?);
            } else {
                println!("\n=== {} ===", standing.identifier);
                print_standing(&standing);
            }
        }

        Commands::Tiers => {
            print_tiers(&model);
        }

        Commands::Leaderboard { file, demo, seed, top, json } => {
            let source: Box<dyn ProfileSource> = match file {
                Some(path) => Box::new(JsonFileSource::new(path)),
                None => Box::new(DemoSource::new(
                    demo.unwrap_or(settings.leaderboard.demo_profiles),
                    seed.unwrap_or(settings.leaderboard.demo_seed),
                )),
            };

            let builder = LeaderboardBuilder::new(model);
            let leaderboard = builder.build(source.as_ref()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&leaderboard)?);
            } else {
                print_leaderboard(&leaderboard, top.unwrap_or(settings.leaderboard.default_top));
            }
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn print_standing(standing: &TierStanding) {
    println!("Net worth: ${:.2}", standing.metric_value);
    println!("Tier: {}", standing.tier_name());

    match (standing.next_name(), standing.remaining_to_next()) {
        (Some(next), Some(remaining)) => {
            println!(
                "Progress to {}: {} {:.1}% (${:.2} to go)",
                next,
                progress_bar(standing.progress, 20),
                standing.progress * 100.0,
                remaining
            );
        }
        _ => println!("Top tier reached {}", progress_bar(standing.progress, 20)),
    }
}

fn print_tiers(model: &TierModel) {
    println!("\n=== Tiers ===");
    for tier in model.tiers() {
        match tier.max_value {
            Some(max) => println!("  {:<10} ${} - ${}", tier.name, tier.min_value, max),
            None => println!("  {:<10} ${}+", tier.name, tier.min_value),
        }
    }
}

fn print_leaderboard(leaderboard: &Leaderboard, top: usize) {
    println!("\n=== Leaderboard ({} data) ===", leaderboard.origin());

    for entry in leaderboard.top(top) {
        let standing = &entry.standing;
        println!(
            "{:>4}. {:<24} ${:>16.2}  {:<10} {} {:>5.1}%",
            entry.rank,
            standing.identifier,
            standing.metric_value,
            standing.tier_name(),
            progress_bar(standing.progress, 10),
            standing.progress * 100.0
        );
    }

    println!("\nMembers per tier:");
    for (name, count) in leaderboard.tier_counts() {
        println!("  {:<10} {}", name, count);
    }

    if leaderboard.unranked_count() > 0 {
        println!("  {:<10} {}", "Unranked", leaderboard.unranked_count());
    }
}
