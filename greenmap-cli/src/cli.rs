use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};

use greenmap_core::{
    ApiClient, CityQueryOrchestrator, Config, MarkerLayer, ReviewListController,
    ReviewSubmissionController, Severity,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "greenmap", version, about = "City heat, housing and tree-planting dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather, heat intensity, housing and reviews for a city.
    Query {
        /// City name; falls back to the configured default city.
        city: Option<String>,
    },

    /// Create or delete city reviews.
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Set the API base URL and the default city.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum ReviewAction {
    /// Submit a review for a city.
    Add {
        /// City the review is for; falls back to the configured default.
        city: Option<String>,

        /// Review text; prompted for when absent.
        #[arg(long)]
        text: Option<String>,

        /// Whole-number rating; prompted for when absent.
        #[arg(long)]
        rating: Option<String>,
    },

    /// Delete a review by its server-assigned id.
    Delete {
        /// Id of the review to delete.
        id: String,

        /// City the review belongs to; falls back to the configured default.
        city: Option<String>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Query { city } => {
                let config = Config::load()?;
                let city = resolve_city(city, &config)?;
                let mut orchestrator = orchestrator_from_config(&config);

                orchestrator.run_query(&city).await?;
                render(&mut orchestrator);
            }
            Command::Review { action } => run_review(action).await?,
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

async fn run_review(action: ReviewAction) -> anyhow::Result<()> {
    let config = Config::load()?;

    match action {
        ReviewAction::Add { city, text, rating } => {
            let city = resolve_city(city, &config)?;
            let text = match text {
                Some(text) => text,
                None => Text::new("Your review:").prompt()?,
            };
            let rating = match rating {
                Some(rating) => rating,
                None => Text::new("Rating (whole number):").prompt()?,
            };

            let mut orchestrator = orchestrator_from_config(&config);
            let mut form = ReviewSubmissionController::new(text, rating);
            form.submit(&city, &mut orchestrator).await?;
            render(&mut orchestrator);
        }
        ReviewAction::Delete { id, city, yes } => {
            let city = resolve_city(city, &config)?;
            let mut orchestrator = orchestrator_from_config(&config);

            // Reviews are fetched first so the refresh after a delete has a
            // current city to work from, matching the page flow.
            orchestrator.run_query(&city).await?;
            orchestrator.dashboard.drain_notices();

            let mut list = ReviewListController::new(&mut orchestrator);
            list.delete_review(&city, &id, || {
                yes || Confirm::new("Are you sure you want to delete this review?")
                    .with_default(false)
                    .prompt()
                    .unwrap_or(false)
            })
            .await?;

            render(&mut orchestrator);
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("API base URL:")
        .with_initial_value(config.base_url())
        .prompt()
        .context("Failed to read API base URL")?;
    config.set_base_url(base_url);

    let default_city = Text::new("Default city (leave empty to skip):")
        .with_initial_value(config.default_city().unwrap_or(""))
        .prompt()
        .context("Failed to read default city")?;
    if !default_city.trim().is_empty() {
        config.set_default_city(default_city.trim().to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn orchestrator_from_config(config: &Config) -> CityQueryOrchestrator {
    CityQueryOrchestrator::new(Box::new(ApiClient::new(config.base_url())))
}

fn resolve_city(city: Option<String>, config: &Config) -> anyhow::Result<String> {
    if let Some(city) = city {
        return Ok(city);
    }
    match config.default_city() {
        Some(city) => Ok(city.to_string()),
        None => bail!(
            "No city given and no default city configured.\n\
             Hint: pass a city name, or run `greenmap configure` to set a default."
        ),
    }
}

/// Prints the dashboard regions and a summary of the map layers, then the
/// notices accumulated by the last action.
fn render(orchestrator: &mut CityQueryOrchestrator) {
    if let Some(city_line) = &orchestrator.dashboard.city_line {
        println!("{city_line}");
    }
    if let Some(weather_line) = &orchestrator.dashboard.weather_line {
        println!("{weather_line}");
    }

    let map = &orchestrator.map;
    let center = map.center();
    println!("Map: centered at {:.4}, {:.4} (zoom {})", center.lat, center.lon, map.zoom());
    println!("Heat overlay: {} points", map.heat_points().len());
    println!(
        "Property/residence markers: {}",
        map.markers(MarkerLayer::Properties).len()
    );
    println!("Tree-zone markers: {}", map.markers(MarkerLayer::TreeZones).len());

    if !orchestrator.dashboard.residences.is_empty() {
        println!("Residences:");
        for residence in &orchestrator.dashboard.residences {
            println!("  - {residence}");
        }
    }

    if orchestrator.dashboard.reviews.is_empty() {
        println!("No reviews yet.");
    } else {
        println!("Reviews:");
        for review in &orchestrator.dashboard.reviews {
            println!("  [{}] {} (rating: {})", review.id, review.text, review.rating);
        }
    }

    for notice in orchestrator.dashboard.drain_notices() {
        match notice.severity {
            Severity::Error => eprintln!("error: {}", notice.message),
            Severity::Info => println!("note: {}", notice.message),
        }
    }
}
