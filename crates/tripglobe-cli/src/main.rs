//! tripglobe-cli: Command-line interface for tripglobe-core
//!
//! Inspect a travel-record export the way the globe would cluster it, and
//! replay recorded interaction scripts to see which commands the core emits.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ tripglobe -i trips.json stats
//!
//! - Cluster by continent, country, or the cities of one country
//!   $ tripglobe -i trips.json clusters
//!   $ tripglobe -i trips.json clusters --mode country
//!   $ tripglobe -i trips.json clusters --mode city --country JP
//!
//! - Classify a country code
//!   $ tripglobe classify kor
//!
//! - Replay an event script with an instant renderer
//!   $ tripglobe -i trips.json.gz -v replay events.json --auto-complete
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::Path;
use tripglobe_core::continent::{self, country_flag};
use tripglobe_core::loader::load_locations_from_path;
use tripglobe_core::{
    build_clusters, stats, DisplayMode, GlobeCommand, GlobeConfig, GlobeEvent, GlobeSession,
    Location,
};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to initialize logging")?;

    let config = match &args.config {
        Some(path) => GlobeConfig::load_from_path(path)
            .with_context(|| format!("invalid configuration {}", path.display()))?,
        None => GlobeConfig::default(),
    };

    match args.command {
        Commands::Stats => {
            let locations = load(args.input.as_deref())?;
            let s = stats(&locations);
            println!("Trip statistics:");
            println!("  Locations: {}", s.locations);
            println!("  Countries: {}", s.countries);
            println!("  Continents: {}", s.continents);
        }

        Commands::Clusters {
            mode,
            country,
            json,
        } => {
            let locations = load(args.input.as_deref())?;
            let mode = DisplayMode::from(mode);
            if mode == DisplayMode::City && country.is_none() {
                bail!("--mode city needs --country <CODE>");
            }
            let entries = build_clusters(&locations, mode, country.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No entries for {mode:?}");
            } else {
                for e in &entries {
                    println!(
                        "{:<40} {:>4} {}  ({:.2}, {:.2})",
                        e.id,
                        e.member_count,
                        e.label(),
                        e.center_latitude,
                        e.center_longitude
                    );
                }
            }
        }

        Commands::Classify { code } => match continent::lookup(&code) {
            Some(info) => {
                let flag = country_flag(&code).unwrap_or_default();
                println!("Country: {} {}", info.name, flag);
                println!("ISO2: {}", info.iso2);
                println!("ISO3: {}", info.iso3);
                println!("Continent: {}", info.continent);
            }
            None => {
                eprintln!("Unknown country code: {code} (clustered as {})", continent::classify(&code));
            }
        },

        Commands::Replay {
            script,
            auto_complete,
        } => {
            let locations = load(args.input.as_deref())?;
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("cannot read script {}", script.display()))?;
            let events: Vec<GlobeEvent> =
                serde_json::from_str(&text).context("script is not a JSON array of events")?;
            replay(locations, config, events, auto_complete)?;
        }
    }

    Ok(())
}

fn load(input: Option<&Path>) -> anyhow::Result<Vec<Location>> {
    let Some(path) = input else {
        bail!("this command needs --input <FILE>");
    };
    let locations = load_locations_from_path(path)
        .with_context(|| format!("cannot load travel records from {}", path.display()))?;
    log::info!("{} locations loaded", locations.len());
    Ok(locations)
}

/// Print every command as one JSON line, prefixed with the event that caused it.
fn replay(
    locations: Vec<Location>,
    config: GlobeConfig,
    events: Vec<GlobeEvent>,
    auto_complete: bool,
) -> anyhow::Result<()> {
    let mut session = GlobeSession::new(locations, config)?;
    print_commands("start", &session.start())?;

    let mut queue: std::collections::VecDeque<GlobeEvent> = events.into();
    while let Some(event) = queue.pop_front() {
        let label = serde_json::to_string(&event)?;
        let commands = session.dispatch(event);
        print_commands(&label, &commands)?;
        if auto_complete {
            // Arrivals go ahead of the rest of the script.
            for cmd in commands.iter().rev() {
                if let GlobeCommand::MoveCamera(mv) = cmd {
                    queue.push_front(GlobeEvent::CameraTransitionCompleted {
                        generation: mv.generation,
                    });
                }
            }
        }
    }

    let state = session.state();
    println!(
        "# final: {:?}, expanded {:?}, stack depth {}",
        state.display_mode,
        state.expanded_country_code,
        state.drill_down_stack.len()
    );
    Ok(())
}

fn print_commands(label: &str, commands: &[GlobeCommand]) -> anyhow::Result<()> {
    println!("# {label}");
    for cmd in commands {
        println!("{}", serde_json::to_string(cmd)?);
    }
    Ok(())
}
