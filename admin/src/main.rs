//! Operator tasks for the tennis pick league.

#![warn(clippy::all, clippy::pedantic)]

use league_common::config::{LeagueConfig, load_dotenv};
use league_common::leaderboard::{EventBreakdown, Standing};
use league_common::league::League;
use league_common::scoring::ScoringTable;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    config: LeagueConfig,

    /// Show additional output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema, the season's events and the default scoring table
    Init,
    /// Print the season leaderboard
    Standings,
    /// Print picks and points for one event, or for every event with picks
    Breakdown {
        /// Event id, e.g. AO2026
        event_id: Option<String>,
    },
    /// Print the scoring table
    Scoring,
}

fn print_standings(standings: &[Standing]) {
    if standings.is_empty() {
        println!("Nobody has joined the league yet.");
        return;
    }
    for s in standings {
        let medal = s.medal.map_or("  ", |m| m.emoji());
        println!("{:>3}. {medal} {:<24} {:>5}", s.rank, s.person, s.points);
    }
}

fn print_breakdown(breakdown: &EventBreakdown) {
    println!(
        "=== {} {} ({}) ===",
        breakdown.event.event_id, breakdown.event.name, breakdown.event.category
    );
    if breakdown.rows.is_empty() {
        println!("No picks yet.");
    }
    for row in &breakdown.rows {
        let round = row.round.map_or("-", |r| r.as_str());
        println!(
            "{:<24} {:<28} {:<5} {:>5}",
            row.person, row.player, round, row.points
        );
    }
    println!();
}

fn print_scoring(table: &ScoringTable) {
    for rule in table.rules() {
        println!("{:<5} {:>5}", rule.round, rule.points);
    }
    let missing = table.missing_rounds();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
        println!("WARNING: no points configured for {}", labels.join(", "));
    }
}

fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    let level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let store = cli.config.open_store()?;
    let league = League::new(
        store,
        cli.config.league_year,
        cli.config.commissioner_key.clone(),
    );

    match cli.command {
        Command::Init => {
            let summary = league.seed_season()?;
            println!(
                "Season {} ready: {} events and {} scoring rules inserted.",
                league.year(),
                summary.events_inserted,
                summary.scoring_rules_inserted
            );
        }
        Command::Standings => {
            println!("=== {} LEADERBOARD ===", league.year());
            print_standings(&league.standings()?);
        }
        Command::Breakdown { event_id } => match event_id {
            Some(event_id) => print_breakdown(&league.event_breakdown(&event_id)?),
            None => {
                let breakdown = league.season_breakdown()?;
                if breakdown.is_empty() {
                    println!("No picks have been made this season.");
                }
                for event in &breakdown {
                    print_breakdown(event);
                }
            }
        },
        Command::Scoring => print_scoring(&league.scoring_table()?),
    }

    Ok(())
}
