//! Courtside CLI
//!
//! Thin wrapper around courtside-core for scorers and analysts who want the
//! numbers without the app.
//!
//! ## Usage
//!
//! ```bash
//! # Shooting and efficiency for one stat line
//! courtside metrics --pts 20 --fgm 7 --fga 14 --fg3m 2 --fg3a 5 --ftm 4 --fta 6
//!
//! # Box score from a JSON array of player stats
//! courtside box-score game.json
//!
//! # Four factors and ratings from {"team": {...}, "opponent": {...}}
//! courtside team matchup.json
//!
//! # Zone breakdown and heat map from a JSON array of shots
//! courtside shots shots.json --cols 5 --rows 5
//!
//! # Ranked lineups from a lineup document
//! courtside lineups lineups.json --sort plus-minus --min-minutes 4
//!
//! # Walk through a free-throw sequence
//! courtside free-throws --one-and-one --results made,missed
//!
//! # Export link for a game
//! courtside export game_01 --format pdf --sections box_score,shot_chart --heat-map
//!
//! # Effective configuration
//! courtside config show
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use courtside_core::flows::{record_free_throw, FreeThrowSequence};
use courtside_core::lineups::{rank_lineups, rank_pairs, LineupQuery, LineupSort};
use courtside_core::metrics::{MetricKind, PlayerMetrics, TeamComparison};
use courtside_core::shots::{zone_breakdown, HeatMap};
use courtside_core::{
    team_totals, ClientConfig, ColorScheme, ExportFormat, ExportRequest, ExportSection, GameId,
    LineupData, MemoryBackend, PlayerId, PlayerStat, ShotLocation, StatLine,
};
use serde::Deserialize;

/// Courtside - basketball stat tracking
#[derive(Parser)]
#[command(name = "courtside")]
#[command(version = "0.1.0")]
#[command(about = "Courtside - basketball stat tracking")]
#[command(
    long_about = "Derived basketball metrics, shot charts, lineup tables and export links for games tracked with Courtside."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (default: <config dir>/courtside/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Metrics for a single stat line
    Metrics {
        #[command(flatten)]
        line: StatArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Box score with derived metrics from a player stats file
    BoxScore {
        /// JSON array of player stats
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Four factors and ratings for a team against its opponent
    Team {
        /// JSON object with "team" and "opponent" stat lines
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Shooting by court zone and a heat map
    Shots {
        /// JSON array of shots
        file: PathBuf,

        /// Heat map columns (1-200)
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=200))]
        cols: u16,

        /// Heat map rows (1-200)
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=200))]
        rows: u16,

        #[arg(long)]
        json: bool,
    },

    /// Ranked five-player lineups and two-player pairs
    Lineups {
        /// JSON lineup document ({"lineups": [...], "pairs": [...]})
        file: PathBuf,

        /// minutes, plus-minus or net-rating
        #[arg(short, long, default_value = "minutes")]
        sort: String,

        /// Hide units with fewer minutes together
        #[arg(long, default_value = "0")]
        min_minutes: f64,

        /// Show at most this many rows per table
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run a free-throw sequence against an in-memory backend
    FreeThrows {
        /// Attempts awarded (1-3)
        #[arg(short, long, default_value = "2")]
        attempts: u8,

        /// Bonus 1-and-1 (overrides --attempts)
        #[arg(long)]
        one_and_one: bool,

        /// Comma-separated results, e.g. made,missed
        #[arg(short, long, value_delimiter = ',')]
        results: Vec<String>,
    },

    /// Print the export link for a game
    Export {
        /// Game ID
        game_id: String,

        /// pdf or csv
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Comma-separated sections (box_score, player_stats, team_stats,
        /// shot_chart, play_by_play, lineups)
        #[arg(short, long, value_delimiter = ',', default_value = "box_score")]
        sections: Vec<String>,

        /// light or dark (default: from config)
        #[arg(short, long)]
        theme: Option<String>,

        /// Include the shot heat map (PDF only)
        #[arg(long)]
        heat_map: bool,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
}

/// Counting stats for `metrics`
#[derive(clap::Args)]
struct StatArgs {
    #[arg(long, default_value = "0")]
    pts: u32,
    #[arg(long, default_value = "0")]
    reb: u32,
    #[arg(long, default_value = "0")]
    oreb: u32,
    #[arg(long, default_value = "0")]
    dreb: u32,
    #[arg(long, default_value = "0")]
    ast: u32,
    #[arg(long, default_value = "0")]
    stl: u32,
    #[arg(long, default_value = "0")]
    blk: u32,
    #[arg(long, default_value = "0")]
    tov: u32,
    #[arg(long, default_value = "0")]
    pf: u32,
    #[arg(long, default_value = "0")]
    fgm: u32,
    #[arg(long, default_value = "0")]
    fga: u32,
    #[arg(long, default_value = "0")]
    fg3m: u32,
    #[arg(long, default_value = "0")]
    fg3a: u32,
    #[arg(long, default_value = "0")]
    ftm: u32,
    #[arg(long, default_value = "0")]
    fta: u32,
    /// Minutes played
    #[arg(long, default_value = "0")]
    min: f64,
}

impl StatArgs {
    fn to_line(&self) -> StatLine {
        StatLine {
            points: self.pts,
            rebounds: self.reb.max(self.oreb.saturating_add(self.dreb)),
            offensive_rebounds: self.oreb,
            defensive_rebounds: self.dreb,
            assists: self.ast,
            steals: self.stl,
            blocks: self.blk,
            turnovers: self.tov,
            fouls: self.pf,
            field_goals_made: self.fgm,
            field_goals_attempted: self.fga,
            three_pointers_made: self.fg3m,
            three_pointers_attempted: self.fg3a,
            free_throws_made: self.ftm,
            free_throws_attempted: self.fta,
            minutes_played: self.min,
        }
    }
}

#[derive(Deserialize)]
struct Matchup {
    team: StatLine,
    opponent: StatLine,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Read and parse a JSON input file
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_metrics(metrics: &PlayerMetrics) {
    for kind in MetricKind::ALL {
        let value = match kind {
            MetricKind::TrueShooting => metrics.true_shooting_pct,
            MetricKind::EffectiveFieldGoal => metrics.effective_fg_pct,
            MetricKind::FieldGoal => metrics.field_goal_pct,
            MetricKind::ThreePoint => metrics.three_point_pct,
            MetricKind::FreeThrow => metrics.free_throw_pct,
        };
        let rating = metrics
            .shooting_rating(kind)
            .map(|r| format!(" ({})", r.as_str()))
            .unwrap_or_default();
        println!("  {:<6}{:>6.1}{}", kind.abbreviation(), value, rating);
    }
    println!("  {:<6}{:>6}", "GER", metrics.game_efficiency_rating);
    println!("  {:<6}{:>6.1}", "PER", metrics.player_efficiency_rating);
    println!("  {:<6}{:>6.1}", "A/TO", metrics.assist_to_turnover);
    println!("  {:<6}{:>6.1}", "TOV%", metrics.turnover_rate);
    println!("  {:<6}{:>6.1}", "FTr", metrics.free_throw_rate);
}

fn box_score_row(label: &str, line: &StatLine) {
    let m = PlayerMetrics::from_line(line);
    println!(
        "{:<20}{:>4}{:>4}{:>4}{:>8}{:>8}{:>8}{:>7.1}{:>5}",
        label,
        line.points,
        line.rebounds,
        line.assists,
        format!("{}-{}", line.field_goals_made, line.field_goals_attempted),
        format!("{}-{}", line.three_pointers_made, line.three_pointers_attempted),
        format!("{}-{}", line.free_throws_made, line.free_throws_attempted),
        m.true_shooting_pct,
        m.game_efficiency_rating,
    );
}

fn name_or_id<'a>(name: &'a str, id: &'a PlayerId) -> &'a str {
    if name.is_empty() {
        id.as_str()
    } else {
        name
    }
}

fn parse_result(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "made" | "make" | "m" | "1" => Ok(true),
        "missed" | "miss" | "x" | "0" => Ok(false),
        other => anyhow::bail!("Invalid free-throw result '{}': use made or missed", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = ClientConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Metrics { line, json } => {
            let line = line.to_line();
            let metrics = PlayerMetrics::from_line(&line);
            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("Metrics:");
                print_metrics(&metrics);
            }
        }

        Commands::BoxScore { file, json } => {
            let players: Vec<PlayerStat> = read_json(&file)?;
            let totals = team_totals(&players);

            if json {
                let rows: Vec<_> = players
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "player": p,
                            "metrics": PlayerMetrics::from_line(&p.stats),
                        })
                    })
                    .collect();
                let doc = serde_json::json!({
                    "players": rows,
                    "totals": totals,
                    "totalsMetrics": PlayerMetrics::from_line(&totals),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else if players.is_empty() {
                println!("No players found.");
            } else {
                println!(
                    "{:<20}{:>4}{:>4}{:>4}{:>8}{:>8}{:>8}{:>7}{:>5}",
                    "PLAYER", "PTS", "REB", "AST", "FG", "3P", "FT", "TS%", "GER"
                );
                for player in &players {
                    box_score_row(&player.label(), &player.stats);
                }
                box_score_row("TOTAL", &totals);
            }
        }

        Commands::Team { file, json } => {
            let matchup: Matchup = read_json(&file)?;
            let comparison = TeamComparison::new(&matchup.team, &matchup.opponent);

            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!("{:<12}{:>8}{:>8}", "", "TEAM", "OPP");
                let rows = [
                    (
                        "eFG%",
                        comparison.team.effective_fg_pct,
                        comparison.opponent.effective_fg_pct,
                    ),
                    ("TOV%", comparison.team.turnover_rate, comparison.opponent.turnover_rate),
                    (
                        "OREB%",
                        comparison.team.offensive_rebound_pct,
                        comparison.opponent.offensive_rebound_pct,
                    ),
                    ("FTr", comparison.team.free_throw_rate, comparison.opponent.free_throw_rate),
                    ("Poss", comparison.possessions, comparison.opponent_possessions),
                ];
                for (label, team, opp) in rows {
                    println!("{:<12}{:>8.1}{:>8.1}", label, team, opp);
                }
                println!();
                println!("Offensive rating: {:.1}", comparison.offensive_rating);
                println!("Defensive rating: {:.1}", comparison.defensive_rating);
                println!("Net rating: {:+.1}", comparison.net_rating);
            }
        }

        Commands::Shots {
            file,
            cols,
            rows,
            json,
        } => {
            let shots: Vec<ShotLocation> = read_json(&file)?;
            let (cols, rows) = (usize::from(cols), usize::from(rows));
            let zones = zone_breakdown(&shots);
            let map = HeatMap::build(&shots, cols, rows);

            if json {
                let grid: Vec<Vec<u32>> = (0..rows)
                    .map(|row| (0..cols).map(|col| map.count(col, row)).collect())
                    .collect();
                let doc = serde_json::json!({ "zones": zones, "heatMap": grid });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("Shots: {}", shots.len());
                println!();
                for zone in &zones {
                    println!(
                        "  {:<20}{:>3}/{:<3}{:>7.1}%",
                        zone.zone.label(),
                        zone.made,
                        zone.attempts,
                        zone.pct
                    );
                }
                println!();
                println!("Heat map (baseline at top):");
                for row in 0..rows {
                    let cells: Vec<String> =
                        (0..cols).map(|col| format!("{:>4}", map.count(col, row))).collect();
                    println!("  {}", cells.join(""));
                }
            }
        }

        Commands::Lineups {
            file,
            sort,
            min_minutes,
            limit,
        } => {
            let data: LineupData = read_json(&file)?;
            let query = LineupQuery {
                sort: sort.parse::<LineupSort>()?,
                min_minutes,
                limit,
                player: None,
            };

            let lineups = rank_lineups(&data, &query);
            if lineups.is_empty() {
                println!("No lineups found.");
            } else {
                println!("Lineups ({}):", lineups.len());
                for entry in lineups {
                    println!(
                        "  {:>5.1} min  {:>+4}  {:>+6.1}  {}",
                        entry.minutes,
                        entry.plus_minus,
                        entry.net_rating,
                        entry.display_names()
                    );
                }
            }

            let pairs = rank_pairs(&data, &query);
            if !pairs.is_empty() {
                println!();
                println!("Pairs ({}):", pairs.len());
                for pair in pairs {
                    println!(
                        "  {:>5.1} min  {:>+4}  {} + {}",
                        pair.minutes,
                        pair.plus_minus,
                        name_or_id(&pair.player1_name, &pair.player1),
                        name_or_id(&pair.player2_name, &pair.player2)
                    );
                }
            }
        }

        Commands::FreeThrows {
            attempts,
            one_and_one,
            results,
        } => {
            let backend = MemoryBackend::new();
            let game_id = GameId::new();
            let shooter = PlayerId::new();
            let mut sequence = if one_and_one {
                FreeThrowSequence::one_and_one(game_id, shooter)
            } else {
                FreeThrowSequence::new(game_id, shooter, attempts, false)?
            };

            for result in &results {
                if sequence.is_complete() {
                    println!("Sequence already complete, ignoring '{}'", result);
                    continue;
                }
                let made = parse_result(result)?;
                let prompt = sequence.prompt();
                record_free_throw(&backend, &mut sequence, made).await?;
                println!("{}: {}", prompt, if made { "made" } else { "missed" });
            }

            println!();
            if sequence.is_complete() {
                println!("{}", sequence.prompt());
            } else {
                println!("Waiting on: {}", sequence.prompt());
            }
            println!("Backend calls: {}", backend.calls().len());
        }

        Commands::Export {
            game_id,
            format,
            sections,
            theme,
            heat_map,
        } => {
            let mut request = ExportRequest::new(GameId::from_string(game_id));
            request.format = format.parse::<ExportFormat>()?;
            request.sections = sections
                .iter()
                .map(|s| s.parse::<ExportSection>())
                .collect::<Result<_, _>>()?;
            request.theme = match theme {
                Some(theme) => theme.parse::<ColorScheme>()?,
                None => config.theme.resolve(ColorScheme::Light),
            };
            request.include_heat_map = heat_map;

            let url = request.to_url(&config.export_base_url)?;
            println!("{}", url);
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                match cli.config.or_else(ClientConfig::default_path) {
                    Some(path) if path.exists() => println!("# Config file: {}", path.display()),
                    _ => println!("# Config file: (none, using defaults)"),
                }
                print!("{}", config.to_toml()?);
            }
        },
    }

    Ok(())
}
