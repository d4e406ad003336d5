//! Tournament CLI
//!
//! Play judged rounds between ai and human papers and track ratings.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use llm_judge::ChatJudge;
use paper_core::{utc_now_iso, Judge, UnavailableJudge};
use tournament::{
    format_leaderboard, format_round, normalize_entries, rating_model, touch_matched,
    ConsistencyArbiter, HistorySummary, RoundRunner, StateMeta, StateStore, TournamentConfig,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "tournament", version, about = "AI vs human paper tournament")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "tournament.toml")]
    config: PathBuf,

    /// Override the state directory
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one round of matches and save the results
    Round {
        /// Matches to play (defaults to the configured count)
        #[arg(short, long)]
        matches: Option<usize>,

        /// Skip the judge backend and use seeded fallback scoring
        #[arg(long)]
        offline: bool,
    },
    /// Print papers ranked by conservative score
    Leaderboard,
    /// Print match history totals and recent matches
    Summary {
        /// Emit JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn run_round(
    config: &TournamentConfig,
    store: &StateStore,
    matches: Option<usize>,
    offline: bool,
) -> anyhow::Result<()> {
    let judge: Box<dyn Judge> = if offline {
        Box::new(UnavailableJudge)
    } else {
        let timeout = Duration::from_secs(config.judge_timeout_secs);
        Box::new(ChatJudge::new(timeout).context("failed to build judge HTTP client")?)
    };
    let runner =
        RoundRunner::new(ConsistencyArbiter::new(judge), rating_model(config.rating_model));

    let mut papers = store.load_papers()?;
    normalize_entries(&mut papers);
    let history = store.load_matches()?;
    let existing = history.len();

    let match_count = matches.unwrap_or(config.matches_per_round);
    info!(
        papers = papers.len(),
        existing,
        match_count,
        judge = %config.judge_model,
        rating = runner.rating_model().name(),
        offline,
        "Starting round"
    );

    let (history, stats) = runner.run_round(&mut papers, history, &config.judge_model, match_count);
    touch_matched(&mut papers, &history[existing..]);

    store.save_papers(&papers)?;
    store.save_matches(&history)?;
    store.save_meta(&StateMeta {
        last_cycle_at: utc_now_iso(),
        total_papers: papers.len(),
        total_matches: history.len(),
        judge_model: config.judge_model.clone(),
        rating_model: runner.rating_model().name().to_string(),
    })?;
    info!(created = stats.matches_created, total = history.len(), "Round saved");

    println!("{}", format_round(&stats, history.len()));
    println!("{}", format_leaderboard(&papers));
    Ok(())
}

fn show_leaderboard(store: &StateStore) -> anyhow::Result<()> {
    let papers = store.load_papers()?;
    if papers.is_empty() {
        println!("No papers in {}", store.papers_path().display());
        return Ok(());
    }
    println!("{}", format_leaderboard(&papers));
    Ok(())
}

fn show_summary(config: &TournamentConfig, store: &StateStore, json: bool) -> anyhow::Result<()> {
    let matches = store.load_matches()?;
    let summary = HistorySummary::from_matches(&matches, config.recent_limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(meta) = store.load_meta()? {
        println!(
            "Last round: {} ({} judge, {} ratings)\n",
            meta.last_cycle_at, meta.judge_model, meta.rating_model
        );
    }
    println!("{}", summary.generate_report());
    println!(
        "Swap-consistent among recent: {:.0}%",
        summary.recent_consistency() * 100.0
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = TournamentConfig::load(&cli.config)?.apply_env()?;
    if let Some(dir) = cli.state_dir {
        config.state_dir = dir;
    }
    let store = StateStore::new(&config.state_dir);

    match cli.command {
        Command::Round { matches, offline } => run_round(&config, &store, matches, offline),
        Command::Leaderboard => show_leaderboard(&store),
        Command::Summary { json } => show_summary(&config, &store, json),
    }
}
