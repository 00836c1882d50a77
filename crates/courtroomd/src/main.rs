//! Karma Courtroom - judge AITA posts from the terminal.
//!
//! Loads the config, selects the persistence backend, fills the working set,
//! and runs an interactive judging loop.

use anyhow::Result;
use clap::Parser;
use console::style;
use courtroomd::audit::AuditLog;
use courtroomd::auth::provider_from_config;
use courtroomd::session::SessionController;
use courtroomd::store::{LocalStatsStore, RemoteStatsStore, StatsStore};
use courtroomd::supply::RedditSupply;
use courtroom_common::{CourtroomConfig, Verdict};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "courtroomd", version, about = "Karma Courtroom session service")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "courtroom.toml")]
    config: PathBuf,

    /// Override the configured working-set size
    #[arg(long)]
    posts: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();
    let config = CourtroomConfig::load_or_default(&args.config);

    info!("Karma Courtroom v{} starting", env!("CARGO_PKG_VERSION"));

    let auth = provider_from_config(&config);
    let identity = auth.player();

    let local: Arc<dyn StatsStore> = Arc::new(LocalStatsStore::new(&config.storage.data_dir));
    let (primary, mirror): (Arc<dyn StatsStore>, Option<Arc<dyn StatsStore>>) =
        if auth.is_registered() && !config.storage.remote_url.is_empty() {
            info!("Persisting to remote record store at {}", config.storage.remote_url);
            let remote: Arc<dyn StatsStore> =
                Arc::new(RemoteStatsStore::new(&config.storage.remote_url));
            (remote, Some(local))
        } else {
            info!("Persisting to local store only");
            (local, None)
        };

    let mut supply = RedditSupply::new(&config.posts.source_url, config.posts.cache_ttl_secs);
    let count = args.posts.unwrap_or(config.posts.working_set);
    let working_set = supply.working_set(count).await;
    info!("Working set loaded: {} posts", working_set.len());

    let audit = AuditLog::new(&config.storage.data_dir);
    let mut session =
        SessionController::start(identity, primary, mirror, Some(audit), working_set).await?;

    println!(
        "{}",
        style("=== Karma Courtroom ===").bold().magenta()
    );
    println!(
        "Presiding: {} (rank: {})",
        style(&session.identity().display_name).bold(),
        session.record().stats.rank
    );
    println!("Verdicts: YTA, NTA, ESH, NAH. Commands: next, stats, board, reset, quit.\n");

    let stdin = io::stdin();
    loop {
        match session.current_post() {
            Some(post) => {
                println!("{}", style(&post.title).bold());
                println!(
                    "  by u/{} | score {} | {} comments",
                    post.author, post.score, post.num_comments
                );
            }
            None => {
                println!("No posts available.");
                break;
            }
        }

        print!("{} ", style("verdict>").cyan());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim().to_lowercase().as_str() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "n" | "next" => {
                session.advance();
            }
            "stats" => print_stats(&session),
            "board" | "leaderboard" => match session.leaderboard(10).await {
                Ok(board) if board.is_empty() => println!("No ranked judges yet.\n"),
                Ok(board) => {
                    for entry in board {
                        println!(
                            "{:>3}. {:<20} {:>6} XP  {}  ({}% accurate)",
                            entry.position, entry.uid, entry.xp, entry.rank, entry.accuracy
                        );
                    }
                    println!();
                }
                Err(err) => println!("Leaderboard unavailable: {err:#}\n"),
            },
            "reset" => {
                session.reset().await;
                println!("Stats reset.\n");
            }
            input => match input.parse::<Verdict>() {
                Ok(verdict) => {
                    match session.submit(verdict).await {
                        Ok(review) => print_review(&session, &review),
                        Err(err) => println!("{err}"),
                    }
                    session.advance();
                }
                Err(_) => println!("Unknown input '{input}'. Try YTA, NTA, ESH, or NAH."),
            },
        }
    }

    println!("Court adjourned.");
    Ok(())
}

fn print_review(session: &SessionController, review: &courtroomd::session::JudgmentReview) {
    let stats = &session.record().stats;
    if review.correct {
        println!(
            "{} The community agreed: {} ({:+} XP)",
            style("CORRECT!").green().bold(),
            review.reference_verdict.label(),
            review.xp_delta
        );
    } else {
        println!(
            "{} The community said {} ({:+} XP)",
            style("MISS.").red().bold(),
            review.reference_verdict.label(),
            review.xp_delta
        );
    }
    for id in &review.unlocked {
        if let Some(challenge) = session.record().challenges.iter().find(|c| &c.id == id) {
            println!(
                "{} Challenge complete: {} (+{} XP)",
                style("*").yellow(),
                challenge.title,
                challenge.reward
            );
        }
    }
    println!(
        "XP {} | streak {} (best {}) | {}\n",
        stats.xp, stats.current_streak, stats.best_streak, stats.rank
    );
}

fn print_stats(session: &SessionController) {
    let stats = &session.record().stats;
    println!("Judgments: {} ({} correct, {}% accuracy)", stats.total_judgments, stats.correct_judgments, stats.accuracy());
    println!("Streak: {} (best {})", stats.current_streak, stats.best_streak);
    println!("XP: {} | Level {} | {}", stats.xp, stats.level, stats.rank);
    for challenge in &session.record().challenges {
        let mark = if challenge.completed { "x" } else { " " };
        println!(
            "  [{}] {}: {}/{} (+{} XP)",
            mark, challenge.title, challenge.progress.min(challenge.target), challenge.target, challenge.reward
        );
    }
    println!();
}
