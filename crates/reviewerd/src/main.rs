//! reviewerd - reviewer-assignment daemon
//!
//! Builds an in-memory `ReviewerAssigner`, optionally seeds it with team
//! rosters from a JSON file, and reports readiness.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, Level};

use reviewer_core::Member;
use reviewer_service::telemetry::init_tracing;
use reviewer_service::{ReviewerAssigner, ServiceConfig, DEFAULT_REVIEWERS_PER_PR};

#[derive(Parser, Debug)]
#[command(name = "reviewerd")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Automatic code-review assignment daemon", long_about = None)]
struct Cli {
    /// Reviewers requested per new pull request
    #[arg(long, env = "REVIEWERD_REVIEWERS_PER_PR", default_value_t = DEFAULT_REVIEWERS_PER_PR)]
    reviewers_per_pr: usize,

    /// Seed for reviewer selection (random when omitted)
    #[arg(long, env = "REVIEWERD_RNG_SEED")]
    rng_seed: Option<u64>,

    /// JSON file with team rosters to register at startup
    #[arg(long, env = "REVIEWERD_ROSTER")]
    roster: Option<PathBuf>,

    /// Emit JSON-formatted log lines
    #[arg(long, env = "REVIEWERD_LOG_JSON")]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn service_config(&self) -> ServiceConfig {
        let config = ServiceConfig::default().with_reviewers_per_pr(self.reviewers_per_pr);
        match self.rng_seed {
            Some(seed) => config.with_rng_seed(seed),
            None => config,
        }
    }
}

/// One team in a roster file.
#[derive(Debug, Deserialize)]
struct RosterTeam {
    team_name: String,
    members: Vec<RosterMember>,
}

#[derive(Debug, Deserialize)]
struct RosterMember {
    user_id: String,
    username: String,
    is_active: bool,
}

impl From<RosterMember> for Member {
    fn from(m: RosterMember) -> Self {
        Member::new(m.user_id, m.username, m.is_active)
    }
}

fn read_roster(path: &Path) -> Result<Vec<RosterTeam>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse roster {}", path.display()))
}

/// Register every team in the roster; returns (teams, members) loaded.
async fn load_roster(app: &ReviewerAssigner, teams: Vec<RosterTeam>) -> Result<(usize, usize)> {
    let mut team_count = 0;
    let mut member_count = 0;
    for team in teams {
        let members: Vec<Member> = team.members.into_iter().map(Member::from).collect();
        let stored = app
            .teams
            .add_team(&team.team_name, &members)
            .await
            .with_context(|| format!("failed to register team {}", team.team_name))?;
        team_count += 1;
        member_count += stored.members.len();
    }
    Ok((team_count, member_count))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json, level);

    let app = ReviewerAssigner::in_memory(cli.service_config());

    let (teams, members) = match &cli.roster {
        Some(path) => load_roster(&app, read_roster(path)?).await?,
        None => (0, 0),
    };

    info!(
        event = "reviewerd.ready",
        reviewers_per_pr = app.config().reviewers_per_pr,
        seeded = app.config().rng_seed.is_some(),
        teams,
        members,
        "reviewerd ready"
    );
    Ok(())
}
