//! Battle Escrow Demo
//!
//! Runs the escrow against the in-memory host: one round with a clear
//! winner, one round that ends in a tie, then replays both and compares the
//! audit digests.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use battle_escrow::{
    Address, InMemoryHost, RoundId, ScoreOutcome, Settlement, VERSION,
    escrow::PARTICIPANTS_PER_ROUND,
};

/// Demo configuration.
#[derive(Debug, Clone)]
struct DemoConfig {
    /// Log filter directive.
    log_filter: String,
    /// Entry fee per round.
    fee: u64,
    /// Starting balance of every demo account.
    initial_balance: u64,
    /// Print the event log as JSON at the end.
    print_events: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            fee: 1_000,
            initial_balance: 1_000_000,
            print_events: false,
        }
    }
}

impl DemoConfig {
    /// Create config from environment variables.
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let fee = match std::env::var("ESCROW_DEMO_FEE") {
            Ok(v) => v.parse().context("ESCROW_DEMO_FEE must be an unsigned integer")?,
            Err(_) => defaults.fee,
        };
        let initial_balance = match std::env::var("ESCROW_INITIAL_BALANCE") {
            Ok(v) => v.parse().context("ESCROW_INITIAL_BALANCE must be an unsigned integer")?,
            Err(_) => defaults.initial_balance,
        };
        Ok(Self {
            log_filter: std::env::var("ESCROW_LOG").unwrap_or(defaults.log_filter),
            fee,
            initial_balance,
            print_events: std::env::var("ESCROW_EVENTS_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

fn main() -> Result<()> {
    let config = DemoConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("Battle Escrow v{}", VERSION);
    info!("Fee: {}, starting balance: {}", config.fee, config.initial_balance);

    let host = run_demo(&config)?;

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let replay = run_demo(&config)?;
    for id in [1, 2] {
        let original = host.round_digest(id)?;
        let replayed = replay.round_digest(id)?;
        info!("Round {} digest: {}", id, hex::encode(original));
        if original != replayed {
            bail!("round {} digest differs on replay", id);
        }
    }
    info!("DETERMINISM VERIFIED: Digests match!");

    if config.print_events {
        println!("{}", host.log.to_json()?);
    }
    Ok(())
}

/// Play one decided round and one tied round.
fn run_demo(config: &DemoConfig) -> Result<InMemoryHost> {
    let owner = Address::derive("owner");
    let players: Vec<Address> = ["ada", "bo", "cy", "dee"]
        .iter()
        .map(|label| Address::derive(label))
        .collect();

    let mut host = InMemoryHost::new();
    host.deploy(owner)?;
    for p in &players {
        host.ledger.fund(*p, config.initial_balance);
    }

    info!("=== Round With A Winner ===");
    let decided = play_round(&mut host, owner, &players, config.fee, [10, 20, 15, 5])?;
    report(&host, decided, &players)?;

    info!("=== Round With A Tie ===");
    let tied = play_round(&mut host, owner, &players, config.fee, [10, 20, 20, 5])?;
    report(&host, tied, &players)?;

    info!("Owner balance: {}", host.ledger.balance(&owner));
    Ok(host)
}

fn play_round(
    host: &mut InMemoryHost,
    owner: Address,
    players: &[Address],
    fee: u64,
    scores: [u32; PARTICIPANTS_PER_ROUND],
) -> Result<RoundId> {
    let id = host.start_round(owner, fee)?;
    for p in players {
        host.join(*p, id, fee)?;
    }
    for (p, score) in players.iter().zip(scores) {
        if let ScoreOutcome::Settled(settlement) = host.end_round(owner, *p, id, score)? {
            match settlement {
                Settlement::Paid { winner, prize, .. } => {
                    info!("Round {} winner {} takes {}", id, winner.short(), prize);
                }
                Settlement::Cancelled { refund, .. } => {
                    info!("Round {} tied, {} refunded to each player", id, refund);
                }
            }
        }
    }
    Ok(id)
}

fn report(host: &InMemoryHost, id: RoundId, players: &[Address]) -> Result<()> {
    info!("Round {} status: {:?}", id, host.round_status(id)?);
    for p in players {
        let record = host.score_of(id, *p)?;
        info!("  {} score {} balance {}", p.short(), record.score, host.ledger.balance(p));
    }
    Ok(())
}
