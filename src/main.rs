mod config;
mod runner;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wheel::engine::WheelCore;
use wheel::participant::{ParticipantId, Settings, SettingsError};
use wheel::pool::build_pool;
use wheel::segment::WheelLayout;
use wheel::select::{RandomSource, RngSource, select_winner};
use wheel::storage::{StateStore, StorageError, StoredState};
use wheel::weight::{slot_count, win_probability};

use crate::config::{DEFAULT_STATE_PATH, FrameConfig};
use crate::runner::{SpinError, run_spin};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Spin(#[from] SpinError),
    #[error("no participant with id {0}")]
    UnknownParticipant(ParticipantId),
    #[error("participant name must not be blank")]
    BlankName,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "spinwheel", about = "Weighted random-selection wheel")]
struct Cli {
    /// JSON file holding participants and settings.
    #[arg(long, env = "SPINWHEEL_STATE", default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show participants with their slot counts and odds.
    List,
    /// Add participants by name.
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Replace all participants with a comma-separated name list, keeping settings.
    Import { names: String },
    Remove { id: ParticipantId },
    /// Toggle whether a participant is excluded from the draw.
    Exclude { id: ParticipantId },
    /// Toggle whether a participant is boosted.
    Boost { id: ParticipantId },
    Set(SetArgs),
    /// Print the merged wheel wedges.
    Layout {
        #[arg(long)]
        json: bool,
    },
    /// Spin the wheel with a real-time frame loop and print the winner.
    Spin {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Draw many winners without animating and compare against expected odds.
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        trials: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Update settings; omitted fields keep their current values.
#[derive(Args, Debug)]
struct SetArgs {
    #[arg(long)]
    slots: Option<u32>,
    #[arg(long)]
    multiplier: Option<u32>,
    #[arg(long)]
    duration_ms: Option<u32>,
    #[arg(long)]
    turns: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = StateStore::new(cli.state);
    let state = store.load()?;

    match cli.command {
        Command::List => run_list(&state),
        Command::Add { names } => run_add(&store, state, &names),
        Command::Import { names } => save(&store, &state.with_participant_names(&names)),
        Command::Remove { id } => run_edit(&store, state, id, |s, id| s.participants.remove(id)),
        Command::Exclude { id } => run_edit(&store, state, id, |s, id| s.participants.toggle_excluded(id)),
        Command::Boost { id } => run_edit(&store, state, id, |s, id| s.participants.toggle_boosted(id)),
        Command::Set(args) => run_set(&store, state, &args),
        Command::Layout { json } => run_layout(&state, json),
        Command::Spin { seed } => run_spin_command(state, seed).await,
        Command::Simulate { trials, seed } => run_simulate(&state, trials, seed),
    }
}

fn save(store: &StateStore, state: &StoredState) -> Result<(), CliError> {
    store.save(state)?;
    tracing::info!(path = %store.path().display(), participants = state.participants.len(), "state updated");
    Ok(())
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_os()),
    }
}

fn run_list(state: &StoredState) -> Result<(), CliError> {
    let people = state.participants.as_slice();
    if people.is_empty() {
        println!("no participants");
        return Ok(());
    }
    for p in people {
        let flags = match (p.excluded, p.boosted) {
            (true, true) => "excluded,boosted",
            (true, false) => "excluded",
            (false, true) => "boosted",
            (false, false) => "-",
        };
        let odds = win_probability(p, people, &state.settings).unwrap_or(0.0);
        println!(
            "{}  {:<20} {:<16} slots={:<3} odds={:.1}%",
            p.id,
            p.name,
            flags,
            slot_count(p, &state.settings),
            odds * 100.0
        );
    }
    println!("eligible: {} of {}", state.participants.eligible().len(), people.len());
    Ok(())
}

fn run_add(store: &StateStore, mut state: StoredState, names: &[String]) -> Result<(), CliError> {
    for name in names {
        let id = state.participants.add(name).ok_or(CliError::BlankName)?;
        println!("{id}  {}", name.trim());
    }
    save(store, &state)
}

fn run_edit<F>(store: &StateStore, mut state: StoredState, id: ParticipantId, edit: F) -> Result<(), CliError>
where
    F: FnOnce(&mut StoredState, &ParticipantId) -> bool,
{
    if !edit(&mut state, &id) {
        return Err(CliError::UnknownParticipant(id));
    }
    save(store, &state)
}

fn run_set(store: &StateStore, mut state: StoredState, args: &SetArgs) -> Result<(), CliError> {
    let current = state.settings;
    let next = Settings {
        base_slot_count: args.slots.unwrap_or(current.base_slot_count),
        boost_multiplier: args.multiplier.unwrap_or(current.boost_multiplier),
        spin_duration_ms: args.duration_ms.unwrap_or(current.spin_duration_ms),
        min_full_turns: args.turns.unwrap_or(current.min_full_turns),
    };
    next.validate()?;
    state.settings = next;
    save(store, &state)
}

fn run_layout(state: &StoredState, json: bool) -> Result<(), CliError> {
    let layout = WheelLayout::compute(state.participants.as_slice(), &state.settings);
    if json {
        println!("{}", serde_json::to_string_pretty(&layout.merged)?);
        return Ok(());
    }
    if layout.is_empty() {
        println!("wheel is empty");
        return Ok(());
    }
    for seg in &layout.merged {
        let name = state
            .participants
            .get(&seg.owner)
            .map_or("?", |p| p.name.as_str());
        println!("{:>7.2}° - {:>7.2}°  {name}", seg.start_angle, seg.end_angle);
    }
    Ok(())
}

async fn run_spin_command(state: StoredState, seed: Option<u64>) -> Result<(), CliError> {
    let frames = FrameConfig::from_env();
    let mut core = WheelCore::with_random_source(state.participants, state.settings, random_source(seed));

    let report = run_spin(&mut core, frames.interval, |rotation| {
        tracing::debug!(rotation, "wheel rotation");
    })
    .await?;

    let name = core.winner().map_or("?", |p| p.name.as_str());
    println!("winner: {name} ({})", report.winner);
    tracing::info!(
        frames = report.frames,
        final_rotation = report.plan.final_rotation,
        target_angle = report.plan.target_angle,
        "spin complete"
    );
    Ok(())
}

fn run_simulate(state: &StoredState, trials: u32, seed: Option<u64>) -> Result<(), CliError> {
    let people = state.participants.as_slice();
    let pool = build_pool(people, &state.settings);
    if pool.is_empty() {
        return Err(SpinError::NoEligible.into());
    }

    let mut rng = random_source(seed);
    let mut wins: HashMap<ParticipantId, u32> = HashMap::new();
    for _ in 0..trials {
        if let Some(winner) = select_winner(&pool, rng.as_mut()) {
            *wins.entry(winner.id.clone()).or_default() += 1;
        }
    }

    for p in state.participants.eligible() {
        let expected = win_probability(p, people, &state.settings).unwrap_or(0.0);
        let observed = f64::from(wins.get(&p.id).copied().unwrap_or(0)) / f64::from(trials.max(1));
        println!("{:<20} expected={:>6.2}% observed={:>6.2}%", p.name, expected * 100.0, observed * 100.0);
    }
    Ok(())
}
