//! Evaluate command - Evaluate a saved agent against the random opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::MsgPackRepository,
    cli::output::{format_number, print_kv, print_section, print_tally},
    pipeline::{Opponent, OutcomeTally, RandomOpponent, evaluate},
    ports::AgentRepository,
    tictactoe::Side,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a saved agent")]
pub struct EvaluateArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationExport {
    agent: String,
    opponent: String,
    games: usize,
    seed: Option<u64>,
    tally: OutcomeTally,
    win_rate: f64,
    draw_rate: f64,
    loss_rate: f64,
}

pub fn execute(args: EvaluateArgs) -> Result<OutcomeTally> {
    println!("Loading trained agent from: {}", args.agent.display());
    let saved = MsgPackRepository
        .load(&args.agent)
        .with_context(|| format!("failed to load agent from {}", args.agent.display()))?;
    let mut agent = saved.to_agent()?;

    print_section("Loaded Agent Info");
    if let Some(episodes) = saved.metadata.episodes_trained {
        print_kv("Episodes trained", &format_number(episodes));
    }
    if let Some(opponent) = &saved.metadata.opponent {
        print_kv("Trained against", opponent);
    }
    if let Some(saved_at) = &saved.metadata.saved_at {
        print_kv("Saved at", saved_at);
    }
    print_kv(
        "Visited states",
        &format_number(agent.q_table().visited_states()),
    );

    let mut opponent = RandomOpponent::new("Random");
    if let Some(seed) = args.seed {
        agent.set_rng_seed(seed);
        opponent.set_rng_seed(seed.wrapping_add(1));
    }

    let (tally, _) = evaluate(&mut agent, &mut opponent, args.games, Side::Agent);

    print_section(&format!("Evaluation vs {}", opponent.name()));
    print_tally(&tally);

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            agent: args.agent.display().to_string(),
            opponent: opponent.name().to_string(),
            games: args.games,
            seed: args.seed,
            tally,
            win_rate: tally.win_rate(),
            draw_rate: tally.draw_rate(),
            loss_rate: tally.loss_rate(),
        };
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(tally)
}
