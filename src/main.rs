use pokemon_duel::battle::engine::BattleEngine;
use pokemon_duel::battle::state::BattleRng;
use pokemon_duel::config::BattleConfig;
use pokemon_duel::roster::build_roster;
use pokemon_duel::terminal::run_session;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the battle text on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokemon_duel=info")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = BattleConfig::from_env()?;
    let provider = config.data_source.connect()?;

    let roster = build_roster(provider.as_ref(), &config.roster, config.level, &config.rules);
    for failure in &roster.failures {
        if failure.error.is_not_found() {
            eprintln!("Unknown Pokemon '{}', skipping it", failure.name);
        } else {
            eprintln!("Failed to retrieve data for {}: {}", failure.name, failure.error);
        }
    }

    let rng = match config.seed {
        Some(seed) => BattleRng::from_seed(seed),
        None => BattleRng::new_random(),
    };
    let mut engine = BattleEngine::new(roster.combatants, provider)?
        .with_rules(config.rules.clone())
        .with_rng(rng)
        .with_policy(config.rival_policy.build(&config.rules));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(
        &mut engine,
        stdin.lock(),
        &mut stdout,
        Duration::from_millis(config.message_delay_ms),
    )?;
    Ok(())
}
