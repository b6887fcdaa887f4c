//! RPS Wager Demo
//!
//! Plays one staked game on an in-memory chain and withdraws the winnings.

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rps_wager::{
    EngineConfig, LocalChain, Move, MoveCommitment, PlayerId, RpsEngine, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("RPS Wager Engine v{}", VERSION);

    let config = EngineConfig::from_env().context("loading engine config")?;
    demo_game(config)
}

/// Deposit, commit, reveal and withdraw for two players.
fn demo_game(config: EngineConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");

    let mut engine = RpsEngine::with_config(config)?;
    let mut chain = LocalChain::new();

    let alice = PlayerId::random();
    let bob = PlayerId::random();
    chain.fund(alice, 10).fund(bob, 10);

    chain.deposit(&mut engine, alice, 5)?;
    chain.deposit(&mut engine, bob, 5)?;

    let game_id = 0;
    let bet = 5;
    let alice_move = MoveCommitment::new(Move::Rock);
    let bob_move = MoveCommitment::new(Move::Scissors);

    engine.make_move(chain.call_as(alice), game_id, bet, alice_move.commitment)?;
    chain.advance(1);
    engine.make_move(chain.call_as(bob), game_id, bet, bob_move.commitment)?;
    info!("Both players committed, game state {:?}", engine.game_state(game_id));

    chain.advance(1);
    engine.reveal_move(chain.call_as(alice), game_id, alice_move.mv, &alice_move.nonce)?;
    chain.advance(1);
    engine.reveal_move(chain.call_as(bob), game_id, bob_move.mv, &bob_move.nonce)?;

    info!("=== Game Results ===");
    info!("Player {} balance: {}", alice, engine.balance_of(&alice));
    info!("Player {} balance: {}", bob, engine.balance_of(&bob));

    let winnings = engine.balance_of(&alice);
    engine.withdraw(chain.call_as(alice), winnings)?;
    info!("Player {} wallet after withdrawal: {}", alice, chain.wallet_of(&alice));

    for event in engine.take_events() {
        info!("Event: {}", serde_json::to_string(&event)?);
    }

    info!("Final State Hash: {}", hex::encode(engine.state_hash()));

    if !engine.ledger().check_conservation() {
        bail!("ledger conservation violated");
    }
    info!("Ledger conserved: custody {} == owed {}", chain.custody(), engine.ledger().total_balances());
    Ok(())
}
