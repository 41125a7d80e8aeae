//! Turn loop pitting two players against each other.

use crate::error::{Error, Result};
use crate::game::{GameState, Outcome};
use crate::player::Player;
use log::{debug, info};

/// Summary of a finished match.
#[derive(Debug, Clone)]
pub struct MatchReport<G: GameState> {
    pub final_state: G,
    pub outcome: Outcome<G::Player>,
    /// Name of the winning player, `None` on a draw.
    pub winner: Option<String>,
    pub turns: usize,
}

/// Plays `initial` to the end. `players[0]` moves first.
pub fn play_match<G: GameState>(initial: G, players: &mut [Player<G>; 2]) -> Result<MatchReport<G>> {
    play_match_with(initial, players, |_, _, _| {})
}

/// Like [`play_match`], calling `on_move` with the mover, its action and the resulting state
/// after every turn.
pub fn play_match_with<G, F>(
    initial: G,
    players: &mut [Player<G>; 2],
    mut on_move: F,
) -> Result<MatchReport<G>>
where
    G: GameState,
    F: FnMut(&Player<G>, &G::Action, &G),
{
    let first_mover = initial.current_player();
    let mut state = initial;
    let mut turns = 0;

    while !state.is_terminal() {
        let player = &mut players[turns % 2];
        info!("{player}'s turn");
        let action = player.choose_move(&state)?;
        state = state.apply(&action)?;
        debug!("{player} played {action:?}");
        on_move(player, &action, &state);
        turns += 1;
    }

    let outcome = state.outcome().ok_or(Error::NoLegalActions)?;
    let winner = outcome.winner().map(|mark| {
        let seat = if mark == first_mover { 0 } else { 1 };
        players[seat].name().to_string()
    });

    match &winner {
        Some(name) => info!("{name} won in {turns} turns"),
        None => info!("Draw after {turns} turns"),
    }

    Ok(MatchReport {
        final_state: state,
        outcome,
        winner,
        turns,
    })
}
