//! Agents: the decision seam for the computer seat.
//!
//! The controller asks a `PlayerAgent` three questions during the computer's
//! turn (take the discard or draw blind, what to throw, whether to go out)
//! and applies the answers itself, so an agent never mutates game state.
//! `Action` and [`dispatch`] give frontends a single entry point for the
//! human's intents.

use crate::cards::Card;
use crate::deadwood::Partition;
use crate::engine::GameEngine;
use crate::game::ActionError;
use crate::hand::CardSet;
use crate::scoring::KNOCK_LIMIT;

/// Player intents, typically produced by a UI for the human seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    DrawFromDeck,
    DrawFromDiscard,
    Discard(Card),
    Knock,
    KeepPlaying,
    NextRound,
}

/// Decision policy for a computer-controlled seat.
pub trait PlayerAgent {
    /// Whether to take `top` from the discard pile instead of the deck.
    fn take_discard(&mut self, hand: CardSet, top: Card) -> bool;

    /// Card to throw from `hand` (which holds the freshly drawn card).
    fn choose_discard(&mut self, hand: CardSet, discard: &[Card]) -> Option<Card>;

    /// Whether to end the round once the hand is low enough to knock.
    fn go_out(&mut self, partition: &Partition) -> bool {
        partition.deadwood_value() <= KNOCK_LIMIT
    }
}

mod bots;

pub use bots::{best_discard, should_draw, HeuristicBot};

/// Route a human intent to the matching engine call.
pub fn dispatch(engine: &mut dyn GameEngine, action: Action) -> Result<(), ActionError> {
    match action {
        Action::DrawFromDeck => engine.draw_from_deck(),
        Action::DrawFromDiscard => engine.draw_from_discard(),
        Action::Discard(card) => engine.discard(card),
        Action::Knock => engine.knock(),
        Action::KeepPlaying => engine.keep_playing(),
        Action::NextRound => engine.next_round(),
    }
}
