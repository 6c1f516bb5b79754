// Engine API boundary. This trait exposes the human player's actions and the
// read-only view a frontend needs (hands, melds, action flags) so a UI can
// drive a match without reaching into controller internals. It is implemented
// for the core `Game` type.

use crate::cards::Card;
use crate::deadwood::Partition;
use crate::game::{ActionError, Phase, Turn};
use crate::scoring::KNOCK_LIMIT;

/// Which actions the human may take right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub can_draw: bool,
    pub can_discard: bool,
    pub can_knock: bool,
}

impl Eligibility {
    /// Flags depend only on the phase, whose turn it is, and the human's
    /// current deadwood value.
    pub fn for_player(phase: Phase, turn: Turn, deadwood: u32) -> Self {
        let mine = turn == Turn::Player;
        Self {
            can_draw: mine && phase == Phase::Draw,
            can_discard: mine && phase == Phase::Discard,
            can_knock: mine && phase == Phase::MaybeKnock && deadwood <= KNOCK_LIMIT,
        }
    }
}

pub trait GameEngine {
    // Round lifecycle
    fn next_round(&mut self) -> Result<(), ActionError>;

    // Player actions
    fn draw_from_deck(&mut self) -> Result<(), ActionError>;
    fn draw_from_discard(&mut self) -> Result<(), ActionError>;
    fn discard(&mut self, card: Card) -> Result<(), ActionError>;
    fn knock(&mut self) -> Result<(), ActionError>;
    fn keep_playing(&mut self) -> Result<(), ActionError>;

    // Queries
    fn player_hand(&self) -> &[Card];
    fn comp_hand(&self) -> &[Card];
    fn discard_top(&self) -> Option<Card>;
    fn deck_len(&self) -> usize;
    fn player_partition(&self) -> Partition;
    fn turn(&self) -> Turn;
    fn phase(&self) -> Phase;
    fn round(&self) -> u32;
    fn score(&self, who: Turn) -> u32;
    fn eligibility(&self) -> Eligibility;
}

impl GameEngine for crate::game::Game {
    fn next_round(&mut self) -> Result<(), ActionError> {
        self.next_round()
    }

    fn draw_from_deck(&mut self) -> Result<(), ActionError> {
        self.draw_from_deck()
    }
    fn draw_from_discard(&mut self) -> Result<(), ActionError> {
        self.draw_from_discard()
    }
    fn discard(&mut self, card: Card) -> Result<(), ActionError> {
        self.discard(card)
    }
    fn knock(&mut self) -> Result<(), ActionError> {
        self.knock()
    }
    fn keep_playing(&mut self) -> Result<(), ActionError> {
        self.keep_playing()
    }

    fn player_hand(&self) -> &[Card] {
        self.hand(Turn::Player)
    }
    fn comp_hand(&self) -> &[Card] {
        self.hand(Turn::Comp)
    }
    fn discard_top(&self) -> Option<Card> {
        self.state().discard.top()
    }
    fn deck_len(&self) -> usize {
        self.state().deck.len()
    }
    fn player_partition(&self) -> Partition {
        self.partition(Turn::Player)
    }
    fn turn(&self) -> Turn {
        self.state().turn
    }
    fn phase(&self) -> Phase {
        self.state().phase
    }
    fn round(&self) -> u32 {
        self.state().round
    }
    fn score(&self, who: Turn) -> u32 {
        self.state().score(who)
    }
    fn eligibility(&self) -> Eligibility {
        self.eligibility()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_phase_and_turn() {
        let e = Eligibility::for_player(Phase::Draw, Turn::Player, 40);
        assert!(e.can_draw && !e.can_discard && !e.can_knock);

        let e = Eligibility::for_player(Phase::Discard, Turn::Player, 40);
        assert!(!e.can_draw && e.can_discard && !e.can_knock);

        let e = Eligibility::for_player(Phase::Draw, Turn::Comp, 0);
        assert_eq!(e, Eligibility::default());
    }

    #[test]
    fn knock_needs_low_deadwood() {
        assert!(Eligibility::for_player(Phase::MaybeKnock, Turn::Player, 10).can_knock);
        assert!(!Eligibility::for_player(Phase::MaybeKnock, Turn::Player, 11).can_knock);
        assert!(!Eligibility::for_player(Phase::EndOfRound, Turn::Player, 0).can_knock);
    }
}
