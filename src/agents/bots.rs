use crate::cards::Card;
use crate::deadwood::{calc_deadwood, least_deadwood_before_discard};
use crate::hand::CardSet;
use crate::melds::has_meld;
use log::debug;
use std::cmp::Reverse;

use super::PlayerAgent;

/// Whether drawing `candidate` strictly improves `hand`: add it, take the
/// best partition, throw that partition's highest deadwood card, and compare
/// with the hand's current deadwood.
///
/// ```
/// use gin_rummy::agents::should_draw;
/// use gin_rummy::hand::CardSet;
///
/// let hand: CardSet = "7c 7s 2d 4h 9s Jc Qd Kh 3c 5d".parse().unwrap();
/// assert!(should_draw(hand, "7h".parse().unwrap()));
/// assert!(!should_draw(hand, "Kc".parse().unwrap()));
/// ```
pub fn should_draw(hand: CardSet, candidate: Card) -> bool {
    let current = calc_deadwood(hand).deadwood_value();
    let deadwood = calc_deadwood(hand.with(candidate)).deadwood();
    let after = match highest_value_card(deadwood) {
        Some(high) => deadwood.without(high).value(),
        None => 0,
    };
    after < current
}

/// Pick a card to throw from `deadwood`, given the current `discard` pile.
///
/// Only the highest-value cards are considered. A candidate is skipped if it
/// would hand the opponent a meld on the pile (once the pile holds more than
/// one card), if another top card shares its rank, or if a same-suit
/// neighbour sits in the deadwood. When every candidate is skipped the first
/// one is thrown anyway. `None` only for empty deadwood.
pub fn best_discard(deadwood: &[Card], discard: &[Card]) -> Option<Card> {
    let top = deadwood.iter().map(|c| c.points()).max()?;
    let tied: Vec<Card> = deadwood.iter().copied().filter(|c| c.points() == top).collect();
    let pile: CardSet = discard.iter().collect();
    let dead: CardSet = deadwood.iter().collect();

    let safe = tied.iter().copied().find(|&c| {
        let feeds = discard.len() > 1 && has_meld(pile.with(c));
        let paired = tied.iter().any(|o| o.rank() == c.rank() && o.suit() != c.suit());
        let connected = [c.rank().pred(), c.rank().succ()]
            .into_iter()
            .flatten()
            .any(|r| dead.contains(Card::new(r, c.suit())));
        !(feeds || paired || connected)
    });
    safe.or_else(|| tied.first().copied())
}

/// First card (in slot order) with the highest point value.
fn highest_value_card(cards: CardSet) -> Option<Card> {
    cards.iter().min_by_key(|c| Reverse(c.points()))
}

/// The computer opponent: draws from the discard pile only when that strictly
/// improves its hand and discards with [`best_discard`].
#[derive(Debug, Clone, Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }
}

impl PlayerAgent for HeuristicBot {
    fn take_discard(&mut self, hand: CardSet, top: Card) -> bool {
        let take = should_draw(hand, top);
        debug!("bot {} discard {top}", if take { "takes" } else { "passes on" });
        take
    }

    fn choose_discard(&mut self, hand: CardSet, discard: &[Card]) -> Option<Card> {
        let choice = match least_deadwood_before_discard(hand) {
            Some(p) => best_discard(&p.deadwood_cards(), discard),
            None => highest_value_card(hand),
        };
        debug!("bot discards {choice:?} from {hand:?}");
        choice
    }
}
