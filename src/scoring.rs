//! Round scoring when a player goes out: gin, big gin, knock and undercut,
//! with pair-offs against the other side's melds.

use crate::cards::Card;
use crate::deadwood::calc_deadwood;
use crate::hand::CardSet;
use crate::melds::Meld;

/// Highest deadwood value a player may knock with.
pub const KNOCK_LIMIT: u32 = 10;
pub const GIN_BONUS: u32 = 25;
pub const BIG_GIN_BONUS: u32 = 31;
pub const UNDERCUT_BONUS: u32 = 25;

/// How the round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundEnd {
    /// Zero deadwood with ten cards.
    Gin,
    /// Zero deadwood while holding eleven cards.
    BigGin,
    /// Knock where the ender kept the lower score.
    Knock,
    /// Knock where the opponent matched or beat the ender.
    Undercut,
}

/// Winner relative to the player who went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Ender,
    Opponent,
}

/// Full breakdown of a scored round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct RoundScore {
    pub end: RoundEnd,
    pub winner: Winner,
    /// Ender's deadwood before pair-offs.
    pub ender_deadwood: u32,
    /// Opponent's deadwood before pair-offs.
    pub opponent_deadwood: u32,
    /// Ender's deadwood after removing cards that fit the opponent's melds.
    pub ender_score: u32,
    /// Opponent's deadwood after removing cards that fit the ender's melds.
    pub opponent_score: u32,
    pub ender_pair_offs: CardSet,
    pub opponent_pair_offs: CardSet,
    pub points: u32,
    pub bonus: u32,
}

impl RoundScore {
    /// Points credited to the winner.
    pub fn total(&self) -> u32 {
        self.points + self.bonus
    }
}

/// Whether `card` legally extends any one of `groups`: the group plus the card
/// must partition with zero deadwood.
pub fn can_pair_off(groups: &[Meld], card: Card) -> bool {
    groups.iter().any(|g| !g.cards().contains(card) && calc_deadwood(g.cards().with(card)).is_gin())
}

/// The subset of `deadwood` that can be laid off on `groups`.
pub fn pair_offs(deadwood: CardSet, groups: &[Meld]) -> CardSet {
    deadwood.iter().filter(|&c| can_pair_off(groups, c)).collect()
}

/// Score a round ended by the holder of `ender_hand`.
///
/// ```
/// use gin_rummy::hand::CardSet;
/// use gin_rummy::scoring::{score_round, RoundEnd, Winner};
///
/// let ender: CardSet = "2c 3c 4c 8s 8h 8d Jh Qh Kh 4d".parse().unwrap();
/// let opp: CardSet = "5s 6s 7s 10c 10s 10d Ad 2s 3h 9c".parse().unwrap();
/// let score = score_round(ender, opp);
/// assert_eq!(score.end, RoundEnd::Knock);
/// assert_eq!(score.winner, Winner::Ender);
/// assert_eq!(score.total(), 11);
/// ```
pub fn score_round(ender_hand: CardSet, opponent_hand: CardSet) -> RoundScore {
    let ender = calc_deadwood(ender_hand);
    let opponent = calc_deadwood(opponent_hand);

    let ender_pair_offs = pair_offs(ender.deadwood(), opponent.melds());
    let opponent_pair_offs = pair_offs(opponent.deadwood(), ender.melds());
    let ender_score = ender.deadwood().difference(ender_pair_offs).value();
    let opponent_score = opponent.deadwood().difference(opponent_pair_offs).value();

    let (end, winner, points, bonus) = if ender.is_gin() {
        if ender_hand.len() == crate::hand::MAX_HAND_SIZE {
            (RoundEnd::BigGin, Winner::Ender, opponent.deadwood_value(), BIG_GIN_BONUS)
        } else {
            (RoundEnd::Gin, Winner::Ender, opponent.deadwood_value(), GIN_BONUS)
        }
    } else if ender_score >= opponent_score {
        (RoundEnd::Undercut, Winner::Opponent, ender_score - opponent_score, UNDERCUT_BONUS)
    } else {
        (RoundEnd::Knock, Winner::Ender, opponent_score - ender_score, 0)
    };

    RoundScore {
        end,
        winner,
        ender_deadwood: ender.deadwood_value(),
        opponent_deadwood: opponent.deadwood_value(),
        ender_score,
        opponent_score,
        ender_pair_offs,
        opponent_pair_offs,
        points,
        bonus,
    }
}
