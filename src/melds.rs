//! Meld finder: every run and set present in a group of cards.
//!
//! This is exhaustive, not a decomposition. Overlapping melds are all
//! reported; choosing a disjoint subset is the partitioner's job.

use crate::cards::{Card, Rank, Suit};
use crate::hand::CardSet;
use std::fmt;

/// Smallest legal meld.
pub const MIN_MELD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MeldKind {
    /// Same suit, consecutive ranks.
    Run,
    /// Same rank, distinct suits.
    Set,
}

/// A run or set of at least three cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meld {
    kind: MeldKind,
    cards: CardSet,
}

impl Meld {
    pub const fn kind(&self) -> MeldKind {
        self.kind
    }

    pub const fn cards(&self) -> CardSet {
        self.cards
    }

    pub const fn len(&self) -> usize {
        self.cards.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in rank order for runs, suit order for sets.
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.to_vec()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Find every valid meld in `cards`: runs first (by suit, start rank, length),
/// then sets (by rank, the full group before its 3-card subsets).
///
/// ```
/// use gin_rummy::hand::CardSet;
/// use gin_rummy::melds::find_melds;
///
/// let hand: CardSet = "4h 5h 6h 7h".parse().unwrap();
/// assert_eq!(find_melds(hand).len(), 3);
/// ```
pub fn find_melds(cards: CardSet) -> Vec<Meld> {
    let mut out = find_runs(cards);
    out.extend(find_sets(cards));
    out
}

/// Every contiguous same-suit sequence of length three or more.
pub fn find_runs(cards: CardSet) -> Vec<Meld> {
    let mut out = Vec::new();
    for suit in Suit::ALL {
        for (start, &lo) in Rank::ALL.iter().enumerate() {
            if !cards.contains(Card::new(lo, suit)) {
                continue;
            }
            let mut run = CardSet::EMPTY.with(Card::new(lo, suit));
            for &r in &Rank::ALL[start + 1..] {
                let c = Card::new(r, suit);
                if !cards.contains(c) {
                    break;
                }
                run.insert(c);
                if run.len() >= MIN_MELD_LEN {
                    out.push(Meld { kind: MeldKind::Run, cards: run });
                }
            }
        }
    }
    out
}

/// Every same-rank group of three or four; a four-of-a-kind also yields each
/// of its four 3-card subsets.
pub fn find_sets(cards: CardSet) -> Vec<Meld> {
    let mut out = Vec::new();
    for rank in Rank::ALL {
        let group: CardSet =
            Suit::ALL.iter().map(|&s| Card::new(rank, s)).filter(|&c| cards.contains(c)).collect();
        if group.len() < MIN_MELD_LEN {
            continue;
        }
        out.push(Meld { kind: MeldKind::Set, cards: group });
        if group.len() == 4 {
            for left_out in group {
                out.push(Meld { kind: MeldKind::Set, cards: group.without(left_out) });
            }
        }
    }
    out
}

/// Whether `cards` contains at least one meld.
pub fn has_meld(cards: CardSet) -> bool {
    !find_runs(cards).is_empty() || !find_sets(cards).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> CardSet {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input_has_no_melds() {
        assert!(find_melds(CardSet::EMPTY).is_empty());
        assert!(!has_meld(CardSet::EMPTY));
    }

    #[test]
    fn two_card_fragments_are_not_melds() {
        assert!(find_melds(set("4h 5h 9c 9d")).is_empty());
    }

    #[test]
    fn runs_yield_every_contiguous_subrun() {
        let runs = find_runs(set("4h 5h 6h 7h 2c"));
        let got: Vec<CardSet> = runs.iter().map(Meld::cards).collect();
        assert_eq!(got, vec![set("4h 5h 6h"), set("4h 5h 6h 7h"), set("5h 6h 7h")]);
        assert!(runs.iter().all(|m| m.kind() == MeldKind::Run));
    }

    #[test]
    fn runs_do_not_wrap_around_king_to_ace() {
        assert!(find_runs(set("Qs Ks As")).is_empty());
        assert_eq!(find_runs(set("Js Qs Ks")).len(), 1);
        assert_eq!(find_runs(set("As 2s 3s")).len(), 1);
    }

    #[test]
    fn runs_split_on_gaps() {
        let runs = find_runs(set("2d 3d 4d 6d 7d 8d"));
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn four_of_a_kind_yields_five_sets() {
        let sets = find_sets(set("7c 7s 7h 7d"));
        assert_eq!(sets.len(), 5);
        assert_eq!(sets[0].len(), 4);
        assert!(sets[1..].iter().all(|m| m.len() == 3));
        let distinct: std::collections::HashSet<CardSet> = sets.iter().map(Meld::cards).collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn three_of_a_kind_yields_one_set() {
        let sets = find_sets(set("Kc Kh Kd Qc"));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].cards(), set("Kc Kh Kd"));
    }

    #[test]
    fn melds_may_overlap() {
        let melds = find_melds(set("5c 6c 7c 7s 7h"));
        assert_eq!(melds.len(), 2);
        assert_eq!(melds[0].kind(), MeldKind::Run);
        assert_eq!(melds[1].kind(), MeldKind::Set);
    }
}
