//! Hand partitioner: the split of a hand into disjoint melds plus deadwood
//! that minimizes deadwood points.
//!
//! The search removes one meld at a time from the remaining cards until no
//! meld is left, recording `(melds, residue)` at every leaf. It runs on an
//! explicit stack over [`CardSet`] bitmasks: a residue reached twice leads to
//! the same leaves, so it is expanded only once, and leaves are deduplicated
//! by deadwood mask equality.

use crate::cards::Card;
use crate::hand::CardSet;
use crate::melds::{find_melds, Meld};
use std::collections::HashSet;

/// A hand split into pairwise-disjoint melds and the leftover deadwood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    melds: Vec<Meld>,
    deadwood: CardSet,
}

impl Partition {
    /// No melds; the whole hand is deadwood.
    pub fn trivial(cards: CardSet) -> Self {
        Self { melds: Vec::new(), deadwood: cards }
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    pub fn deadwood(&self) -> CardSet {
        self.deadwood
    }

    pub fn deadwood_cards(&self) -> Vec<Card> {
        self.deadwood.to_vec()
    }

    pub fn deadwood_value(&self) -> u32 {
        self.deadwood.value()
    }

    /// Union of the melded cards.
    pub fn melded(&self) -> CardSet {
        self.melds.iter().fold(CardSet::EMPTY, |acc, m| acc.union(m.cards()))
    }

    /// All cards covered by the partition.
    pub fn cards(&self) -> CardSet {
        self.melded().union(self.deadwood)
    }

    /// Zero deadwood.
    pub fn is_gin(&self) -> bool {
        self.deadwood.is_empty()
    }
}

/// Every complete partition of `cards`, one per distinct deadwood set, in
/// search order. Never empty.
pub fn all_partitions(cards: CardSet) -> Vec<Partition> {
    let mut out: Vec<Partition> = Vec::new();
    let mut seen_deadwood: HashSet<CardSet> = HashSet::new();
    let mut expanded: HashSet<CardSet> = HashSet::new();
    let mut stack: Vec<(CardSet, Vec<Meld>)> = vec![(cards, Vec::new())];

    while let Some((remaining, groups)) = stack.pop() {
        if !expanded.insert(remaining) {
            continue;
        }
        let melds = find_melds(remaining);
        if melds.is_empty() {
            if seen_deadwood.insert(remaining) {
                out.push(Partition { melds: groups, deadwood: remaining });
            }
            continue;
        }
        // reversed so the first meld is explored first
        for meld in melds.into_iter().rev() {
            let mut next = groups.clone();
            next.push(meld);
            stack.push((remaining.difference(meld.cards()), next));
        }
    }

    if out.is_empty() {
        out.push(Partition::trivial(cards));
    }
    out
}

/// The partition of `cards` with the lowest deadwood value. Ties go to the
/// first partition in search order, so the result is deterministic.
///
/// ```
/// use gin_rummy::deadwood::calc_deadwood;
/// use gin_rummy::hand::CardSet;
///
/// let hand: CardSet = "4h 5h 6h 7h 7c 7s Kd Qd 2c 3s".parse().unwrap();
/// let best = calc_deadwood(hand);
/// assert_eq!(best.deadwood_value(), 25);
/// ```
pub fn calc_deadwood(cards: CardSet) -> Partition {
    lowest(all_partitions(cards)).unwrap_or_else(|| Partition::trivial(cards))
}

/// Like [`calc_deadwood`] but only among partitions that leave at least one
/// deadwood card, so an 11-card hand always has something to discard.
/// `None` when every partition melds the whole hand (or the hand is empty).
pub fn least_deadwood_before_discard(cards: CardSet) -> Option<Partition> {
    lowest(all_partitions(cards).into_iter().filter(|p| !p.deadwood.is_empty()))
}

/// Deadwood value of the best partition of `cards`.
pub fn deadwood_value(cards: CardSet) -> u32 {
    calc_deadwood(cards).deadwood_value()
}

fn lowest<I: IntoIterator<Item = Partition>>(partitions: I) -> Option<Partition> {
    // min_by_key keeps the first of equal minima
    partitions.into_iter().min_by_key(Partition::deadwood_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(s: &str) -> CardSet {
        s.parse().unwrap()
    }

    #[test]
    fn empty_hand_has_one_empty_partition() {
        let parts = all_partitions(CardSet::EMPTY);
        assert_eq!(parts.len(), 1);
        assert!(parts[0].is_gin());
        assert!(parts[0].melds().is_empty());
    }

    #[test]
    fn hand_without_melds_is_all_deadwood() {
        let hand = set("Ac 3s 5h 7d 9c Js Kh 2d 4c 6s");
        let best = calc_deadwood(hand);
        assert!(best.melds().is_empty());
        assert_eq!(best.deadwood(), hand);
        assert_eq!(best.deadwood_value(), hand.value());
    }

    #[test]
    fn overlapping_card_goes_to_the_cheaper_side() {
        // 7c can join the run 5c-6c-7c or the set of sevens, not both
        let hand = set("5c 6c 7c 7s 7h");
        let best = calc_deadwood(hand);
        assert_eq!(best.melds().len(), 1);
        assert_eq!(best.deadwood(), set("5c 6c"));
        assert_eq!(best.deadwood_value(), 11);
        assert_eq!(all_partitions(hand).len(), 2);
    }

    #[test]
    fn four_of_a_kind_can_lend_a_card_to_a_run() {
        let hand = set("8c 8s 8h 8d 9h 10h");
        let best = calc_deadwood(hand);
        assert!(best.is_gin());
        assert_eq!(best.melds().len(), 2);
    }

    #[test]
    fn long_run_splits_into_two_melds_when_it_must() {
        let hand = set("3d 4d 5d 6d 7d 8d");
        let parts = all_partitions(hand);
        assert!(parts.iter().any(Partition::is_gin));
        assert!(calc_deadwood(hand).is_gin());
    }

    #[test]
    fn partitions_are_deduplicated_by_deadwood() {
        // two disjoint runs are reachable in either order
        let hand = set("Ac 2c 3c 9s 10s Js Kd");
        let parts = all_partitions(hand);
        let gin_like: Vec<_> = parts.iter().filter(|p| p.deadwood() == set("Kd")).collect();
        assert_eq!(gin_like.len(), 1);
        assert_eq!(gin_like[0].melds().len(), 2);
    }

    #[test]
    fn partitions_cover_the_hand_exactly() {
        let hand = set("4h 5h 6h 7h 7c 7s 7d Kd Qd Jd 10d");
        for p in all_partitions(hand) {
            assert_eq!(p.cards(), hand);
            let mut acc = CardSet::EMPTY;
            for m in p.melds() {
                assert!(acc.is_disjoint(m.cards()));
                acc = acc.union(m.cards());
            }
            assert!(acc.is_disjoint(p.deadwood()));
        }
    }

    #[test]
    fn before_discard_skips_zero_deadwood_splits() {
        let hand = set("Ac 2c 3c 4c 5s 6s 7s 8s Kh Kd Kc");
        assert!(calc_deadwood(hand).is_gin());
        let p = least_deadwood_before_discard(hand).unwrap();
        assert!(!p.deadwood().is_empty());
        assert_eq!(p.deadwood_value(), 1);
    }

    #[test]
    fn before_discard_is_none_when_nothing_is_left_over() {
        assert!(least_deadwood_before_discard(set("Ac 2c 3c")).is_none());
        assert!(least_deadwood_before_discard(CardSet::EMPTY).is_none());
    }
}
