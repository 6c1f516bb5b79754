use crate::cards::{parse_cards, Card, DECK_SIZE};
use std::fmt;
use std::str::FromStr;

/// Largest hand a player can hold: ten dealt plus one drawn.
pub const MAX_HAND_SIZE: usize = 11;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(Card),
    #[error("too many cards in hand: {0}")]
    TooManyCards(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A set of distinct cards, stored as a bitmask over the 52 card slots.
///
/// Set algebra is a couple of machine instructions, and two sets compare
/// equal exactly when they hold the same cards regardless of how they were
/// built, which is what the partition search relies on.
///
/// ```
/// use gin_rummy::hand::CardSet;
///
/// let hand: CardSet = "7c 7s 7h Kd".parse().unwrap();
/// assert_eq!(hand.len(), 4);
/// assert_eq!(hand.value(), 31);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);

    /// Every card of a standard deck.
    pub const FULL: CardSet = CardSet((1u64 << DECK_SIZE) - 1);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1u64 << card.index()) != 0
    }

    /// Insert `card`, returning `false` if it was already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let had = self.contains(card);
        self.0 |= 1u64 << card.index();
        !had
    }

    /// Remove `card`, returning `false` if it was not present.
    pub fn remove(&mut self, card: Card) -> bool {
        let had = self.contains(card);
        self.0 &= !(1u64 << card.index());
        had
    }

    #[must_use]
    pub const fn with(self, card: Card) -> CardSet {
        CardSet(self.0 | (1u64 << card.index()))
    }

    #[must_use]
    pub const fn without(self, card: Card) -> CardSet {
        CardSet(self.0 & !(1u64 << card.index()))
    }

    #[must_use]
    pub const fn union(self, other: CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: CardSet) -> CardSet {
        CardSet(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: CardSet) -> CardSet {
        CardSet(self.0 & !other.0)
    }

    pub const fn is_disjoint(self, other: CardSet) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn is_subset(self, other: CardSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Cards in slot order (suit-major, rank ascending).
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }

    pub fn to_vec(self) -> Vec<Card> {
        self.iter().collect()
    }

    /// Total deadwood points of the cards in the set.
    pub fn value(self) -> u32 {
        self.iter().map(Card::points).sum()
    }

    /// Build a set from a slice, rejecting duplicates and oversize hands.
    pub fn try_from_hand(cards: &[Card]) -> Result<CardSet, HandError> {
        if cards.len() > MAX_HAND_SIZE {
            return Err(HandError::TooManyCards(cards.len()));
        }
        let mut set = CardSet::EMPTY;
        for &c in cards {
            if !set.insert(c) {
                return Err(HandError::DuplicateCard(c));
            }
        }
        Ok(set)
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| format!("{}{}", c.rank(), c.suit().to_char()))).finish()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        set.extend(iter);
        set
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl Extend<Card> for CardSet {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for c in iter {
            self.insert(c);
        }
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = Iter;
    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromStr for CardSet {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        let mut set = CardSet::EMPTY;
        for c in cards {
            if !set.insert(c) {
                return Err(HandError::DuplicateCard(c));
            }
        }
        Ok(set)
    }
}

/// Iterator over the cards of a [`CardSet`], lowest slot first.
#[derive(Debug, Clone)]
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Card::from_index(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn insert_and_remove_report_membership_changes() {
        let mut set = CardSet::EMPTY;
        let c = Card::new(Rank::Five, Suit::Heart);
        assert!(set.insert(c));
        assert!(!set.insert(c));
        assert_eq!(set.len(), 1);
        assert!(set.remove(c));
        assert!(!set.remove(c));
        assert!(set.is_empty());
    }

    #[test]
    fn full_set_holds_the_whole_deck() {
        assert_eq!(CardSet::FULL.len(), 52);
        assert_eq!(CardSet::FULL.value(), 4 * (1 + 2 + 3 + 4 + 5 + 6 + 7 + 8 + 9 + 10 * 4));
    }

    #[test]
    fn iteration_is_suit_major_rank_ascending() {
        let set: CardSet = "Kc 2s Ac 3c".parse().unwrap();
        let cards = set.to_vec();
        assert_eq!(cards, parse_cards("Ac 3c Kc 2s").unwrap());
    }

    #[test]
    fn set_algebra() {
        let a: CardSet = "Ac 2c 3c".parse().unwrap();
        let b: CardSet = "3c 4c".parse().unwrap();
        assert_eq!(a.union(b).len(), 4);
        assert_eq!(a.intersection(b).len(), 1);
        assert_eq!(a.difference(b), "Ac 2c".parse().unwrap());
        assert!(!a.is_disjoint(b));
        assert!("Ac".parse::<CardSet>().unwrap().is_subset(a));
    }

    #[test]
    fn try_from_hand_rejects_duplicates_and_oversize() {
        let dup = parse_cards("Ac Ac").unwrap();
        assert_eq!(
            CardSet::try_from_hand(&dup),
            Err(HandError::DuplicateCard(Card::new(Rank::Ace, Suit::Club)))
        );
        let twelve = parse_cards("Ac 2c 3c 4c 5c 6c 7c 8c 9c 10c Jc Qc").unwrap();
        assert_eq!(CardSet::try_from_hand(&twelve), Err(HandError::TooManyCards(12)));
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert!(matches!("Ac ac".parse::<CardSet>(), Err(HandError::DuplicateCard(_))));
        assert!(matches!("Zz".parse::<CardSet>(), Err(HandError::CardParse(_))));
    }
}
