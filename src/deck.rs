use crate::cards::{Card, Rank, Suit, DECK_SIZE};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Draw pile. The top of the deck is the end of the sequence.
///
/// Drawing consumes the deck and hands back the remainder, so a caller never
/// observes a half-updated pile.
///
/// ```
/// use gin_rummy::deck::Deck;
///
/// let deck = Deck::standard();
/// let (deck, card) = deck.draw();
/// assert!(card.is_some());
/// assert_eq!(deck.len(), 51);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 cards in a fixed, unshuffled order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for r in Rank::ALL {
            for s in [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond] {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    #[must_use]
    pub fn shuffled_seeded(self, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffled_with(&mut rng)
    }

    /// Shuffle using the provided RNG.
    #[must_use]
    pub fn shuffled_with<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.cards.shuffle(rng);
        self
    }

    /// Draw the top card. An empty deck yields `None` and is returned as is.
    pub fn draw(mut self) -> (Self, Option<Card>) {
        let card = self.cards.pop();
        (self, card)
    }

    /// Draw up to `n` cards from the top, in draw order.
    pub fn draw_n(mut self, n: usize) -> (Self, Vec<Card>) {
        let keep = self.cards.len().saturating_sub(n);
        let mut drawn = self.cards.split_off(keep);
        drawn.reverse();
        (self, drawn)
    }
}

/// Face-up discard pile. Only the top (last) card can be taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    #[must_use]
    pub fn push(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    /// Take the top card. An empty pile yields `None` and is returned as is.
    pub fn take_top(mut self) -> (Self, Option<Card>) {
        let card = self.cards.pop();
        (self, card)
    }
}
