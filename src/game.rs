use crate::agents::{HeuristicBot, PlayerAgent};
use crate::cards::{Card, DECK_SIZE};
use crate::deadwood::{calc_deadwood, Partition};
use crate::deck::{Deck, DiscardPile};
use crate::engine::Eligibility;
use crate::hand::{CardSet, MAX_HAND_SIZE};
use crate::scoring::{score_round, RoundEnd, RoundScore, Winner, KNOCK_LIMIT};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cards dealt to each player.
pub const HAND_SIZE: usize = 10;

/// Cumulative score that ends the match.
pub const WINNING_SCORE: u32 = 100;

/// Events kept per round; older ones are dropped once a round trades the
/// discard pile past this.
pub const HISTORY_LIMIT: usize = 256;

/// Whose turn it is. Serialized as `"player"` / `"comp"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Player,
    Comp,
}

impl Turn {
    pub const fn other(self) -> Turn {
        match self {
            Turn::Player => Turn::Comp,
            Turn::Comp => Turn::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Phase {
    Draw,
    Discard,
    MaybeKnock,
    GoOut,
    EndOfRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Deck,
    Discard,
}

impl fmt::Display for DrawSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawSource::Deck => "deck",
            DrawSource::Discard => "discard",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("action needs phase {expected:?}, current phase is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("it is not the player's turn")]
    NotYourTurn,
    #[error("no card to draw from the {0}")]
    EmptySource(DrawSource),
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("deadwood {0} is too high to knock")]
    DeadwoodTooHigh(u32),
    #[error("a gin hand must go out")]
    MustGoOut,
    #[error("the match is over")]
    MatchOver,
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StateError {
    #[error("invalid saved state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("state holds {0} distinct cards, expected 52")]
    CardCount(usize),
    #[error("{turn:?} hand holds {len} cards")]
    HandSize { turn: Turn, len: usize },
    #[error("no play continues from {phase:?} with {turn:?} on turn")]
    Unplayable { turn: Turn, phase: Phase },
}

/// One line of the round log. `Display` renders the exact text shown to the
/// player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    Drew { name: String, card: Card, source: DrawSource },
    Discarded { name: String, card: Card },
    GoingOut { name: String },
    Gin,
    BigGin,
    Undercut { name: String, ender_score: u32, opponent_score: u32 },
    Wins { name: String, points: u32, bonus: u32 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Drew { name, card, source } => write!(f, "{name} drew {card} from the {source}"),
            GameEvent::Discarded { name, card } => write!(f, "{name} discarded {card}"),
            GameEvent::GoingOut { name } => write!(f, "{name} is going out, round end."),
            GameEvent::Gin => f.write_str("Gin!"),
            GameEvent::BigGin => f.write_str("Big gin!"),
            GameEvent::Undercut { name, ender_score, opponent_score } => {
                write!(f, "{name} was undercut ({ender_score} > {opponent_score})!")
            }
            GameEvent::Wins { name, points, bonus: 0 } => {
                write!(f, "{name} wins, and gains {points} points!")
            }
            GameEvent::Wins { name, points, bonus } => {
                write!(f, "{name} wins, and gains {points} + {bonus} = {} points!", points + bonus)
            }
        }
    }
}

/// The persisted round + match state, in the shape the external store reads
/// and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub deck: Deck,
    pub discard: DiscardPile,
    pub player_hand: Vec<Card>,
    pub comp_hand: Vec<Card>,
    pub turn: Turn,
    pub phase: Phase,
    pub round: u32,
    #[serde(default)]
    pub player_score: u32,
    #[serde(default)]
    pub comp_score: u32,
    #[serde(default)]
    pub won_last_round: Option<Turn>,
}

impl GameState {
    /// A fresh match: round 0, no score, one card face up, ten cards each.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut state = Self {
            deck: Deck::default(),
            discard: DiscardPile::default(),
            player_hand: Vec::new(),
            comp_hand: Vec::new(),
            turn: Turn::Player,
            phase: Phase::Draw,
            round: 0,
            player_score: 0,
            comp_score: 0,
            won_last_round: None,
        };
        state.redeal(rng);
        state
    }

    fn redeal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let deck = Deck::standard().shuffled_with(rng);
        let (deck, up) = deck.draw_n(1);
        let (deck, player) = deck.draw_n(HAND_SIZE);
        let (deck, comp) = deck.draw_n(HAND_SIZE);
        self.deck = deck;
        self.discard = DiscardPile::from_cards(up);
        self.player_hand = player;
        self.comp_hand = comp;
    }

    pub fn hand(&self, who: Turn) -> &[Card] {
        match who {
            Turn::Player => &self.player_hand,
            Turn::Comp => &self.comp_hand,
        }
    }

    fn hand_mut(&mut self, who: Turn) -> &mut Vec<Card> {
        match who {
            Turn::Player => &mut self.player_hand,
            Turn::Comp => &mut self.comp_hand,
        }
    }

    pub fn score(&self, who: Turn) -> u32 {
        match who {
            Turn::Player => self.player_score,
            Turn::Comp => self.comp_score,
        }
    }

    fn score_mut(&mut self, who: Turn) -> &mut u32 {
        match who {
            Turn::Player => &mut self.player_score,
            Turn::Comp => &mut self.comp_score,
        }
    }

    /// Check that deck, pile and hands hold each of the 52 cards exactly once,
    /// that the turn and phase can still be played from, and that hand sizes
    /// fit them: eleven cards only for the player on turn after a draw, ten
    /// otherwise.
    pub fn validate(&self) -> Result<(), StateError> {
        let mut seen = CardSet::EMPTY;
        let zones = [
            self.deck.as_slice(),
            self.discard.as_slice(),
            self.player_hand.as_slice(),
            self.comp_hand.as_slice(),
        ];
        for &c in zones.into_iter().flatten() {
            if !seen.insert(c) {
                return Err(StateError::DuplicateCard(c));
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(StateError::CardCount(seen.len()));
        }

        // the computer's turn runs in one step, so it only rests on a draw
        let resumable = match self.phase {
            Phase::Draw | Phase::EndOfRound => true,
            Phase::Discard | Phase::MaybeKnock => self.turn == Turn::Player,
            _ => false,
        };
        if !resumable {
            return Err(StateError::Unplayable { turn: self.turn, phase: self.phase });
        }

        for who in [Turn::Player, Turn::Comp] {
            let len = self.hand(who).len();
            let ok = match (len, who == self.turn, self.phase) {
                (HAND_SIZE, on_turn, Phase::Discard) => !on_turn,
                (HAND_SIZE, _, _) => true,
                // big gin ends the round holding eleven
                (MAX_HAND_SIZE, true, Phase::Discard | Phase::MaybeKnock | Phase::EndOfRound) => true,
                _ => false,
            };
            if !ok {
                return Err(StateError::HandSize { turn: who, len });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a saved state.
    pub fn from_json(s: &str) -> Result<Self, StateError> {
        let state: GameState = serde_json::from_str(s)?;
        state.validate()?;
        Ok(state)
    }
}

/// Match settings. Rules are fixed; only presentation and randomness vary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    pub rng_seed: Option<u64>,
    pub player_name: String,
    pub computer_name: String,
}

impl GameConfig {
    /// Set a deterministic RNG seed for reproducible shuffles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_names(mut self, player: impl Into<String>, computer: impl Into<String>) -> Self {
        self.player_name = player.into();
        self.computer_name = computer.into();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { rng_seed: None, player_name: "Player".into(), computer_name: "Computer".into() }
    }
}

/// Round and match controller: a human against a computer agent.
///
/// Every action either applies fully or returns an `ActionError` and leaves
/// the state untouched. Whenever the turn passes to the computer in the draw
/// phase, its whole turn runs before the action returns.
pub struct Game {
    state: GameState,
    config: GameConfig,
    rng: ChaCha8Rng,
    agent: Box<dyn PlayerAgent>,
    history: Vec<GameEvent>,
    last_score: Option<RoundScore>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::with_agent(config, Box::new(HeuristicBot::new()))
    }

    pub fn with_agent(config: GameConfig, agent: Box<dyn PlayerAgent>) -> Self {
        let mut rng = seeded_rng(config.rng_seed);
        let state = GameState::deal(&mut rng);
        Self { state, config, rng, agent, history: Vec::new(), last_score: None }
    }

    /// Resume from a saved state. If the computer is due to draw, its turn
    /// runs immediately.
    pub fn load(
        state: GameState,
        config: GameConfig,
        agent: Box<dyn PlayerAgent>,
    ) -> Result<Self, StateError> {
        state.validate()?;
        let rng = seeded_rng(config.rng_seed);
        let mut game = Self { state, config, rng, agent, history: Vec::new(), last_score: None };
        game.run_computer_turn();
        Ok(game)
    }

    /// Snapshot for the external store.
    pub fn save(&self) -> GameState {
        self.state.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn hand(&self, who: Turn) -> &[Card] {
        self.state.hand(who)
    }

    pub fn name(&self, who: Turn) -> &str {
        match who {
            Turn::Player => &self.config.player_name,
            Turn::Comp => &self.config.computer_name,
        }
    }

    /// Best meld/deadwood split of a player's hand, for display.
    pub fn partition(&self, who: Turn) -> Partition {
        calc_deadwood(self.hand_set(who))
    }

    pub fn eligibility(&self) -> Eligibility {
        let deadwood = self.partition(Turn::Player).deadwood_value();
        Eligibility::for_player(self.state.phase, self.state.turn, deadwood)
    }

    pub fn can_draw(&self) -> bool {
        self.eligibility().can_draw
    }

    pub fn can_discard(&self) -> bool {
        self.eligibility().can_discard
    }

    pub fn can_knock(&self) -> bool {
        self.eligibility().can_knock
    }

    /// Continuing is offered alongside a knock, but never for a gin hand.
    pub fn can_keep_playing(&self) -> bool {
        self.state.turn == Turn::Player
            && self.state.phase == Phase::MaybeKnock
            && !self.partition(Turn::Player).is_gin()
    }

    /// Score breakdown of the most recently finished round.
    pub fn last_score(&self) -> Option<&RoundScore> {
        self.last_score.as_ref()
    }

    pub fn is_match_over(&self) -> bool {
        self.state.player_score >= WINNING_SCORE || self.state.comp_score >= WINNING_SCORE
    }

    pub fn match_winner(&self) -> Option<Turn> {
        if !self.is_match_over() {
            return None;
        }
        if self.state.player_score >= self.state.comp_score {
            Some(Turn::Player)
        } else {
            Some(Turn::Comp)
        }
    }

    /// The last `n` events of the current round, oldest first.
    pub fn history_recent(&self, n: usize) -> Vec<GameEvent> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The current round's log as display strings.
    pub fn log_lines(&self) -> Vec<String> {
        self.history.iter().map(ToString::to_string).collect()
    }

    pub fn draw_from_deck(&mut self) -> Result<(), ActionError> {
        self.player_draw(DrawSource::Deck)
    }

    pub fn draw_from_discard(&mut self) -> Result<(), ActionError> {
        self.player_draw(DrawSource::Discard)
    }

    pub fn discard(&mut self, card: Card) -> Result<(), ActionError> {
        self.ensure_player_phase(Phase::Discard)?;
        if !self.hand(Turn::Player).contains(&card) {
            return Err(ActionError::CardNotInHand(card));
        }
        self.discard_card(Turn::Player, card);
        if self.partition(Turn::Player).deadwood_value() <= KNOCK_LIMIT {
            self.state.phase = Phase::MaybeKnock;
        } else {
            self.pass_turn();
        }
        Ok(())
    }

    /// End the round: a knock, or gin / big gin when the hand has no deadwood.
    pub fn knock(&mut self) -> Result<(), ActionError> {
        self.ensure_player_phase(Phase::MaybeKnock)?;
        let deadwood = self.partition(Turn::Player).deadwood_value();
        if deadwood > KNOCK_LIMIT {
            return Err(ActionError::DeadwoodTooHigh(deadwood));
        }
        self.go_out(Turn::Player);
        Ok(())
    }

    /// Decline to knock and hand the turn to the computer.
    pub fn keep_playing(&mut self) -> Result<(), ActionError> {
        self.ensure_player_phase(Phase::MaybeKnock)?;
        if self.partition(Turn::Player).is_gin() {
            return Err(ActionError::MustGoOut);
        }
        self.pass_turn();
        Ok(())
    }

    /// Reshuffle and redeal; the last round's winner moves first.
    pub fn next_round(&mut self) -> Result<(), ActionError> {
        if self.state.phase != Phase::EndOfRound {
            return Err(ActionError::WrongPhase {
                expected: Phase::EndOfRound,
                actual: self.state.phase,
            });
        }
        if self.is_match_over() {
            return Err(ActionError::MatchOver);
        }
        self.state.redeal(&mut self.rng);
        self.state.round += 1;
        self.history.clear();
        self.state.turn = self.state.won_last_round.unwrap_or(Turn::Player);
        self.state.phase = Phase::Draw;
        info!("round {} starts, {} first", self.state.round, self.name(self.state.turn));
        self.run_computer_turn();
        Ok(())
    }

    fn ensure_player_phase(&self, expected: Phase) -> Result<(), ActionError> {
        if self.state.phase != expected {
            return Err(ActionError::WrongPhase { expected, actual: self.state.phase });
        }
        if self.state.turn != Turn::Player {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    fn player_draw(&mut self, source: DrawSource) -> Result<(), ActionError> {
        self.ensure_player_phase(Phase::Draw)?;
        if self.draw_card(Turn::Player, source).is_none() {
            return Err(ActionError::EmptySource(source));
        }
        self.state.phase = if self.partition(Turn::Player).is_gin() {
            Phase::MaybeKnock
        } else {
            Phase::Discard
        };
        Ok(())
    }

    fn hand_set(&self, who: Turn) -> CardSet {
        self.hand(who).iter().collect()
    }

    fn record(&mut self, event: GameEvent) {
        debug!("{event}");
        if self.history.len() >= HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(event);
    }

    fn draw_card(&mut self, who: Turn, source: DrawSource) -> Option<Card> {
        let card = match source {
            DrawSource::Deck => {
                let (deck, card) = std::mem::take(&mut self.state.deck).draw();
                self.state.deck = deck;
                card
            }
            DrawSource::Discard => {
                let (pile, card) = std::mem::take(&mut self.state.discard).take_top();
                self.state.discard = pile;
                card
            }
        }?;
        self.state.hand_mut(who).push(card);
        let name = self.name(who).to_string();
        self.record(GameEvent::Drew { name, card, source });
        Some(card)
    }

    fn discard_card(&mut self, who: Turn, card: Card) {
        self.state.hand_mut(who).retain(|&c| c != card);
        self.state.discard = std::mem::take(&mut self.state.discard).push(card);
        let name = self.name(who).to_string();
        self.record(GameEvent::Discarded { name, card });
    }

    fn pass_turn(&mut self) {
        self.state.turn = self.state.turn.other();
        self.state.phase = Phase::Draw;
        self.run_computer_turn();
    }

    fn go_out(&mut self, ender: Turn) {
        self.state.phase = Phase::GoOut;
        let ender_name = self.name(ender).to_string();
        self.record(GameEvent::GoingOut { name: ender_name.clone() });

        let score = score_round(self.hand_set(ender), self.hand_set(ender.other()));
        let winner = match score.winner {
            Winner::Ender => ender,
            Winner::Opponent => ender.other(),
        };
        match score.end {
            RoundEnd::BigGin => self.record(GameEvent::BigGin),
            RoundEnd::Gin => self.record(GameEvent::Gin),
            RoundEnd::Undercut => self.record(GameEvent::Undercut {
                name: ender_name,
                ender_score: score.ender_score,
                opponent_score: score.opponent_score,
            }),
            _ => {}
        }
        let name = self.name(winner).to_string();
        self.record(GameEvent::Wins { name, points: score.points, bonus: score.bonus });

        *self.state.score_mut(winner) += score.total();
        self.state.won_last_round = Some(winner);
        self.state.phase = Phase::EndOfRound;
        info!(
            "round {} to {}: {:?} for {} (player {}, computer {})",
            self.state.round,
            self.name(winner),
            score.end,
            score.total(),
            self.state.player_score,
            self.state.comp_score
        );
        if let Some(champ) = self.match_winner() {
            info!("match over, {} wins", self.name(champ));
        }
        self.last_score = Some(score);
    }

    /// The computer's whole turn, run as one step: draw, then go out or
    /// discard, then knock or pass back.
    fn run_computer_turn(&mut self) {
        if self.state.turn != Turn::Comp || self.state.phase != Phase::Draw {
            return;
        }
        let hand = self.hand_set(Turn::Comp);
        let take_discard = match self.state.discard.top() {
            Some(top) => self.agent.take_discard(hand, top),
            None => false,
        };
        let source =
            if take_discard || self.state.deck.is_empty() { DrawSource::Discard } else { DrawSource::Deck };
        if self.draw_card(Turn::Comp, source).is_none() {
            debug!("computer has nothing to draw");
            return;
        }

        let hand = self.hand_set(Turn::Comp);
        if calc_deadwood(hand).is_gin() {
            self.go_out(Turn::Comp);
            return;
        }
        self.state.phase = Phase::Discard;

        let choice = self
            .agent
            .choose_discard(hand, self.state.discard.as_slice())
            .filter(|&c| hand.contains(c))
            .or_else(|| hand.iter().next());
        if let Some(card) = choice {
            self.discard_card(Turn::Comp, card);
        }

        let partition = self.partition(Turn::Comp);
        if partition.deadwood_value() <= KNOCK_LIMIT {
            self.state.phase = Phase::MaybeKnock;
            if self.agent.go_out(&partition) {
                self.go_out(Turn::Comp);
                return;
            }
        }
        self.state.turn = Turn::Player;
        self.state.phase = Phase::Draw;
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::seed_from_u64(rand::rng().random()),
    }
}
