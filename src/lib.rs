//! gin-rummy: Gin Rummy rules and decision engine
//!
//! Goals:
//! - Exact, deterministic meld and deadwood analysis for any hand
//! - Standard scoring: knock, gin, big gin, undercut and pair-offs
//! - A round/match controller with a computer opponent and JSON-persistable state
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: analyse a hand
//! ```
//! use gin_rummy::deadwood::calc_deadwood;
//! use gin_rummy::hand::CardSet;
//!
//! let hand: CardSet = "4h 5h 6h 7h 7s 7c Kd Qc 2s 9d".parse().unwrap();
//! let best = calc_deadwood(hand);
//! assert_eq!(best.melds().len(), 2);
//! assert_eq!(best.deadwood_value(), 31);
//! ```
//!
//! ## Quick start: play a turn
//! ```
//! use gin_rummy::game::{Game, GameConfig, Phase, Turn};
//!
//! let mut game = Game::with_config(GameConfig::default().with_seed(7));
//! game.draw_from_deck().unwrap();
//! let card = game.hand(Turn::Player)[0];
//! if game.state().phase == Phase::Discard {
//!     game.discard(card).unwrap();
//! }
//! ```

pub mod agents;
pub mod cards;
pub mod deadwood;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod melds;
pub mod scoring;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
