//! Interactive play for Hearthtale.
//!
//! Wires the rules engine, session store, and narrator together behind a
//! line-oriented console: the character creation wizard, the numbered
//! turn menu, and the hand-off from a narrator's roll request to local
//! dice.

pub mod config;
pub mod console;
pub mod creation;
pub mod error;
pub mod prompt;
pub mod roll_request;
pub mod sheet;
pub mod turn;

pub use config::PlayConfig;
pub use console::Console;
pub use creation::create_character;
pub use error::{PlayError, PlayResult};
pub use roll_request::RollRequest;
pub use sheet::render_sheet;
pub use turn::TurnLoop;
