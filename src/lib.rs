pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod finder;
pub mod known;
pub mod selector;
pub mod sources;

pub use error::SelectorError;
pub use finder::{MatchResult, SelectorFinder};
pub use selector::{selector_of, CryptoHasher, Keccak256, Selector, TextEncoder, Utf8Encoder};
