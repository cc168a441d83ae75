//! Outcome derivers: pure maps from integer seeds to discrete results.
//!
//! Every deriver takes the absolute value of its seed, so seeds carved out of
//! a hash can be any `i64` including `i64::MIN`.

pub mod iching;
pub mod seed;
pub mod tarot;

mod hexagrams;

use serde::Serialize;

use crate::error::{Error, Result};

pub use seed::{SeedSource, SeedStream};

/// Smallest option list [`crate::Oracle::choose`] accepts.
pub const MIN_OPTIONS: usize = 2;
/// Largest option list [`crate::Oracle::choose`] accepts.
pub const MAX_OPTIONS: usize = 20;

/// The classic twenty Magic 8-Ball answers.
pub const MAGIC_8_BALL_ANSWERS: [&str; 20] = [
    "It is certain.",
    "It is decidedly so.",
    "Without a doubt.",
    "Yes definitely.",
    "You may rely on it.",
    "As I see it, yes.",
    "Most likely.",
    "Outlook good.",
    "Yes.",
    "Signs point to yes.",
    "Reply hazy, try again.",
    "Ask again later.",
    "Better not tell you now.",
    "Cannot predict now.",
    "Concentrate and ask again.",
    "Don't count on it.",
    "My reply is no.",
    "My sources say no.",
    "Outlook not so good.",
    "Very doubtful.",
];

/// `|seed| mod n`. `n` must be non-zero.
pub fn select_index(seed: i64, n: usize) -> usize {
    (seed.unsigned_abs() % n as u64) as usize
}

/// `options[|seed| mod len]`, or `None` for an empty slice.
pub fn select<T>(seed: i64, options: &[T]) -> Option<&T> {
    if options.is_empty() {
        return None;
    }
    options.get(select_index(seed, options.len()))
}

/// `min + (|seed| mod (max - min + 1))`. Requires `min < max`.
pub fn map_range(seed: i64, min: i64, max: i64) -> Result<i64> {
    if min >= max {
        return Err(Error::InvalidRange { min, max });
    }
    // Spans up to 2^64 fit in i128.
    let span = (max as i128 - min as i128 + 1) as u128;
    let offset = seed.unsigned_abs() as u128 % span;
    Ok((min as i128 + offset as i128) as i64)
}

/// Two-sided coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    /// 0 for heads, 1 for tails.
    pub fn value(self) -> u8 {
        match self {
            Self::Heads => 0,
            Self::Tails => 1,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heads => write!(f, "Heads"),
            Self::Tails => write!(f, "Tails"),
        }
    }
}

/// Even `|seed|` is heads.
pub fn coin_flip(seed: i64) -> Coin {
    if seed.unsigned_abs() % 2 == 0 {
        Coin::Heads
    } else {
        Coin::Tails
    }
}

pub fn magic_8_ball(seed: i64) -> &'static str {
    MAGIC_8_BALL_ANSWERS[select_index(seed, MAGIC_8_BALL_ANSWERS.len())]
}

/// Scripted seed sequence for tests.
#[cfg(test)]
pub(crate) struct ScriptedSeeds {
    seeds: std::collections::VecDeque<i64>,
}

#[cfg(test)]
impl ScriptedSeeds {
    pub(crate) fn new(seeds: &[i64]) -> Self {
        Self {
            seeds: seeds.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl SeedSource for ScriptedSeeds {
    fn next_seed(&mut self) -> i64 {
        self.seeds.pop_front().expect("scripted seeds exhausted")
    }
}
