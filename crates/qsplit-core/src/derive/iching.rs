//! I Ching hexagram casting by the yarrow-stalk method.
//!
//! A 32-bit LCG seeded from one integer drives six yarrow-stalk lines, cast
//! bottom to top. Strong lines are 1 and weak lines 0, with the first cast
//! line as the most significant bit. [`KING_WEN_SEQUENCE`] maps that 6-bit
//! pattern to the hexagram number. The table and the bit order belong
//! together: changing one without the other breaks every reading.

use serde::Serialize;

use super::hexagrams::HEXAGRAM_TEXT;
use crate::error::{Error, Result};

/// Line pattern of each hexagram, first cast line as the MSB.
/// Entry `i` holds hexagram `i + 1`.
pub const KING_WEN_SEQUENCE: [u8; 64] = [
    63, 0, 34, 17, 58, 23, 16, 2, 59, 55, 56, 7, 47, 61, 8, 4, //
    38, 25, 48, 3, 37, 41, 1, 32, 39, 57, 33, 30, 18, 45, 14, 28, //
    15, 60, 5, 40, 43, 53, 10, 20, 49, 35, 62, 31, 6, 24, 22, 26, //
    46, 29, 36, 9, 11, 52, 44, 13, 27, 54, 19, 50, 51, 12, 42, 21,
];

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Linear congruential generator mod 2^32.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seeds with `seed mod 2^32`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed as u32 }
    }

    /// Advance and return the new state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Next value as a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Integer in `[min, max)`: `floor(next_f64 * (max - min)) + min`,
    /// computed exactly in integer arithmetic.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let span = max.saturating_sub(min) as u64;
        ((self.next_u32() as u64 * span) >> 32) as u32 + min
    }
}

/// Yang (unbroken) or yin (broken).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Strong,
    Weak,
}

/// One line of a hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Line {
    #[serde(rename = "type")]
    pub kind: LineType,
    /// Old yin or old yang: the line turns into its opposite.
    pub changing: bool,
}

impl Line {
    /// Map a yarrow sum to a line. Only 6, 7, 8 and 9 are possible.
    pub fn from_value(value: u32) -> Result<Self> {
        let (kind, changing) = match value {
            6 => (LineType::Weak, true),
            7 => (LineType::Strong, false),
            8 => (LineType::Weak, false),
            9 => (LineType::Strong, true),
            other => return Err(Error::AlgorithmInvariant(other)),
        };
        Ok(Self { kind, changing })
    }

    pub fn is_strong(&self) -> bool {
        self.kind == LineType::Strong
    }

    pub fn glyph(&self) -> &'static str {
        if self.is_strong() { "━━━━━━" } else { "━━  ━━" }
    }
}

/// Sum of the three yarrow-stalk casts for one line.
pub fn yarrow_value(rng: &mut Lcg) -> u32 {
    let mut stalks: u32 = 49;
    let mut total = 0;

    for cast in 0..3 {
        let mut west = rng.range(1, stalks + 1);
        let east = stalks - west;
        west -= 1;

        let east_rem = match east % 4 {
            0 => 4,
            r => r,
        };
        let west_rem = match west % 4 {
            0 => 4,
            r => r,
        };
        let hand = 1 + east_rem + west_rem;

        total += match (cast, hand) {
            (0, 9) | (1..=2, 8) => 2,
            (0, 5) | (1..=2, 4) => 3,
            _ => 0,
        };
        stalks = stalks.saturating_sub(hand);
    }
    total
}

/// Cast one line.
pub fn yarrow(rng: &mut Lcg) -> Result<Line> {
    Line::from_value(yarrow_value(rng))
}

/// Six lines packed as bits, `lines[0]` most significant.
pub fn line_pattern(lines: &[Line; 6]) -> u8 {
    lines
        .iter()
        .fold(0u8, |acc, line| (acc << 1) | u8::from(line.is_strong()))
}

/// Hexagram number (1-64) for a line pattern.
pub fn king_wen_number(pattern: u8) -> Result<u8> {
    KING_WEN_SEQUENCE
        .iter()
        .position(|&p| p == pattern)
        .map(|i| i as u8 + 1)
        .ok_or(Error::UnknownHexagram(pattern))
}

/// A cast hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    pub number: u8,
    pub name: &'static str,
    pub symbol: char,
    pub reading: &'static str,
    /// Bottom to top.
    pub lines: [Line; 6],
}

impl Hexagram {
    /// Assemble a hexagram from six lines, bottom first.
    pub fn from_lines(lines: [Line; 6]) -> Result<Self> {
        let number = king_wen_number(line_pattern(&lines))?;
        let text = &HEXAGRAM_TEXT[number as usize - 1];
        Ok(Self {
            number,
            name: text.name,
            symbol: hexagram_symbol(number),
            reading: text.reading,
            lines,
        })
    }

    pub fn changing_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.changing)
            .map(|(i, _)| i + 1)
    }

    /// One row per line, bottom line first.
    pub fn lines_display(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let changing = if line.changing { " (changing)" } else { "" };
                format!("Line {}: {}{changing}", i + 1, line.glyph())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Unicode hexagram symbol, U+4DC0 for hexagram 1.
pub fn hexagram_symbol(number: u8) -> char {
    char::from_u32(0x4DC0 + number.saturating_sub(1) as u32).unwrap_or('?')
}

/// Cast a full hexagram from one seed. `|seed| mod 2^32` seeds the LCG.
pub fn cast_hexagram(seed: i64) -> Result<Hexagram> {
    let mut rng = Lcg::new(seed.unsigned_abs());
    let mut lines = [Line {
        kind: LineType::Weak,
        changing: false,
    }; 6];
    for line in &mut lines {
        *line = yarrow(&mut rng)?;
    }
    Hexagram::from_lines(lines)
}
