//! Sources of unbiased bits for board measurement.

use rand::Rng;

/// Anything that can toss a fair coin.
///
/// Every `rand` generator is a coin source, so a seeded `SmallRng` gives
/// reproducible games. [`ScriptedCoins`] replays a fixed sequence instead.
pub trait CoinSource {
    /// Draw one bit.
    fn flip(&mut self) -> bool;
}

impl<R: Rng> CoinSource for R {
    #[inline]
    fn flip(&mut self) -> bool {
        self.random()
    }
}

/// Replays a fixed list of bits, wrapping around when it runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCoins {
    bits: Vec<bool>,
    cursor: usize,
}

impl ScriptedCoins {
    /// An empty script reads as an endless run of `false`.
    pub fn new(bits: impl IntoIterator<Item = bool>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Script from `0`/`1` characters; anything else is skipped.
    pub fn from_digits(digits: &str) -> Self {
        Self::new(digits.chars().filter_map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        }))
    }

    /// Number of bits drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl CoinSource for ScriptedCoins {
    fn flip(&mut self) -> bool {
        if self.bits.is_empty() {
            self.cursor += 1;
            return false;
        }
        let bit = self.bits[self.cursor % self.bits.len()];
        self.cursor += 1;
        bit
    }
}
