//! Date-seeded generators.
//!
//! The same date string always yields the same generator state, in any
//! process. Draw order is fixed: target first, unit draw second.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::fmt;
use std::str::FromStr;

use super::mersenne::Mt19937;

/// How the daily generator is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedScheme {
    /// MT19937 seeded like CPython's `random.seed(str)`; bit-for-bit with the reference.
    #[default]
    PythonCompat,
    /// `Pcg64Mcg` seeded from `sha512(date)`. Deterministic, not cross-language.
    Pcg,
}

impl SeedScheme {
    /// Fresh generator for `date_key` (`YYYY-MM-DD`).
    pub fn generator(self, date_key: &str) -> Box<dyn DailyDraws> {
        match self {
            SeedScheme::PythonCompat => Box::new(PythonCompatDraws::new(date_key)),
            SeedScheme::Pcg => Box::new(RandDraws::new(pcg_for(date_key))),
        }
    }
}

impl fmt::Display for SeedScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedScheme::PythonCompat => f.write_str("python-compat"),
            SeedScheme::Pcg => f.write_str("pcg"),
        }
    }
}

impl FromStr for SeedScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python-compat" => Ok(SeedScheme::PythonCompat),
            "pcg" => Ok(SeedScheme::Pcg),
            other => Err(format!("unknown seed scheme: {other}")),
        }
    }
}

/// The two draws the gate makes from a seeded generator.
pub trait DailyDraws {
    /// Uniform integer in `[lo, hi]`.
    fn draw_in_range(&mut self, lo: u32, hi: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn draw_unit(&mut self) -> f64;
}

/// `random.seed(date)` followed by `randint` / `random`.
#[derive(Debug, Clone)]
pub struct PythonCompatDraws {
    mt: Mt19937,
}

impl PythonCompatDraws {
    pub fn new(seed: &str) -> Self {
        Self {
            mt: Mt19937::from_key(&python_str_seed_key(seed)),
        }
    }
}

impl DailyDraws for PythonCompatDraws {
    fn draw_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        self.mt.randint(lo, hi)
    }

    fn draw_unit(&mut self) -> f64 {
        self.mt.random()
    }
}

/// Any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandDraws<R> {
    rng: R,
}

impl<R: Rng> RandDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DailyDraws for RandDraws<R> {
    fn draw_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.gen_range(lo..=hi)
    }

    fn draw_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Key CPython derives for `random.seed(s)` with a `str` seed (version 2).
///
/// `int.from_bytes(s + sha512(s), "big")` split into 32-bit words,
/// least significant first, with high zero words dropped.
pub fn python_str_seed_key(seed: &str) -> Vec<u32> {
    let mut bytes = seed.as_bytes().to_vec();
    bytes.extend_from_slice(&Sha512::digest(seed.as_bytes()));

    let pad = (4 - bytes.len() % 4) % 4;
    let mut padded = vec![0u8; pad];
    padded.extend_from_slice(&bytes);

    let mut words: Vec<u32> = padded
        .chunks_exact(4)
        .rev()
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    while words.len() > 1 && words.last() == Some(&0) {
        words.pop();
    }
    words
}

fn pcg_for(date_key: &str) -> Pcg64Mcg {
    let digest = Sha512::digest(date_key.as_bytes());
    let mut seed = [0u8; 16];
    seed.copy_from_slice(&digest[..16]);
    Pcg64Mcg::from_seed(seed)
}
