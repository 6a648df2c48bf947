//! Random helpers and the closed color sets
//!
//! All randomness goes through a seeded `Pcg32` owned by the demo state, so a
//! run is reproducible from its seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SpawnRange;

/// Uniform integer in `[min, max]` (inclusive)
pub fn int_between<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    rng.random_range(min..=max)
}

/// Uniform integer drawn from an inclusive config range
pub fn int_in<R: Rng + ?Sized>(rng: &mut R, range: SpawnRange<u32>) -> u32 {
    int_between(rng, range.min, range.max)
}

/// Ball fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    Vermilion,
    Tangerine,
    Saffron,
    Blue,
}

impl BallColor {
    pub const ALL: [BallColor; 4] = [
        BallColor::Vermilion,
        BallColor::Tangerine,
        BallColor::Saffron,
        BallColor::Blue,
    ];

    pub fn rgb(self) -> u32 {
        match self {
            BallColor::Vermilion => 0xD95D39,
            BallColor::Tangerine => 0xF18805,
            BallColor::Saffron => 0xF0A202,
            BallColor::Blue => 0x067BC2,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[int_between(rng, 0, Self::ALL.len() as u32 - 1) as usize]
    }
}

/// Ball border colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderColor {
    Midnight,
}

impl BorderColor {
    pub const ALL: [BorderColor; 1] = [BorderColor::Midnight];

    pub fn rgb(self) -> u32 {
        match self {
            BorderColor::Midnight => 0x0E1428,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[int_between(rng, 0, Self::ALL.len() as u32 - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_int_between_is_inclusive() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let v = int_between(&mut rng, 1, 3);
            assert!((1..=3).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(int_in(&mut rng, SpawnRange::new(0, 0)), 0);
    }

    #[test]
    fn test_random_colors_cover_set() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let c = BallColor::random(&mut rng);
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        assert_eq!(seen.len(), BallColor::ALL.len());
        assert_eq!(BorderColor::random(&mut rng), BorderColor::Midnight);
    }
}
