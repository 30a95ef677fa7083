//! Secure random draws: unbiased integers, set choice, and shuffling.
//!
//! Everything here is generic over `RngCore + CryptoRng`, so a general
//! purpose generator cannot be passed in by accident.

pub mod urand;

use rand_core::{CryptoRng, OsRng, RngCore};

pub use urand::UrandomRng;

/// Uniform integer in `[0, n)`.
///
/// Draws 64-bit words, masks them down to the smallest power of two that
/// covers `n`, and rejects anything `>= n`. No modulo reduction, so no bias.
/// `n` of 0 or 1 always yields 0 without touching the source.
pub fn below<R>(rng: &mut R, n: usize) -> Result<usize, rand_core::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if n <= 1 {
        return Ok(0);
    }

    let bound = n as u64;
    let mask = u64::MAX >> (bound - 1).leading_zeros();
    let mut word = [0u8; 8];

    loop {
        rng.try_fill_bytes(&mut word)?;
        let candidate = u64::from_le_bytes(word) & mask;
        if candidate < bound {
            return Ok(candidate as usize);
        }
    }
}

/// Uniform pick from a non-empty slice.
pub fn choice<R, T>(rng: &mut R, set: &[T]) -> Result<T, rand_core::Error>
where
    R: RngCore + CryptoRng + ?Sized,
    T: Copy,
{
    debug_assert!(!set.is_empty(), "choice from an empty set");
    Ok(set[below(rng, set.len())?])
}

/// In-place Fisher-Yates, walking from the last index down to 1.
pub fn shuffle<R, T>(rng: &mut R, items: &mut [T]) -> Result<(), rand_core::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = below(rng, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

// =============================================================================
// Sources
// =============================================================================

/// The secure sources a caller can pick between.
pub enum Source {
    /// OS entropy through `getrandom`.
    Os(OsRng),
    /// Buffered reads of `/dev/urandom`.
    Urandom(UrandomRng),
}

impl Source {
    pub fn os() -> Self {
        Source::Os(OsRng)
    }

    pub fn urandom() -> Result<Self, rand_core::Error> {
        UrandomRng::open().map(Source::Urandom)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Source::Os(_) => "getrandom",
            Source::Urandom(_) => urand::URANDOM_PATH,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::os()
    }
}

impl RngCore for Source {
    fn next_u32(&mut self) -> u32 {
        match self {
            Source::Os(rng) => rng.next_u32(),
            Source::Urandom(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Source::Os(rng) => rng.next_u64(),
            Source::Urandom(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Source::Os(rng) => rng.fill_bytes(dest),
            Source::Urandom(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        match self {
            Source::Os(rng) => rng.try_fill_bytes(dest),
            Source::Urandom(rng) => rng.try_fill_bytes(dest),
        }
    }
}

impl CryptoRng for Source {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    /// Always fails, to check error propagation.
    struct Broken;

    impl RngCore for Broken {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }
        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }
        fn fill_bytes(&mut self, _: &mut [u8]) {
            unreachable!()
        }
        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new(std::io::Error::other("no entropy")))
        }
    }

    impl CryptoRng for Broken {}

    #[test]
    fn below_stays_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for n in [2usize, 3, 7, 10, 26, 94, 1000] {
            for _ in 0..2000 {
                assert!(below(&mut rng, n).unwrap() < n);
            }
        }
    }

    #[test]
    fn below_trivial_bounds_skip_the_source() {
        assert_eq!(below(&mut Broken, 0).unwrap(), 0);
        assert_eq!(below(&mut Broken, 1).unwrap(), 0);
    }

    #[test]
    fn below_is_not_modulo_biased() {
        // 3 does not divide 2^64; a modulo draw over a small word would skew
        // toward 0. Chi-square with 2 degrees of freedom, p ~ 0.0001.
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let samples = 60_000;
        let mut counts = [0usize; 3];
        for _ in 0..samples {
            counts[below(&mut rng, 3).unwrap()] += 1;
        }
        let expected = samples as f64 / 3.0;
        let chi: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        assert!(chi < 18.4, "chi-square {chi} for {counts:?}");
    }

    #[test]
    fn errors_propagate() {
        assert!(below(&mut Broken, 5).is_err());
        assert!(choice(&mut Broken, &['a', 'b']).is_err());
        let mut items = [1, 2, 3];
        assert!(shuffle(&mut Broken, &mut items).is_err());
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut rng, &mut items).unwrap();
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_short_inputs() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut Broken, &mut empty).unwrap();
        let mut one = [9];
        shuffle(&mut Broken, &mut one).unwrap();
        assert_eq!(one, [9]);
    }

    #[test]
    fn shuffle_hits_every_permutation_evenly() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let perms = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let samples = 60_000;
        let mut counts = [0usize; 6];
        for _ in 0..samples {
            let mut items = [0, 1, 2];
            shuffle(&mut rng, &mut items).unwrap();
            let idx = perms.iter().position(|p| *p == items).unwrap();
            counts[idx] += 1;
        }
        let expected = samples as f64 / 6.0;
        let chi: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 5 degrees of freedom, p ~ 0.0001
        assert!(chi < 25.7, "chi-square {chi} for {counts:?}");
    }

    #[test]
    fn os_source_draws() {
        let mut source = Source::default();
        assert_eq!(source.name(), "getrandom");
        let mut buf = [0u8; 32];
        source.try_fill_bytes(&mut buf).unwrap();
        assert!(below(&mut source, 10).unwrap() < 10);
    }
}
