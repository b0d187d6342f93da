use crate::{Generator, GeneratorError, ALPHABET, DEFAULT_CODE_LENGTH};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tinylink_core::shortcode::MAX_LENGTH;
use tinylink_core::ShortCode;

/// Draws each character of a code independently and uniformly from [`ALPHABET`].
///
/// The random source is injected so tests can pin it with a seed. The lock is
/// held only while sampling one code, so the generator can be shared freely
/// between concurrent requests.
#[derive(Debug)]
pub struct RandomGenerator<R = StdRng> {
    length: usize,
    rng: Mutex<R>,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    /// Creates a deterministic generator; the same seed yields the same codes.
    pub fn with_seed(length: usize, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(length, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomGenerator<R> {
    pub fn with_rng(length: usize, rng: R) -> Result<Self, GeneratorError> {
        if length == 0 || length > MAX_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length,
                max: MAX_LENGTH,
            });
        }

        Ok(Self {
            length,
            rng: Mutex::new(rng),
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn sample(&self) -> String {
        let mut rng = self.rng.lock();
        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomGenerator<StdRng> {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl<R: RngCore + Send + 'static> Generator for RandomGenerator<R> {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        ShortCode::new_unchecked(self.sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn default_length_is_six() {
        let generator: RandomGenerator = RandomGenerator::default();
        assert_eq!(generator.length(), 6);
        assert_eq!(generator.generate().as_str().len(), 6);
    }

    #[test]
    fn codes_have_configured_length_and_alphabet() {
        for length in [1, 6, 12, 32] {
            let generator = RandomGenerator::new(length).unwrap();
            for _ in 0..200 {
                let code = generator.generate();
                assert_eq!(code.as_str().len(), length);
                assert!(code.as_str().bytes().all(|b| ALPHABET.contains(&b)));
                // generated codes always pass the public validation
                assert!(ShortCode::new(code.as_str()).is_ok());
            }
        }
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = RandomGenerator::new(0).unwrap_err();
        assert_eq!(err, GeneratorError::InvalidLength { length: 0, max: 32 });
    }

    #[test]
    fn overlong_length_is_rejected() {
        assert!(RandomGenerator::new(33).is_err());
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = RandomGenerator::with_seed(6, 42).unwrap();
        let b = RandomGenerator::with_seed(6, 42).unwrap();

        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = RandomGenerator::with_seed(6, 1).unwrap();
        let b = RandomGenerator::with_seed(6, 2).unwrap();

        let left: Vec<_> = (0..10).map(|_| a.generate()).collect();
        let right: Vec<_> = (0..10).map(|_| b.generate()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn successive_codes_are_mostly_distinct() {
        let generator = RandomGenerator::with_seed(6, 9).unwrap();
        let codes: HashSet<_> = (0..1000).map(|_| generator.generate()).collect();
        assert!(codes.len() >= 999);
    }

    #[test]
    fn every_symbol_shows_up() {
        let generator = RandomGenerator::with_seed(1, 3).unwrap();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..20_000 {
            let c = generator.generate().as_str().chars().next().unwrap();
            *counts.entry(c).or_default() += 1;
        }

        assert_eq!(counts.len(), 62);
        // expected ~322 per symbol
        assert!(counts.values().all(|&n| n > 150 && n < 550));
    }

    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;

        let generator = Arc::new(RandomGenerator::new(6).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| generator.generate())
                        .all(|c| c.as_str().len() == 6)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
