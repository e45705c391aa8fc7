//! Motivational messages shown while a countdown runs.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shown when the configured list is empty.
pub const FALLBACK_QUOTE: &str = "Stay motivated!";

pub fn default_quotes() -> Vec<String> {
    [
        "Your future is created by what you do today, not tomorrow.",
        "Don't dream your life, live your dreams.",
        "The secret of getting ahead is getting started.",
        "Failure is the foundation of success.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Pick one quote at random.
pub fn pick<R: Rng + ?Sized>(quotes: &[String], rng: &mut R) -> String {
    quotes
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_QUOTE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn picks_from_the_list() {
        let quotes = default_quotes();
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..20 {
            assert!(quotes.contains(&pick(&quotes, &mut rng)));
        }
    }

    #[test]
    fn empty_list_falls_back() {
        let mut rng = Pcg64::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng), FALLBACK_QUOTE);
    }

    #[test]
    fn same_seed_same_pick() {
        let quotes = default_quotes();
        let a = pick(&quotes, &mut Pcg64::seed_from_u64(42));
        let b = pick(&quotes, &mut Pcg64::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
