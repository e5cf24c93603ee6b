//! Turns a parser's expected-token set into a bounded list of substitutes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Selects up to `limit` substitute tokens per error site.
///
/// Expected-token sets larger than the limit are sampled uniformly at random,
/// matching the behavior of the original tool; pass a seed to make runs
/// reproducible.
#[derive(Debug)]
pub struct CandidateSelector {
    limit: usize,
    rng: StdRng,
}

impl CandidateSelector {
    pub fn new(limit: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { limit, rng }
    }

    /// Picks substitute tokens from the parser's expected set.
    ///
    /// Quote characters are stripped from every descriptor. Placeholder
    /// tokens (angle-bracket lexical categories like `<IDENTIFIER>`) are
    /// never returned: they name a token class, not something insertable.
    /// When the set exceeds the limit, indices are sampled without
    /// repetition; the result may then hold fewer than `limit` tokens if the
    /// set is placeholder-heavy.
    pub fn select(&mut self, expected: &[String]) -> Vec<String> {
        let options: Vec<String> = expected.iter().map(|s| s.replace('"', "")).collect();

        if options.len() <= self.limit {
            return options
                .into_iter()
                .filter(|token| !is_placeholder(token))
                .collect();
        }

        let mut seen: HashSet<usize> = HashSet::new();
        let mut result = Vec::with_capacity(self.limit);
        while result.len() < self.limit && seen.len() < options.len() {
            let idx = self.rng.gen_range(0..options.len());
            if !seen.insert(idx) {
                continue;
            }
            if is_placeholder(&options[idx]) {
                continue;
            }
            result.push(options[idx].clone());
        }
        result
    }
}

/// Whether a token descriptor names a lexical category rather than a literal.
fn is_placeholder(token: &str) -> bool {
    token.starts_with('<') && token.len() > 1
}
