use std::collections::HashMap;

/// Sample-size confidence `n / (n + k)`.
///
/// Zero for `n = 0`, strictly increasing in `n`, tends to 1.
pub fn confidence_weight(sample_size: u32, k: f64) -> f64 {
    let n = sample_size as f64;
    n / (n + k)
}

/// Memoized confidence weights for one scoring pass.
///
/// Bound to a single `k`; build a new one for a different configuration.
#[derive(Debug, Clone)]
pub struct ConfidenceWeights {
    k: f64,
    memo: HashMap<u32, f64>,
}

impl ConfidenceWeights {
    pub fn new(k: f64) -> Self {
        Self {
            k,
            memo: HashMap::new(),
        }
    }

    pub fn weight(&mut self, sample_size: u32) -> f64 {
        let k = self.k;
        *self
            .memo
            .entry(sample_size)
            .or_insert_with(|| confidence_weight(sample_size, k))
    }

    pub fn cached_sizes(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_games_has_zero_weight() {
        assert_eq!(confidence_weight(0, 20.0), 0.0);
    }

    #[test]
    fn test_weight_at_k_is_half() {
        assert_eq!(confidence_weight(20, 20.0), 0.5);
    }

    #[test]
    fn test_weight_strictly_increasing() {
        let mut previous = confidence_weight(0, 20.0);
        for n in 1..500 {
            let current = confidence_weight(n, 20.0);
            assert!(current > previous, "weight({n}) = {current} <= {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_weight_approaches_one() {
        let weight = confidence_weight(1_000_000, 20.0);
        assert!(weight < 1.0);
        assert!(1.0 - weight < 1e-4);
    }

    #[test]
    fn test_memo_reuses_entries() {
        let mut weights = ConfidenceWeights::new(20.0);
        assert_eq!(weights.weight(20), 0.5);
        assert_eq!(weights.weight(20), 0.5);
        assert_eq!(weights.weight(60), 0.75);
        assert_eq!(weights.cached_sizes(), 2);
    }

    #[test]
    fn test_memo_is_bound_to_k() {
        let mut default_k = ConfidenceWeights::new(20.0);
        let mut small_k = ConfidenceWeights::new(10.0);
        assert_eq!(default_k.weight(10), 10.0 / 30.0);
        assert_eq!(small_k.weight(10), 0.5);
    }
}
