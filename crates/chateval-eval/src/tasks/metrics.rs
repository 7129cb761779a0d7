//! Metric arithmetic shared by task scorers

/// Index of the highest score; the first index wins ties
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard error of a 0/1 outcome rate over `n` samples
pub fn proportion_stderr(rate: f64, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    (rate * (1.0 - rate) / (n - 1) as f64).sqrt()
}

/// Score divided by the byte length of the answer choice, without the
/// target delimiter. Empty choices count as one byte.
pub fn normalized(score: f64, choice: &str) -> f64 {
    score / choice.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[-20.0, 0.0, 0.0]), Some(1));
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), Some(0));
        assert_eq!(argmax(&[-100.0, -20.0, -100.0]), Some(1));
    }

    #[test]
    fn test_mean_and_stderr() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 0.0, 1.0, 0.0]), 0.5);
        assert_eq!(proportion_stderr(0.5, 1), 0.0);
        let se = proportion_stderr(0.5, 5);
        assert!((se - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(normalized(-20.0, "four"), -5.0);
        assert_eq!(normalized(-20.0, ""), -20.0);
    }
}
