//! Log-likelihood statistics used by the trainer
//!
//! Both tests return `None` when the counts leave the likelihood undefined
//! (empty corpus, zero denominators) or the result is not finite. Callers
//! treat `None` as "no evidence" and skip the candidate.

/// Probability of the alternative hypothesis in the abbreviation test
const ABBREV_ALT_PROBABILITY: f64 = 0.99;

/// `count * ln(p)`, with `0 * ln(0)` taken as 0
fn weighted_ln(count: f64, p: f64) -> f64 {
    if count == 0.0 {
        0.0
    } else {
        count * p.ln()
    }
}

/// Binomial log-likelihood of `k` successes in `n` trials at probability `p`
/// (without the binomial coefficient, which cancels in every ratio)
fn binomial_ll(k: f64, n: f64, p: f64) -> f64 {
    weighted_ln(k, p) + weighted_ln(n - k, 1.0 - p)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Dunning log-likelihood ratio used for abbreviation detection
///
/// Compares the null hypothesis that a period follows the type with the
/// corpus-wide period rate `count_b / n` against the alternative that it
/// (almost) always does.
pub fn dunning_log_likelihood(
    count_a: usize,
    count_b: usize,
    count_ab: usize,
    n: usize,
) -> Option<f64> {
    if n == 0 || count_a == 0 || count_b == 0 || count_ab > count_a {
        return None;
    }

    let p1 = count_b as f64 / n as f64;
    let (a, ab) = (count_a as f64, count_ab as f64);

    let null_hypothesis = binomial_ll(ab, a, p1);
    let alt_hypothesis = binomial_ll(ab, a, ABBREV_ALT_PROBABILITY);

    finite(-2.0 * (null_hypothesis - alt_hypothesis))
}

/// Contingency-table log-likelihood (G-test) for collocations and
/// sentence starters
///
/// `count_a` and `count_b` are the marginal counts of the two events,
/// `count_ab` their joint count and `n` the corpus size.
pub fn col_log_likelihood(
    count_a: usize,
    count_b: usize,
    count_ab: usize,
    n: usize,
) -> Option<f64> {
    if n == 0 || count_a == 0 || count_a >= n || count_ab > count_a || count_ab > count_b {
        return None;
    }

    let (a, b, ab, n) = (count_a as f64, count_b as f64, count_ab as f64, n as f64);

    let p = b / n;
    let p1 = ab / a;
    let p2 = (b - ab) / (n - a);

    let summand1 = binomial_ll(ab, a, p);
    let summand2 = binomial_ll(b - ab, n - a, p);
    let summand3 = if count_a == count_ab {
        0.0
    } else {
        binomial_ll(ab, a, p1)
    };
    let summand4 = if count_b == count_ab {
        0.0
    } else {
        binomial_ll(b - ab, n - a, p2)
    };

    finite(-2.0 * (summand1 + summand2 - summand3 - summand4))
}
