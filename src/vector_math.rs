use std::cmp::Ordering;

/// Cosine similarity in `[-1, 1]`.
///
/// Total over all inputs: empty, zero-magnitude, length-mismatched or
/// non-finite vectors score exactly 0 ("no similarity").
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // cosine is scale-invariant; scaling by the largest component keeps the
    // squared terms away from underflow and overflow
    let (Some(scale_a), Some(scale_b)) = (max_abs(a), max_abs(b)) else {
        return 0.0;
    };

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }

    let score = dot / denom;
    if score.is_finite() {
        // rounding can push identical vectors a hair past 1
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Largest absolute component, or `None` for zero or non-finite vectors.
fn max_abs(v: &[f64]) -> Option<f64> {
    let mut max = 0.0_f64;
    for x in v {
        if !x.is_finite() {
            return None;
        }
        max = max.max(x.abs());
    }
    (max > 0.0).then_some(max)
}

/// Orders scores highest first; incomparable values are treated as equal.
pub fn descending(left: f64, right: f64) -> Ordering {
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}

/// Scores each `(item, embedding)` candidate against `query` and returns
/// `(item, score)` pairs with the most similar first. The sort is stable, so
/// ties keep input order.
pub fn rank_descending_by_cosine<'v, T>(
    query: &[f64],
    candidates: impl IntoIterator<Item = (T, &'v [f64])>,
) -> Vec<(T, f64)> {
    let mut scores: Vec<(T, f64)> = candidates
        .into_iter()
        .map(|(item, candidate)| (item, cosine_similarity(query, candidate)))
        .collect();

    scores.sort_by(|left, right| descending(left.1, right.1));
    scores
}
