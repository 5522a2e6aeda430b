//! Rank statistics shared by the calculator, the scorer and the evaluator.
//!
//! Ranks follow the "average" tie rule: tied values share the mean of the
//! 1-based positions they occupy. `NaN` values are left out of the ranking
//! and receive `NaN`.

use ndarray::Array1;

use crate::Direction;

/// Ascending 1-based average ranks. `NaN` inputs receive `NaN`.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::average_ranks;
///
/// let ranks = average_ranks(&[3.0, 1.0, 3.0, 2.0]);
/// assert_eq!(ranks, vec![3.5, 1.0, 3.5, 2.0]);
/// ```
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).filter(|&i| !values[i].is_nan()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![f64::NAN; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold 1-based ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Percentile ranks in `(0, 1]`, where `1.0` is the best value for `direction`.
///
/// Each rank is divided by the number of non-`NaN` values. For
/// [`Direction::LowerIsBetter`] the smallest value gets `1.0`.
#[must_use]
pub fn percentile_rank(values: &[f64], direction: Direction) -> Vec<f64> {
    let ranks = average_ranks(values);
    let count = ranks.iter().filter(|r| !r.is_nan()).count() as f64;
    ranks
        .into_iter()
        .map(|r| match direction {
            Direction::HigherIsBetter => r / count,
            Direction::LowerIsBetter => (count + 1.0 - r) / count,
        })
        .collect()
}

/// [`percentile_rank`] over an ndarray column.
#[must_use]
pub fn percentile_rank_array(values: &Array1<f64>, direction: Direction) -> Array1<f64> {
    let ranks = match values.as_slice() {
        Some(slice) => percentile_rank(slice, direction),
        None => percentile_rank(&values.to_vec(), direction),
    };
    Array1::from_vec(ranks)
}

/// Arithmetic mean of the finite values, `NaN` if there are none.
#[must_use]
pub fn finite_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}
