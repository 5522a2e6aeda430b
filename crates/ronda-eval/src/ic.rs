//! Information Coefficient (IC) calculations.
//!
//! IC measures the Spearman rank correlation between composite scores and a
//! realized outcome such as the next-period return.

use ndarray::Array1;
use ronda_traits::stats::average_ranks;

/// Spearman rank correlation between scores and outcomes.
///
/// Rows where either value is non-finite are dropped first. Returns `NaN`
/// when fewer than two rows remain, when the lengths differ, or when either
/// side is constant.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ronda_eval::calculate_ic;
///
/// let scores = array![80.0, 55.0, 20.0, 91.0];
/// let returns = array![0.02, 0.01, -0.01, 0.03];
/// assert!((calculate_ic(&scores, &returns) - 1.0).abs() < 1e-12);
/// ```
pub fn calculate_ic(scores: &Array1<f64>, outcomes: &Array1<f64>) -> f64 {
    if scores.len() != outcomes.len() {
        return f64::NAN;
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = scores
        .iter()
        .zip(outcomes.iter())
        .filter(|(s, r)| s.is_finite() && r.is_finite())
        .map(|(&s, &r)| (s, r))
        .unzip();

    if xs.len() < 2 {
        return f64::NAN;
    }

    pearson(&average_ranks(&xs), &average_ranks(&ys))
}

/// Pearson correlation of two equally long samples.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}
