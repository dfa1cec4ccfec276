//! Statistical mode with a stable tie-break.

use ordered_float::OrderedFloat;
use std::collections::HashMap;

use crate::error::ModeError;

/// Hash key for numeric equality: `-0.0` and `0.0` count as the same value.
fn key(n: f64) -> OrderedFloat<f64> {
    OrderedFloat(if n == 0.0 { 0.0 } else { n })
}

/// Return the most frequent value in `numbers`.
///
/// When several values share the highest count, the one encountered first
/// while scanning `numbers` in order wins. With all values distinct this is
/// simply the first element.
///
/// Fails with [`ModeError::InvalidInput`] for an empty slice or one holding a
/// non-finite value.
pub fn mode(numbers: &[f64]) -> Result<f64, ModeError> {
    if numbers.is_empty() {
        return Err(ModeError::InvalidInput("mode of an empty sequence"));
    }
    if numbers.iter().any(|n| !n.is_finite()) {
        return Err(ModeError::InvalidInput("mode of a non-finite value"));
    }

    let mut counts: HashMap<OrderedFloat<f64>, usize> = HashMap::with_capacity(numbers.len());
    let mut max_count = 0;
    for &n in numbers {
        let count = counts.entry(key(n)).or_insert(0);
        *count += 1;
        max_count = max_count.max(*count);
    }

    numbers
        .iter()
        .copied()
        .find(|&n| counts.get(&key(n)) == Some(&max_count))
        .ok_or(ModeError::InvalidInput("mode of an empty sequence"))
}
