//! Reduction of per-frame probabilities to a single label.

use nalgebra::DMatrix;

/// Column index of the largest entry in each row.
///
/// Ties go to the lowest index. NaN entries never win over a comparable
/// value; a row with no comparable value at all maps to 0.
pub fn argmax_rows(probabilities: &DMatrix<f64>) -> Vec<usize> {
    probabilities
        .row_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_value = f64::NEG_INFINITY;
            for (i, &value) in row.iter().enumerate() {
                if value > best_value {
                    best = i;
                    best_value = value;
                }
            }
            best
        })
        .collect()
}

/// Most frequent item and its count.
///
/// Among items sharing the highest count, the one seen first wins.
pub fn majority_vote<T: PartialEq + Clone>(items: &[T]) -> Option<(T, usize)> {
    let mut tallies: Vec<(&T, usize)> = Vec::new();
    for item in items {
        match tallies.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => tallies.push((item, 1)),
        }
    }

    // Strictly greater keeps the earliest entry on a tie
    let mut winner: Option<(&T, usize)> = None;
    for (item, count) in tallies {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((item, count));
        }
    }

    winner.map(|(item, count)| (item.clone(), count))
}
