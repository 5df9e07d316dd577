//! Keep-last reduction over prune candidates.
//!
//! Operates on the candidate subset only: it spares the newest `keep_last`
//! versions that matched a prune rule, not the newest versions overall.

use crate::domain::Version;

/// Candidates split into those to delete and those spared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Versions to delete, in crawl order.
    pub to_delete: Vec<Version>,
    /// Spared candidates, newest first.
    pub survivors: Vec<Version>,
}

/// Spare the `keep_last` most recently created candidates.
///
/// Candidates are ranked by `created_at` descending; ties keep their crawl
/// order. The remaining candidates keep their original relative order.
pub fn retain_newest(candidates: Vec<Version>, keep_last: usize) -> Reduction {
    if keep_last == 0 {
        return Reduction {
            to_delete: candidates,
            survivors: Vec::new(),
        };
    }

    let mut ranking: Vec<usize> = (0..candidates.len()).collect();
    // sort_by is stable, so equal timestamps stay in crawl order.
    ranking.sort_by(|&a, &b| candidates[b].created_at.cmp(&candidates[a].created_at));

    let mut spared = vec![false; candidates.len()];
    for &index in ranking.iter().take(keep_last) {
        spared[index] = true;
    }
    let survivor_order: Vec<usize> = ranking.into_iter().take(keep_last).collect();

    let mut slots: Vec<Option<Version>> = candidates.into_iter().map(Some).collect();
    let survivors = survivor_order
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect();
    let to_delete = slots
        .into_iter()
        .zip(spared)
        .filter_map(|(slot, spared)| if spared { None } else { slot })
        .collect();

    Reduction {
        to_delete,
        survivors,
    }
}
