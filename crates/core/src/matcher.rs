//! Temperature-to-beer matching.
//!
//! Two steps: keep the records whose serving range contains the temperature,
//! then pick the one whose range midpoint is nearest to it. Ties go to the
//! record that comes first in style order.

use crate::beer::BeerRecord;

/// Records whose `[min_temp, max_temp]` contains `temperature`, ordered by
/// `beer_style` ascending.
///
/// Mirrors the SQL predicate and ordering in
/// `SqliteBeerStore::find_by_temperature`, which is what the party flow
/// queries. Stores that keep records in memory filter through this. The sort
/// is stable, so records with the same style keep their input order.
pub fn filter_candidates(records: &[BeerRecord], temperature: f64) -> Vec<BeerRecord> {
    let mut candidates: Vec<BeerRecord> = records
        .iter()
        .filter(|r| r.accepts(temperature))
        .cloned()
        .collect();
    candidates.sort_by(|a, b| a.beer_style.cmp(&b.beer_style));
    candidates
}

/// Pick the candidate whose range midpoint is closest to `temperature`.
///
/// A later candidate only replaces the current best when its distance is
/// strictly smaller, so the earliest candidate wins ties. Returns `None` for
/// an empty slice.
pub fn select_closest(candidates: &[BeerRecord], temperature: f64) -> Option<&BeerRecord> {
    match candidates {
        [] => None,
        [only] => Some(only),
        [first, rest @ ..] => {
            let mut best = first;
            let mut best_distance = first.midpoint_distance(temperature);
            for candidate in rest {
                let distance = candidate.midpoint_distance(temperature);
                if distance < best_distance {
                    best = candidate;
                    best_distance = distance;
                }
            }
            Some(best)
        }
    }
}
