//! Record filters.
//!
//! Filters never modify records; they return the retained subset in input order.

use crate::{Config, VariantRecord};

/// Applies the quality filter followed by the distance filter, as enabled in the configuration.
pub fn apply<'a>(records: &'a [VariantRecord], config: &Config) -> Vec<&'a VariantRecord> {
    let records = records.iter().collect::<Vec<_>>();

    let records = match config.quality() {
        Some(cutoff) => quality(&records, cutoff),
        None => records,
    };

    match config.distance() {
        Some(distance) => self::distance(&records, distance),
        None => records,
    }
}

/// Retains records with QUAL strictly greater than the cutoff.
///
/// Records with missing QUAL are discarded.
pub fn quality<'a>(records: &[&'a VariantRecord], cutoff: f64) -> Vec<&'a VariantRecord> {
    records
        .iter()
        .filter(|record| record.qual.map_or(false, |qual| qual > cutoff))
        .copied()
        .collect()
}

/// Retains records spaced more than `distance` from their neighbours.
///
/// See [`retain_spaced`] for the exact policy. Positions are compared regardless of chromosome.
pub fn distance<'a>(records: &[&'a VariantRecord], distance: u64) -> Vec<&'a VariantRecord> {
    let positions = records.iter().map(|record| record.pos).collect::<Vec<_>>();

    records
        .iter()
        .zip(retain_spaced(&positions, distance))
        .filter_map(|(&record, retain)| retain.then_some(record))
        .collect()
}

/// Returns for each position whether it is retained by the distance filter.
///
/// Interior positions are retained if they are more than `distance` from both the previous and
/// the next position. The first position is only compared with the next, and the last two
/// positions are only compared with their previous position. All comparisons use the input
/// positions, so discarding a position does not affect the decision for its neighbours.
///
/// A single position is retained.
pub fn retain_spaced(positions: &[u64], distance: u64) -> Vec<bool> {
    let n = positions.len();
    let mut retain = vec![false; n];

    if n == 1 {
        retain[0] = true;
    }
    if n < 2 {
        return retain;
    }

    let spaced = |before: u64, after: u64| after > before.saturating_add(distance);

    retain[0] = spaced(positions[0], positions[1]);

    for i in 1..n.saturating_sub(2) {
        retain[i] =
            spaced(positions[i - 1], positions[i]) && spaced(positions[i], positions[i + 1]);
    }

    for i in (n - 2).max(1)..n {
        retain[i] = spaced(positions[i - 1], positions[i]);
    }

    retain
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::annotation::CodonPair;

    fn record(pos: u64, qual: Option<f64>) -> VariantRecord {
        VariantRecord {
            chrom: String::from("chr1"),
            pos,
            id: String::from("."),
            reference: String::from("A"),
            alternates: vec![String::from("T")],
            qual,
            filter: String::from("."),
            info: String::from("."),
            format: String::from("GT"),
            genotypes: vec![String::from("0")],
            annotation: None,
            codons: CodonPair::default(),
        }
    }

    fn positions(records: &[&VariantRecord]) -> Vec<u64> {
        records.iter().map(|record| record.pos).collect()
    }

    #[test]
    fn test_quality_is_strict() {
        let records = [
            record(1, Some(10.0)),
            record(2, Some(20.0)),
            record(3, Some(20.5)),
            record(4, None),
            record(5, Some(100.0)),
        ];
        let refs = records.iter().collect::<Vec<_>>();

        let filtered = quality(&refs, 20.0);

        assert_eq!(positions(&filtered), vec![3, 5]);
        assert!(filtered.iter().all(|r| r.qual.unwrap() > 20.0));
    }

    #[test]
    fn test_retain_spaced_boundary_asymmetry() {
        // 300 is retained although 305 is closer than the distance, since the second to last
        // position is only compared with its predecessor
        assert_eq!(
            retain_spaced(&[100, 105, 200, 300, 305], 10),
            vec![false, false, true, true, false]
        );
    }

    #[test]
    fn test_retain_spaced_does_not_cascade() {
        // 20 and 25 are discarded, but 25 still counts as the predecessor of 30
        assert_eq!(
            retain_spaced(&[0, 20, 25, 30, 100, 200], 10),
            vec![true, false, false, false, true, true]
        );
    }

    #[test]
    fn test_retain_spaced_is_strict() {
        assert_eq!(
            retain_spaced(&[10, 20, 31, 42, 60], 10),
            vec![false, false, true, true, true]
        );
    }

    #[test]
    fn test_retain_spaced_all_spaced() {
        assert_eq!(retain_spaced(&[1, 100, 200, 300], 10), vec![true; 4]);
    }

    #[test]
    fn test_retain_spaced_small() {
        assert_eq!(retain_spaced(&[], 10), Vec::<bool>::new());
        assert_eq!(retain_spaced(&[5], 10), vec![true]);
        assert_eq!(retain_spaced(&[5, 10], 10), vec![false, false]);
        assert_eq!(retain_spaced(&[5, 16], 10), vec![true, true]);
        assert_eq!(retain_spaced(&[5, 16, 20], 10), vec![true, true, false]);
    }

    #[test]
    fn test_retain_spaced_large_distance() {
        assert_eq!(
            retain_spaced(&[1, 2, u64::MAX], u64::MAX),
            vec![false, false, false]
        );
    }

    #[test]
    fn test_distance() {
        let records = [100, 105, 200, 300, 305].map(|pos| record(pos, Some(50.0)));
        let refs = records.iter().collect::<Vec<_>>();

        assert_eq!(positions(&distance(&refs, 10)), vec![200, 300]);
    }

    #[test]
    fn test_apply_quality_then_distance() {
        let records = [
            record(100, Some(50.0)),
            record(105, Some(1.0)),
            record(200, Some(50.0)),
            record(300, Some(50.0)),
            record(400, Some(50.0)),
        ];
        let config = Config::default()
            .set_quality(Some(10.0))
            .set_distance(Some(10));

        // 105 is removed by quality before distances are considered
        assert_eq!(
            positions(&apply(&records, &config)),
            vec![100, 200, 300, 400]
        );
    }

    #[test]
    fn test_apply_disabled() {
        let records = [record(1, None), record(2, Some(0.0))];

        assert_eq!(positions(&apply(&records, &Config::default())), vec![1, 2]);
    }
}
