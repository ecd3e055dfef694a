//! Storm selection predicates.

use landfall_track_models::{Fix, StormStatus};

/// Whether any fix carries `target` as its status. An empty slice is never
/// classified.
#[must_use]
pub fn is_classified_as(fixes: &[Fix], target: StormStatus) -> bool {
    fixes.iter().any(|fix| fix.status == target)
}

/// Inclusive year-range check.
#[must_use]
pub const fn in_year_range(year: i32, min_year: i32, max_year: i32) -> bool {
    min_year <= year && year <= max_year
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn classified_when_any_fix_matches() {
        let mut fixes = fixtures::fixes(
            &[(-80.0, 20.0), (-81.0, 21.0), (-82.0, 22.0)],
            StormStatus::TropicalStorm,
        );
        assert!(!is_classified_as(&fixes, StormStatus::Hurricane));

        fixes[1].status = StormStatus::Hurricane;
        assert!(is_classified_as(&fixes, StormStatus::Hurricane));
    }

    #[test]
    fn empty_fixes_are_not_classified() {
        assert!(!is_classified_as(&[], StormStatus::Hurricane));
    }

    #[test]
    fn other_targets_are_honored() {
        let fixes = fixtures::fixes(&[(-80.0, 20.0)], StormStatus::Extratropical);
        assert!(is_classified_as(&fixes, StormStatus::Extratropical));
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert!(in_year_range(1900, 1900, 2022));
        assert!(in_year_range(2022, 1900, 2022));
        assert!(in_year_range(1975, 1900, 2022));
        assert!(!in_year_range(1899, 1900, 2022));
        assert!(!in_year_range(2023, 1900, 2022));
    }
}
