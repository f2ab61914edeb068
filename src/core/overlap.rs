use crate::models::TimeRange;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Overlap duration in hours between two time ranges.
///
/// The overlap window is `[max(starts), min(ends)]`; a non-positive window
/// (disjoint or inverted input) yields zero.
#[inline]
pub fn overlap_hours(a: &TimeRange, b: &TimeRange) -> f64 {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);

    let diff = (end - start).num_milliseconds();
    if diff <= 0 {
        return 0.0;
    }

    diff as f64 / MILLIS_PER_HOUR
}

/// Aggregate overlap of a base window against a set of availability windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityCoverage {
    pub overlap_hours: f64,
    pub coverage_ratio: f64,
}

/// Total overlap hours and coverage ratio of `base` against `ranges`.
///
/// The summed overlap is capped at the base duration so that overlapping or
/// duplicated availability windows cannot push coverage past 100%. A
/// degenerate base window reports zero coverage.
pub fn calculate_availability_coverage(
    base: &TimeRange,
    ranges: &[TimeRange],
) -> AvailabilityCoverage {
    let base_duration_hours =
        ((base.end - base.start).num_milliseconds() as f64 / MILLIS_PER_HOUR).max(0.0);

    if base_duration_hours <= 0.0 {
        return AvailabilityCoverage {
            overlap_hours: 0.0,
            coverage_ratio: 0.0,
        };
    }

    let total: f64 = ranges.iter().map(|range| overlap_hours(base, range)).sum();
    let capped_total = total.min(base_duration_hours);

    AvailabilityCoverage {
        overlap_hours: capped_total,
        coverage_ratio: (capped_total / base_duration_hours).min(1.0),
    }
}

/// Whether any of the provided windows overlaps the base window.
pub fn has_any_overlap(base: &TimeRange, ranges: &[TimeRange]) -> bool {
    ranges.iter().any(|range| overlap_hours(base, range) > 0.0)
}
