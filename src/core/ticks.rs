use smallvec::SmallVec;

/// Lowest value-axis maximum, so an all-zero series still has a readable axis.
pub const VALUE_AXIS_MIN_MAX: u64 = 4;

/// Top of the value axis: the series maximum floored at [`VALUE_AXIS_MIN_MAX`].
#[must_use]
pub fn value_axis_max(values: &[u64]) -> u64 {
    values
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(VALUE_AXIS_MIN_MAX)
}

/// Value-axis ticks `{0, round(max / 2), max}` without duplicates, ascending.
#[must_use]
pub fn value_ticks(axis_max: u64) -> SmallVec<[u64; 3]> {
    // Half rounds up, matching round-half-up on the midpoint.
    let mid = axis_max / 2 + axis_max % 2;
    dedup_in_order([0, mid, axis_max])
}

/// Indices labeled on the day axis for a series of `len` samples.
///
/// Quartile positions are rounded half-up and clamped to the last index, then
/// deduplicated preserving order.
#[must_use]
pub fn day_tick_indices(len: usize) -> SmallVec<[usize; 5]> {
    if len == 0 {
        return SmallVec::new();
    }
    let last = len - 1;
    let at = |fraction: f64| ((len as f64 * fraction).round() as usize).min(last);
    dedup_in_order([0, at(0.25), at(0.5), at(0.75), last])
}

fn dedup_in_order<T: PartialEq + Copy, const N: usize>(items: [T; N]) -> SmallVec<[T; N]>
where
    [T; N]: smallvec::Array<Item = T>,
{
    let mut out: SmallVec<[T; N]> = SmallVec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
