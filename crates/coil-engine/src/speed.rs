//! The traversal speed policy.

/// How many scheduler ticks should pass before the next step, given the
/// number of cells energized so far.
///
/// `max(2, 10 - (step_count - 1) / 3)` with division truncating toward zero,
/// so a fresh traversal (`step_count` 0 or 1) waits 10 ticks and the interval
/// ramps down to a floor of 2 as the circuit warms up. Pure function; a
/// scheduling hint for the external driver, never enforced internally.
pub fn ticks_until_next_step(step_count: u64) -> u64 {
    let ramp = (step_count as i64 - 1).max(0) / 3;
    (10 - ramp).max(2) as u64
}
