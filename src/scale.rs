use clap::ValueEnum;

/// Which way to cycle through the target scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Direction {
    Forwards,
    Backwards,
}

/// Pick the next scale to apply when cycling through `targets`.
///
/// `targets` must be sorted ascending. Going forwards the result is the first
/// target strictly greater than `current`, wrapping to the smallest target
/// when `current` is at or beyond the maximum; going backwards it is the last
/// target strictly less than `current`, wrapping to the largest. A scale
/// equal to `current` is never returned, which is what keeps repeated
/// invocations cycling instead of getting stuck. An empty `targets` yields
/// `None`: nothing to do.
pub(crate) fn select_next_scale(
    current: f64,
    targets: &[f64],
    direction: Direction,
) -> Option<f64> {
    match direction {
        Direction::Forwards => targets
            .iter()
            .copied()
            .find(|&scale| scale > current)
            .or_else(|| targets.first().copied()),
        Direction::Backwards => targets
            .iter()
            .rev()
            .copied()
            .find(|&scale| scale < current)
            .or_else(|| targets.last().copied()),
    }
}
