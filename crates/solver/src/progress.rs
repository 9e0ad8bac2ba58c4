//! Progress reporting.

/// Receives `(done, total)` after each relic/epic pair is searched.
pub trait ProgressSink {
    fn report(&mut self, done: usize, total: usize);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}

/// Discards progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _done: usize, _total: usize) {}
}

/// Percentage of `done` over `total`, 100 when there is nothing to do.
pub fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |done: usize, total: usize| seen.push((done, total));
            sink.report(1, 4);
            sink.report(2, 4);
        }
        assert_eq!(seen, vec![(1, 4), (2, 4)]);
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(0, 0), 100.0);
    }
}
