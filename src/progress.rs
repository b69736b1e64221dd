// src/progress.rs
/// Progress reporting for the per-participant fetches.
/// The CLI implements this with log lines; tests use it to observe the run.
pub trait Progress {
    /// Called once the participant list is known.
    fn begin(&mut self, _total: usize) {}

    /// Called when one participant's posts have been fetched and filtered.
    /// Completion order follows the workers, not the calendar.
    fn item_done(&mut self, _index: usize, _user: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
