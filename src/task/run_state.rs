/// Sequence bookkeeping for fetches issued by one widget.
///
/// Every evaluation takes a fresh run id, including evaluations that never
/// fetch, so only the completion for the latest id is ever applied.
#[derive(Debug, Clone, Default)]
pub struct FetchRunState {
    running: usize,
    sequence: u64,
    last_started_run_id: Option<u64>,
    last_finished_run_id: Option<u64>,
}

impl FetchRunState {
    pub fn running_count(&self) -> usize {
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running > 0
    }

    pub fn latest_run_id(&self) -> u64 {
        self.sequence
    }

    pub fn last_started_run_id(&self) -> Option<u64> {
        self.last_started_run_id
    }

    pub fn last_finished_run_id(&self) -> Option<u64> {
        self.last_finished_run_id
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn is_current(&self, run_id: u64) -> bool {
        run_id == self.sequence
    }

    pub fn on_started(&mut self, run_id: u64) {
        self.running = self.running.saturating_add(1);
        self.last_started_run_id = Some(run_id);
    }

    pub fn on_finished(&mut self, run_id: u64) {
        self.running = self.running.saturating_sub(1);
        self.last_finished_run_id = Some(run_id);
    }
}
