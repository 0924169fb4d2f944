/// Knobs for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Programs processed concurrently.
    pub workers: usize,
    /// Emit results in input order rather than completion order.
    pub preserve_order: bool,
    /// Include raw hours text in log events.
    pub log_data: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            preserve_order: true,
            log_data: false,
        }
    }
}

impl PipelineOptions {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
