use crate::domain::ports::{DistTask, TaskReport};
use crate::utils::error::Result;
use std::time::Instant;

pub struct TaskRunner<T: DistTask> {
    task: T,
}

impl<T: DistTask> TaskRunner<T> {
    pub fn new(task: T) -> Self {
        Self { task }
    }

    pub fn run(&self) -> Result<T::Report> {
        let started = Instant::now();
        tracing::info!("🚀 Starting {}", self.task.name());

        let report = self.task.execute()?;

        tracing::info!(
            success = report.is_success(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "🏁 Finished {}",
            self.task.name()
        );
        Ok(report)
    }

    /// 0 表示成功，1 表示失敗
    pub fn exit_code(report: &T::Report) -> i32 {
        if report.is_success() {
            0
        } else {
            1
        }
    }
}
