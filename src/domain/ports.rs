use crate::domain::model::{RelocationReport, ValidationReport};
use crate::utils::error::Result;

/// 任務的最終結果，決定行程的結束碼
pub trait TaskReport {
    fn is_success(&self) -> bool;
}

pub trait DistTask {
    type Report: TaskReport;

    fn name(&self) -> &str;
    fn execute(&self) -> Result<Self::Report>;
}

impl TaskReport for ValidationReport {
    fn is_success(&self) -> bool {
        ValidationReport::is_success(self)
    }
}

// 搬移工具沒有結束碼契約，只要沒有 IO 錯誤就算成功
impl TaskReport for RelocationReport {
    fn is_success(&self) -> bool {
        true
    }
}
