pub mod documents;
pub mod imports;
pub mod relocation;
pub mod runner;

pub use crate::domain::model::{
    DocumentKind, FileOutcome, RelocationOutcome, RelocationReport, ValidationReport,
};
pub use crate::domain::ports::{DistTask, TaskReport};
pub use crate::utils::error::Result;
