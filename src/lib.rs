pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::{CommonArgs, DistCli, DistCommand, RelocateArgs, ValidateArgs};
pub use crate::config::DistConfig;
pub use crate::core::{
    documents::DocumentValidator, imports::ImportRewriter, relocation::NamespaceRelocator,
    runner::TaskRunner,
};
pub use crate::domain::model::DocumentKind;
pub use crate::utils::error::{DistError, Result};
