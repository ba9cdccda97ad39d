use crate::config::cli::{RelocateArgs, ValidateArgs};
use crate::core::documents::DocumentValidator;
use crate::core::relocation::NamespaceRelocator;
use crate::core::runner::TaskRunner;
use crate::domain::model::{DocumentKind, RelocationReport, ValidationReport};
use crate::utils::error::DistError;
use anyhow::Context;

pub fn run_fix_namespace(args: &RelocateArgs) -> anyhow::Result<RelocationReport> {
    let config = args
        .common
        .load_config()
        .context("Failed to load dist configuration")?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the dist tree will not be modified");
    }

    let relocator = NamespaceRelocator::new(&args.common.root, config.relocation)?
        .with_dry_run(args.dry_run);
    let report = TaskRunner::new(relocator)
        .run()
        .context("Python namespace cleanup aborted")?;
    Ok(report)
}

pub fn run_validate(kind: DocumentKind, args: &ValidateArgs) -> anyhow::Result<ValidationReport> {
    let config = args
        .common
        .load_config()
        .context("Failed to load dist configuration")?;

    let validator = DocumentValidator::new(kind, &args.common.root, &config.validation);
    let report = TaskRunner::new(validator)
        .run()
        .with_context(|| format!("Could not scan {} documents", kind.short_name()))?;

    if report.is_success() {
        println!("✅ All {} files are valid", kind.label());
    } else {
        println!("❌ Some {} files are invalid", kind.label());
    }
    Ok(report)
}

/// 驗證並回傳行程結束碼：全部通過為 0，其餘為 1
pub fn validate_exit_code(kind: DocumentKind, args: &ValidateArgs) -> i32 {
    match run_validate(kind, args) {
        Ok(report) => TaskRunner::<DocumentValidator>::exit_code(&report),
        Err(e) => {
            report_error(&e);
            1
        }
    }
}

pub fn report_error(error: &anyhow::Error) {
    tracing::error!("❌ {:#}", error);
    match error.chain().find_map(|cause| cause.downcast_ref::<DistError>()) {
        Some(dist_error) => {
            eprintln!("❌ {}", dist_error.user_friendly_message());
            eprintln!("💡 Suggestion: {}", dist_error.recovery_suggestion());
        }
        None => eprintln!("❌ {:#}", error),
    }
}
