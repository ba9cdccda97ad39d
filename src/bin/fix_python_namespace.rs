use clap::Parser;
use schema_dist_tools::app::commands;
use schema_dist_tools::utils::logger;
use schema_dist_tools::RelocateArgs;

fn main() {
    let args = RelocateArgs::parse();
    logger::init_logger(args.common.log_format, args.common.verbose);

    match commands::run_fix_namespace(&args) {
        Ok(report) => {
            tracing::debug!(
                moved = report.relocation.moved().len(),
                shadow_removed = report.shadow_removed,
                rewritten = report.rewritten_files.len(),
                "Namespace cleanup report"
            );
        }
        Err(e) => {
            commands::report_error(&e);
            std::process::exit(1);
        }
    }
}
