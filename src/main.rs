use clap::Parser;
use schema_dist_tools::app::commands;
use schema_dist_tools::utils::logger;
use schema_dist_tools::{DistCli, DistCommand, DocumentKind};

fn main() {
    let cli = DistCli::parse();

    let common = cli.command.common();
    logger::init_logger(common.log_format, common.verbose);
    if common.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let exit_code = match &cli.command {
        DistCommand::FixNamespace(args) => match commands::run_fix_namespace(args) {
            Ok(_) => 0,
            Err(e) => {
                commands::report_error(&e);
                1
            }
        },
        DistCommand::ValidateOpenapi(args) => {
            commands::validate_exit_code(DocumentKind::OpenApi, args)
        }
        DistCommand::ValidateSwagger(args) => {
            commands::validate_exit_code(DocumentKind::Swagger, args)
        }
    };

    std::process::exit(exit_code);
}
