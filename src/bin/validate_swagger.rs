use clap::Parser;
use schema_dist_tools::app::commands;
use schema_dist_tools::utils::logger;
use schema_dist_tools::{DocumentKind, ValidateArgs};

fn main() {
    let args = ValidateArgs::parse();
    logger::init_logger(args.common.log_format, args.common.verbose);

    std::process::exit(commands::validate_exit_code(DocumentKind::Swagger, &args));
}
