use crate::config::DistConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 三個工具共用的旗標
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory that contains the `dist/` tree
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Optional TOML file overriding the default dist layout
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log format written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<DistConfig> {
        DistConfig::load(self.config.as_deref())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "fix-python-namespace")]
#[command(about = "Move buf.validate modules under cyberstorm.buf.validate and fix imports")]
pub struct RelocateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dry run - show what would change without touching the tree
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(about = "Check that generated API documents carry their version marker")]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Parser)]
#[command(name = "schema-dist")]
#[command(about = "Post-generation tooling for the schema dist/ tree")]
pub struct DistCli {
    #[command(subcommand)]
    pub command: DistCommand,
}

#[derive(Debug, Subcommand)]
pub enum DistCommand {
    /// Relocate buf.validate modules and rewrite imports
    FixNamespace(RelocateArgs),
    /// Validate dist/openapi/*.openapi.json
    ValidateOpenapi(ValidateArgs),
    /// Validate dist/openapi/*.swagger.json
    ValidateSwagger(ValidateArgs),
}

impl DistCommand {
    pub fn common(&self) -> &CommonArgs {
        match self {
            DistCommand::FixNamespace(args) => &args.common,
            DistCommand::ValidateOpenapi(args) | DistCommand::ValidateSwagger(args) => &args.common,
        }
    }
}
