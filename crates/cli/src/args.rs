use clap::Parser;
use extlab_lib::{constant::DEFAULT_CONFIG_PATH, log::LoggingFormat};
use std::path::PathBuf;

/// Global arguments used by all subcommands
#[derive(Debug, Parser)]
#[command(name = "extlab")]
pub struct GlobalArgs {
    /// Ledger RPC endpoint URL, overrides the config file
    #[arg(long, env = "RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Path to the configuration file (TOML format)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LoggingFormat::Standard, global = true)]
    pub logging_format: LoggingFormat,
}
