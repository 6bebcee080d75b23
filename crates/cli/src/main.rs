mod args;
mod commands;

use args::GlobalArgs;
use clap::{Parser, Subcommand};
use extlab_lib::{
    config::{DefaultState, RunnerPolicy},
    error::ExtError,
    log::{log_filter, LoggingFormat},
    rpc::get_rpc_client,
    sanitize::sanitize_message,
    Config, RpcLedger,
};

#[derive(Subcommand)]
enum Commands {
    /// Provision a mint and two accounts, then run every extension scenario
    Run {
        /// Keep going after a scenario with an unexpected outcome
        #[arg(long, default_value_t = false)]
        lenient: bool,

        /// Amount minted into the source account
        #[arg(long)]
        mint_amount: Option<u64>,

        /// Amount transferred from the source to the destination account
        #[arg(long)]
        transfer_amount: Option<u64>,
    },
    /// Show the identity and its balance
    Identity {
        /// Airdrop when the balance is below the configured minimum
        #[arg(long, default_value_t = false)]
        fund: bool,
    },
    /// Create a mint with the default account state extension
    CreateMint {
        #[arg(long)]
        decimals: Option<u8>,

        #[arg(long, value_enum)]
        default_state: Option<DefaultState>,
    },
    /// Create a token account with immutable owner, required memos and CPI guard
    CreateAccount {
        #[arg(long)]
        mint: String,
    },
    /// Decode and print a mint
    InspectMint { mint: String },
    /// Decode and print a token account
    InspectAccount { account: String },
}

#[derive(Parser)]
#[command(author, version, about = "extlab - exercise token-2022 extensions against a ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[tokio::main]
async fn main() -> Result<(), ExtError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(&cli.global_args.logging_format);

    let mut config = Config::load_config(&cli.global_args.config).unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {e}"));
        std::process::exit(1);
    });

    if let Some(rpc_url) = &cli.global_args.rpc_url {
        config.rpc.url = rpc_url.clone();
    }

    if let Some(Commands::Run { lenient, mint_amount, transfer_amount }) = &cli.command {
        if *lenient {
            config.runner.policy = RunnerPolicy::Lenient;
        }
        if let Some(amount) = mint_amount {
            config.scenario.mint_amount = *amount;
        }
        if let Some(amount) = transfer_amount {
            config.scenario.transfer_amount = *amount;
        }
    }

    config.validate().unwrap_or_else(|e| {
        print_error(&format!("Invalid configuration: {e}"));
        std::process::exit(1);
    });

    log::info!("Using ledger endpoint {}", sanitize_message(&config.rpc.url));
    let ledger = RpcLedger::new(get_rpc_client(&config.rpc));

    let result = match cli.command {
        Some(Commands::Run { .. }) => match commands::run_lab(&ledger, &config).await {
            Ok(report) => {
                println!("{report}");
                if !report.all_passed() {
                    print_error("One or more scenarios had an unexpected outcome");
                    std::process::exit(1);
                }
                Ok(())
            }
            Err(e) => Err(e),
        },
        Some(Commands::Identity { fund }) => commands::show_identity(&ledger, &config, fund).await,
        Some(Commands::CreateMint { decimals, default_state }) => {
            commands::create_mint(&ledger, &config, decimals, default_state).await
        }
        Some(Commands::CreateAccount { mint }) => {
            commands::create_account(&ledger, &config, &mint).await
        }
        Some(Commands::InspectMint { mint }) => commands::inspect_mint(&ledger, &mint).await,
        Some(Commands::InspectAccount { account }) => {
            commands::inspect_account(&ledger, &account).await
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            println!("Available commands:");
            println!("  run              - Provision accounts and run every scenario");
            println!("  identity         - Show the identity and its balance");
            println!("  create-mint      - Create a mint with a default account state");
            println!("  create-account   - Create a token account with extensions");
            println!("  inspect-mint     - Decode a mint");
            println!("  inspect-account  - Decode a token account");
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn print_error(message: &str) {
    eprintln!("Error: {message}");
}

fn setup_logging(format: &LoggingFormat) {
    let subscriber = tracing_subscriber::fmt().with_env_filter(log_filter());
    match format {
        LoggingFormat::Standard => subscriber.init(),
        LoggingFormat::Json => subscriber.json().init(),
    }
}
