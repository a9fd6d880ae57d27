//! LivePix CLI - the LivePix payment platform in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{account, create, messages, payments, token, wallet, AuthArgs};

/// LivePix - payments and donation messages from your terminal
#[derive(Parser)]
#[command(name = "livepix", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    auth: AuthArgs,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log requests (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange client credentials for an access token
    Token,

    /// Show the account owning the credentials
    Account,

    /// Show wallet balances
    Wallet,

    /// List received payments
    Payments {
        /// Only show the payment with this reference
        #[arg(long)]
        reference: Option<String>,
    },

    /// List received messages
    Messages {
        /// Only show the message with this proof
        #[arg(long)]
        proof: Option<String>,
    },

    /// Request a payment
    Pay {
        /// Amount in centavos (minimum 100)
        amount: u64,
        /// Where the payer lands after checkout
        redirect_url: String,
    },

    /// Request a donation message
    Message {
        /// Amount in centavos (minimum 100)
        amount: u64,
        /// Sender username
        username: String,
        /// Message text
        message: String,
        /// Where the sender lands after checkout
        redirect_url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let client = commands::get_client()?;
    let api = &*client;
    let auth = &cli.auth;
    let json = cli.json;

    match cli.command {
        Commands::Token => token::run(api, auth, json).await,
        Commands::Account => account::run(api, auth, json).await,
        Commands::Wallet => wallet::run(api, auth, json).await,
        Commands::Payments { reference } => {
            payments::run(api, auth, reference.as_deref(), json).await
        }
        Commands::Messages { proof } => messages::run(api, auth, proof.as_deref(), json).await,
        Commands::Pay { amount, redirect_url } => {
            create::run_payment(api, auth, amount, &redirect_url, json).await
        }
        Commands::Message { amount, username, message, redirect_url } => {
            create::run_message(api, auth, amount, &username, &message, &redirect_url, json).await
        }
    }
}
