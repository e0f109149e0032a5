//! `portal` — terminal front end for the portal backend.
//!
//! One-shot commands cover signup and availability checks. Anything that
//! needs a signed-in session runs inside `portal shell`, which keeps a single
//! cookie jar for the life of the process the way a browser tab would.

mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use portal::config::{BASE_URL_ENV, ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_STATE_DIR, STATE_DIR_ENV};
use portal::forms::SignupForm;
use portal::net::error::TransportError;
use portal::state::storage::FileStorage;
use portal::{ApiClient, AuthStore, ReqwestTransport, Session, SessionError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("output encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Portal login, signup, and project dashboard client")]
struct Cli {
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = STATE_DIR_ENV, default_value = DEFAULT_STATE_DIR)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account (does not sign in).
    Signup(SignupArgs),
    /// Ask whether an email address is still free.
    CheckEmail { email: String },
    /// Ask whether a username is still free.
    CheckUsername { username: String },
    /// Confirm an email address with the token from the verification mail.
    VerifyEmail { token: String },
    /// Print the locally persisted auth state.
    Status,
    /// Interactive session: login, projects, join, access, logout.
    Shell,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    username: String,

    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    confirm_password: String,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,
}

impl From<SignupArgs> for SignupForm {
    fn from(args: SignupArgs) -> Self {
        Self {
            username: args.username,
            password: args.password,
            confirm_password: args.confirm_password,
            name: args.name,
            email: args.email,
            phone: args.phone,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::new(&cli.base_url, cli.state_dir)?;
    let transport = ReqwestTransport::new(&config.base_url)?;
    let store = AuthStore::load(FileStorage::new(&config.state_dir));
    let session = Session::new(ApiClient::new(transport), store);
    tracing::debug!(base_url = %config.base_url, state_dir = %config.state_dir.display(), "portal client ready");

    match cli.command {
        Command::Signup(args) => {
            let envelope = session.signup(&args.into()).await?;
            print_json(&envelope)
        }
        Command::CheckEmail { email } => {
            let available = session.email_available(&email).await?;
            print_json(&serde_json::json!({ "email": email.trim(), "available": available }))
        }
        Command::CheckUsername { username } => {
            let available = session.username_available(&username).await?;
            print_json(&serde_json::json!({ "username": username.trim(), "available": available }))
        }
        Command::VerifyEmail { token } => {
            let envelope = session.verify_email(&token).await?;
            print_json(&envelope)
        }
        Command::Status => print_json(&session.store().snapshot()),
        Command::Shell => shell::run(&session).await,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
