use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use sheetgate::booter::Booter;
use sheetgate::config::{AppConfig, parse_api_base};
use sheetgate::gate::{GateError, PasswordGate, SessionState, SessionStore};
use sheetgate::server::router::{build_router, check_assets};
use sheetgate::server::types::ShimState;
use sheetgate::upload::{
    CandidateFile, DirectorySink, UploadClient, UploadOutcome, UploadWorkflow, render_failure,
};
use sheetgate::utils::constants::SPA_ENTRY_DOCUMENT;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// sheetgate - password-gated Excel upload client and static front-end server
#[derive(Parser, Debug)]
#[command(name = "sheetgate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base address of the processing API (overrides API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory holding the session flag (overrides SESSION_DIR)
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the built front end with SPA fallback
    Serve {
        /// Asset directory (overrides DIST_DIR)
        #[arg(long)]
        dist: Option<PathBuf>,

        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Unlock the session with the app password
    Login {
        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the unlocked session
    Logout,

    /// Upload a spreadsheet and save the processed result
    Upload {
        /// The .xlsx or .xls file to send
        file: PathBuf,

        /// Where to save the processed file
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Declare this media type instead of guessing from the extension
        #[arg(long)]
        content_type: Option<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(api_base) = &cli.api_base {
        config.api_base = parse_api_base(api_base)?;
    }
    if let Some(dir) = &cli.session_dir {
        config.session_dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!("config: {:?}", config);

    match cli.command {
        Commands::Serve { dist, port } => {
            serve(config, dist, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Login { password } => login(&config, password).await,
        Commands::Logout => {
            SessionState::load(SessionStore::new(&config.session_dir)).end()?;
            println!("Signed out.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Upload {
            file,
            out,
            content_type,
        } => upload(&config, file, out, content_type).await,
    }
}

async fn serve(config: AppConfig, dist: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let dist_dir = dist.unwrap_or(config.dist_dir);
    let state = ShimState::new(&dist_dir, SPA_ENTRY_DOCUMENT);
    check_assets(&state)?;

    let booter = Booter::new(port.unwrap_or(config.port)).await?;
    booter.start(build_router(&state)).await
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn login(config: &AppConfig, password: Option<String>) -> Result<ExitCode> {
    let mut session = SessionState::load(SessionStore::new(&config.session_dir));
    if session.is_authenticated() {
        println!("Already signed in.");
        return Ok(ExitCode::SUCCESS);
    }

    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };
    let gate = PasswordGate::new(Client::new(), &config.api_base);
    match gate.unlock(&password, &mut session).await {
        Ok(()) => {
            println!("Signed in.");
            Ok(ExitCode::SUCCESS)
        }
        Err(GateError::Session(e)) => Err(e),
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn upload(
    config: &AppConfig,
    file: PathBuf,
    out: PathBuf,
    content_type: Option<String>,
) -> Result<ExitCode> {
    let session = SessionState::load(SessionStore::new(&config.session_dir));
    if !session.is_authenticated() {
        eprintln!("Not signed in. Run `sheetgate login` first.");
        return Ok(ExitCode::FAILURE);
    }

    let candidate = CandidateFile::from_path(&file).map(|c| match content_type {
        Some(media_type) => c.with_media_type(media_type),
        None => c,
    });

    let mut workflow = UploadWorkflow::new();
    if workflow.select(candidate.as_ref()).is_ok() {
        let client = UploadClient::new(Client::new(), &config.api_base);
        workflow.upload(&client, &DirectorySink::new(out)).await;
    }

    match workflow.outcome() {
        UploadOutcome::Succeeded { message, saved_to } => {
            println!("{}", message);
            println!("Saved to {}", saved_to.display());
            Ok(ExitCode::SUCCESS)
        }
        UploadOutcome::Failed(failure) => {
            eprint!("{}", render_failure(&failure.message, &failure.details));
            Ok(ExitCode::FAILURE)
        }
        other => {
            tracing::error!("upload ended in unexpected state {:?}", other);
            Ok(ExitCode::FAILURE)
        }
    }
}
