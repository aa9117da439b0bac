//! `epic-events`: the Epic Events CRM in a terminal.
//!
//! # Usage
//!
//! ```
//! epic-events                       # log in if needed, then the menus
//! epic-events --config crm.toml login
//! epic-events logout
//! epic-events create-superuser --email mia@epic.test --first-name Mia --last-name Manager
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use epic_cli::{
  app::App,
  config::Settings,
  input::{self, PasswordPolicy},
  session::{SessionGate, Signer, TokenSlot},
  term::{Notice, StdTerminal, Terminal as _},
};
use epic_core::{
  account::{NewEmployee, Role},
  store::EpicStore as _,
};
use epic_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "epic-events", author, version, about = "Epic Events CRM")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "epic-events.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
  /// Open the interactive menus (the default).
  Start,
  /// Log in and store a fresh token.
  Login,
  /// Forget the stored token.
  Logout,
  /// Create a management employee; the password is read from stdin.
  CreateSuperuser {
    #[arg(long)]
    email:      String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name:  String,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Warnings only by default; the prompts own stdout.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {:?}", cli.config))?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;

  let signer = Signer::new(settings.secret_key.as_bytes()).context("invalid signing key")?;
  let mut gate =
    SessionGate::load(TokenSlot::new(&settings.token_path), signer, settings.token_ttl())
      .with_context(|| format!("failed to read token at {:?}", settings.token_path))?;
  let policy = PasswordPolicy { min_length: settings.password_min_length };
  let mut term = StdTerminal::new();

  match cli.command.unwrap_or(Cmd::Start) {
    Cmd::Start => {
      App::new(store, gate, policy).run(&mut term).await.context("session aborted")?;
    }
    Cmd::Login => {
      gate.login(&store, &mut term).await.context("login failed")?;
    }
    Cmd::Logout => {
      gate.logout().context("failed to clear the token")?;
      term.notify(Notice::Success, "Employee successfully logged out!");
    }
    Cmd::CreateSuperuser { email, first_name, last_name } => {
      anyhow::ensure!(input::validate_email(&email), "invalid email address: {email}");
      let password = input::password(&mut term, "Password", &policy)
        .context("no password entered")?;
      let employee = store
        .create_employee(NewEmployee {
          email,
          password,
          first_name,
          last_name,
          role: Role::Management,
        })
        .await
        .context("failed to create the superuser")?;
      tracing::info!(email = %employee.email, "superuser created");
      term.notify(Notice::Success, &format!("Superuser {} created!", employee.email));
    }
  }

  Ok(())
}
