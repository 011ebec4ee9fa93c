//! CLI command implementations.

mod auth;
mod collections;
mod config;
mod decks;
mod flashcards;

pub use auth::{sign_in, sign_out, sign_up, status};
pub use collections::{collections_create, collections_list};
pub use config::{config_set_api_url, config_show};
pub use decks::{decks_answer, decks_list, decks_show};
pub use flashcards::{flashcards_build, flashcards_create, flashcards_list};

use crate::output::OutputFormat;
use anyhow::Result;
use flashmemo_api::{ApiClient, User};
use flashmemo_config_and_utils::{Config, Paths};
use flashmemo_session::SessionManager;
use flashmemo_storage::{create_storage, KeyValueStorage};
use std::io::{self, Write};
use std::sync::Arc;

/// Everything a command needs: the shared API client and the restored session.
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionManager,
    pub format: OutputFormat,
}

impl Context {
    /// Build the API client and storage, then bootstrap the session from disk.
    pub async fn bootstrap(paths: Paths, config: Config, format: OutputFormat) -> Result<Self> {
        paths.ensure_dirs()?;
        let api = ApiClient::from_config(&config)?;
        let storage: Arc<dyn KeyValueStorage> = Arc::from(create_storage(&paths.storage_dir())?);
        let session = SessionManager::bootstrap_with_client(storage, &api).await;

        Ok(Self {
            paths,
            config,
            api,
            session,
            format,
        })
    }

    /// The signed-in user, or an error telling the user how to sign in.
    pub fn require_user(&self) -> Result<User> {
        self.session
            .require_user()
            .map_err(|_| anyhow::anyhow!("Not signed in. Run 'flashmemo sign-in' first"))
    }
}

/// Read a non-empty line from stdin after printing `label`.
fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        anyhow::bail!("{} is required", label.trim_end_matches([':', ' ']));
    }
    Ok(line)
}

/// Use the given value or prompt for it.
fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => prompt_line(label),
    }
}

/// Read a password without echo.
fn prompt_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}

fn display_name(user: &User) -> String {
    match (&user.email, user.name.is_empty()) {
        (Some(email), false) => format!("{} <{}>", user.name, email),
        (Some(email), true) => email.clone(),
        (None, false) => user.name.clone(),
        (None, true) => user.id.clone(),
    }
}
