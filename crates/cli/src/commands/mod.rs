//! CLI command implementations.

pub mod addresses;
pub mod checkout;
pub mod orders;

use std::io::{BufRead, Write};
use std::sync::Arc;

use shopfront_client::api::ApiClient;
use shopfront_client::notify::{Notice, NoticeLevel, Notifier};
use shopfront_client::views::{Confirm, ListView};
use shopfront_client::{AddressStore, ApiError, ClientConfig, ConfigError, OrderStore, SelectionFile};
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Api(#[from] ApiError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store already reported why; this only sets the exit code.
    #[error("{0} failed")]
    ActionFailed(&'static str),
}

/// Stores and prompts shared by every command.
pub struct Context {
    pub addresses: AddressStore,
    pub orders: OrderStore,
    pub confirm: TerminalConfirm,
}

impl Context {
    /// Build stores from `SHOPFRONT_*` environment variables.
    pub fn from_env(assume_yes: bool) -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        tracing::debug!(?config, "loaded configuration");

        let client = ApiClient::new(&config)?;
        if !client.is_authenticated() {
            tracing::warn!("SHOPFRONT_API_TOKEN is not set; account data will be empty");
        }

        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
        Ok(Self {
            addresses: AddressStore::new(client.clone(), Arc::clone(&notifier))
                .with_selection_file(SelectionFile::new(&config.state_path)),
            orders: OrderStore::new(client, notifier),
            confirm: TerminalConfirm { assume_yes },
        })
    }
}

/// Prints notices to stderr, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

/// Asks on the terminal unless `--yes` was passed.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    #[allow(clippy::print_stderr)]
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Print a list view, one line per row.
#[allow(clippy::print_stdout)]
pub fn print_list<T>(view: &ListView<T>, empty: &str, line: impl Fn(&T) -> String) {
    match view {
        // Commands await their fetch before rendering.
        ListView::Loading => println!("Loading..."),
        ListView::Error(message) => println!("{message}"),
        ListView::Empty => println!("{empty}"),
        ListView::Populated(rows) => {
            for row in rows {
                println!("{}", line(row));
            }
        }
    }
}
