//! Flashmemo CLI - study flashcard decks from the terminal.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;
use flashmemo_config_and_utils::{init_logging, Config, Paths};
use tracing::debug;

/// Flashmemo CLI - sign in, build decks, and answer them.
#[derive(Parser)]
#[command(name = "flashmemo")]
#[command(about = "Flashmemo CLI for flashcard study")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// API base URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    SignIn {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account
    SignUp {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Display name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Sign out and clear the stored session
    SignOut,

    /// Show session status
    Status,

    /// Answer decks
    Decks {
        #[command(subcommand)]
        command: DeckCommands,
    },

    /// Manage collections
    Collections {
        #[command(subcommand)]
        command: CollectionCommands,
    },

    /// Manage flashcards
    Flashcards {
        #[command(subcommand)]
        command: FlashcardCommands,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum DeckCommands {
    /// List decks waiting to be answered
    List,
    /// Show a deck's flashcards
    Show {
        /// Deck ID
        id: String,
    },
    /// Answer a deck
    Answer {
        /// Deck ID
        id: String,
        /// Response number per flashcard, in order (prompted when omitted)
        #[arg(short, long = "choice", value_delimiter = ',')]
        choices: Vec<usize>,
    },
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// List collections
    List,
    /// Create a collection
    Create {
        /// Collection name
        name: String,
        /// Collection description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Category ID
        #[arg(long)]
        category: Option<String>,
        /// Privacy status (public or private)
        #[arg(long)]
        privacy: Option<String>,
    },
}

#[derive(Subcommand)]
enum FlashcardCommands {
    /// List flashcards in a collection
    List {
        /// Collection ID
        collection: String,
    },
    /// Create a flashcard
    Create {
        /// Collection ID
        collection: String,
        /// Question side
        #[arg(long)]
        front: String,
        /// The correct response
        #[arg(long)]
        correct: String,
        /// A wrong response (repeatable)
        #[arg(long = "wrong", required = true)]
        wrong: Vec<String>,
    },
    /// Build a deck from a collection
    Build {
        /// Collection ID
        collection: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Set and save the API base URL
    SetApiUrl {
        /// New base URL
        url: String,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let paths = Paths::new()?;
    let mut config = Config::load(&paths)?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
        config.validate()?;
    }

    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
    init_logging(&log_level);
    debug!(api_url = %config.api_url, "Starting flashmemo");

    let ctx = Context::bootstrap(paths, config, cli.format).await?;

    match cli.command {
        Commands::SignIn { email } => commands::sign_in(&ctx, email).await,
        Commands::SignUp { email, name } => commands::sign_up(&ctx, email, name).await,
        Commands::SignOut => commands::sign_out(&ctx).await,
        Commands::Status => commands::status(&ctx).await,
        Commands::Decks { command } => match command {
            DeckCommands::List => commands::decks_list(&ctx).await,
            DeckCommands::Show { id } => commands::decks_show(&ctx, &id).await,
            DeckCommands::Answer { id, choices } => {
                commands::decks_answer(&ctx, &id, &choices).await
            }
        },
        Commands::Collections { command } => match command {
            CollectionCommands::List => commands::collections_list(&ctx).await,
            CollectionCommands::Create {
                name,
                description,
                category,
                privacy,
            } => commands::collections_create(&ctx, &name, &description, category, privacy).await,
        },
        Commands::Flashcards { command } => match command {
            FlashcardCommands::List { collection } => {
                commands::flashcards_list(&ctx, &collection).await
            }
            FlashcardCommands::Create {
                collection,
                front,
                correct,
                wrong,
            } => commands::flashcards_create(&ctx, &collection, &front, &correct, wrong).await,
            FlashcardCommands::Build { collection } => {
                commands::flashcards_build(&ctx, &collection).await
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_show(&ctx),
            ConfigCommands::SetApiUrl { url } => commands::config_set_api_url(&ctx, &url),
        },
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.format;

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e), &format);
        std::process::exit(1);
    }
}
