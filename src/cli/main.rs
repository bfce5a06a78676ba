//! CLI binary entry point for marshal-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::CliContext;
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::auth::{
    handle_login, handle_login_url, handle_logout, handle_refresh, handle_whoami,
};
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::keys::{
    handle_keys_create, handle_keys_list, handle_keys_revoke, handle_usage,
};
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::operations::handle_operations;
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::validate::{ValidateArgs, handle_fix, handle_validate};
#[cfg(feature = "cli")]
use marshal_sdk::cli::commands::waitlist::handle_waitlist;
#[cfg(feature = "cli")]
use marshal_sdk::cli::error::CliError;
#[cfg(feature = "cli")]
use marshal_sdk::models::WaitlistEntry;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "marshal-cli")]
#[command(about = "Validate and repair JSON against OpenAPI operations with Marshal")]
#[command(version)]
struct Cli {
    /// Directory containing .marshal.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,
    /// Backend base URL (overrides config file and MARSHAL_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List the operations declared in an OpenAPI schema (JSON or YAML)
    Operations {
        /// Schema file, or '-' for stdin
        input: String,
        /// Print operations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a JSON document against an operation of an OpenAPI schema
    Validate {
        /// OpenAPI schema file, or '-' for stdin
        #[arg(short, long)]
        schema: String,
        /// Operation ID (defaults to the first operation in the schema)
        #[arg(short, long)]
        operation: Option<String>,
        /// JSON document file, or '-' for stdin
        input: String,
    },
    /// Repair malformed JSON
    Fix {
        /// JSON file, or '-' for stdin
        input: String,
    },
    /// Print the Google sign-in URL
    LoginUrl,
    /// Complete sign-in with the code and state from the redirect
    Login {
        #[arg(long)]
        code: String,
        #[arg(long)]
        state: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Refresh the access token
    Refresh,
    /// Show the signed-in user
    Whoami,
    /// Manage API keys
    Keys {
        #[command(subcommand)]
        command: KeysCommands,
    },
    /// Show monthly usage
    Usage,
    /// Join the Marshal waitlist
    Waitlist {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        use_case: Option<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum KeysCommands {
    /// List API keys
    List,
    /// Create an API key
    Create {
        /// Human-readable key name
        name: String,
    },
    /// Revoke an API key
    Revoke {
        /// Key ID as shown by `keys list`
        id: String,
    },
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config_dir,
        backend_url,
        command,
    } = cli;
    // Only commands that talk to the backend read config or the session
    let context = || CliContext::load(&config_dir, backend_url.clone());

    match command {
        Commands::Operations { input, json } => handle_operations(&input, json),
        Commands::Validate {
            schema,
            operation,
            input,
        } => {
            let args = ValidateArgs {
                schema,
                input,
                operation,
            };
            handle_validate(&context()?, &args)
        }
        Commands::Fix { input } => handle_fix(&context()?, &input),
        Commands::LoginUrl => handle_login_url(&context()?),
        Commands::Login { code, state } => handle_login(&context()?, &code, &state),
        Commands::Logout => handle_logout(&context()?),
        Commands::Refresh => handle_refresh(&context()?),
        Commands::Whoami => handle_whoami(&context()?),
        Commands::Keys { command } => {
            let ctx = context()?;
            match command {
                KeysCommands::List => handle_keys_list(&ctx),
                KeysCommands::Create { name } => handle_keys_create(&ctx, &name),
                KeysCommands::Revoke { id } => handle_keys_revoke(&ctx, &id),
            }
        }
        Commands::Usage => handle_usage(&context()?),
        Commands::Waitlist {
            name,
            email,
            company,
            role,
            use_case,
        } => {
            let entry = WaitlistEntry {
                name,
                email,
                company,
                role,
                use_case,
            };
            handle_waitlist(&context()?, &entry)
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
