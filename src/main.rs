use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use foodgram::Config;

mod cli {
    pub mod catalog;
    pub mod user;
}

/// foodgram - recipe sharing backend
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipes, favorites, shopping lists and subscriptions over a JSON API", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load `name,measurement_unit` rows from a CSV file
    ImportIngredients {
        path: PathBuf,
    },
    /// Create a recipe tag
    CreateTag {
        name: String,
        slug: String,
    },
    /// Grant (or revoke) staff access
    SetStaff {
        email: String,

        #[arg(long)]
        revoke: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => foodgram::server::serve(config, host, port).await,
        Commands::Migrate => foodgram::migrate::migrate(&config).await,
        Commands::Reset => foodgram::migrate::reset(&config).await,
        Commands::ImportIngredients { path } => cli::catalog::import_ingredients(config, path).await,
        Commands::CreateTag { name, slug } => cli::catalog::create_tag(config, name, slug).await,
        Commands::SetStaff { email, revoke } => cli::user::set_staff(config, email, revoke).await,
    }
}
