mod cli;
mod config;
mod error;
mod logging;
mod store;
mod tui;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockroom_core::{ItemForm, Session, SortKey};
use tracing::info;

use crate::config::{load_config, resolve_store_config};
use crate::store::{data_dir, AnyStore, StoreType};

#[derive(Parser)]
#[command(name = "stock")]
#[command(about = "Local inventory manager", long_about = None)]
struct Cli {
    /// Store type: fjall or dir
    #[arg(long, global = true)]
    store_type: Option<StoreType>,

    /// Path to the inventory store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse and edit the inventory interactively (default)
    Ui,

    /// Print the inventory as a table
    List {
        /// Only show items whose name or details contain this text
        #[arg(long, conflicts_with = "sort")]
        search: Option<String>,

        /// Order by quantity, price or date
        #[arg(long)]
        sort: Option<SortKey>,
    },

    /// Add an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long = "type", default_value = "")]
        kind: String,
        /// Image file to embed
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete an item by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&data_dir())?;

    let config = load_config();
    let (store_type, store_path) = resolve_store_config(cli.store_type, cli.store, &config);
    info!(%store_type, path = %store_path.display(), "opening store");

    let store = AnyStore::open(store_type, &store_path)?;
    let mut session = Session::open(store).with_notice_ttl(config.ui.notice_ttl());

    let mut stdout = io::stdout();
    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => tui::run(session).await?,
        Command::List { search, sort } => {
            cli::list(&mut session, search.as_deref(), sort, &mut stdout)?;
        }
        Command::Add {
            name,
            details,
            quantity,
            price,
            date,
            kind,
            image,
        } => {
            let form = ItemForm {
                name,
                details,
                quantity,
                price,
                date,
                kind,
                image: image.map(|p| p.display().to_string()).unwrap_or_default(),
            };
            cli::add(&mut session, form, &mut stdout).await?;
        }
        Command::Delete { id, yes } => {
            cli::delete(&mut session, &id, yes, &mut io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}
