//! `filofax` command-line shell.
//!
//! # Responsibility
//! - Drive one contact session against a SQLite file.
//! - Map core errors to exit codes and user-facing messages.

use clap::{Parser, Subcommand};
use filofax_core::{
    core_version, default_log_level, init_logging, ContactStore, KvBackend, LoadError, Session,
    SqliteKvBackend, UiAction, STORAGE_KEY,
};
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_DB_FILE_NAME: &str = "filofax.sqlite3";
const EXIT_LOAD_FAILED: i32 = 1;
const EXIT_PERSIST_FAILED: i32 = 2;
const EXIT_USAGE: i32 = 64;

/// Filofax: a tiny contact directory.
#[derive(Parser)]
#[command(name = "filofax", version, about, long_about = None)]
struct Cli {
    /// SQLite file holding the contact state
    #[arg(long, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the page markup for the current state
    Render,
    /// Print one line per contact: id, kind, state, name
    List,
    /// Flip the expand/collapse state of one card
    Toggle {
        /// Card id, e.g. `contact-0`
        id: String,
    },
    /// Print the stored contact JSON
    Show,
    /// Delete stored state so the next run re-seeds
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, absolute(log_dir)) {
            eprintln!("filofax: logging disabled: {err}");
        }
    }

    process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Version => {
            println!("filofax {} (filofax_core {})", env!("CARGO_PKG_VERSION"), core_version());
            0
        }
        Commands::Reset { yes } => reset(&cli.db, yes),
        Commands::Show => show(&cli.db),
        Commands::Render => with_session(&cli.db, |session| {
            print!("{}", session.render());
            0
        }),
        Commands::List => with_session(&cli.db, |session| {
            for contact in session.contacts() {
                let state = if contact.is_expanded {
                    "expanded"
                } else {
                    "collapsed"
                };
                println!(
                    "{}\t{}\t{}\t{}",
                    contact.id,
                    contact.kind().as_str(),
                    state,
                    contact.name
                );
            }
            0
        }),
        Commands::Toggle { id } => with_session(&cli.db, |session| {
            if session.contact(&id).is_none() {
                eprintln!("filofax: no contact with id `{id}`; nothing changed");
            }
            let result = session.dispatch(&UiAction::Toggle { id: id.clone() });
            if let Some(contact) = session.contact(&id) {
                let state = if contact.is_expanded {
                    "expanded"
                } else {
                    "collapsed"
                };
                println!("{id}\t{state}");
            }
            match result {
                Ok(()) => 0,
                Err(err) => {
                    eprintln!("filofax: change kept for this run but not saved: {err}");
                    EXIT_PERSIST_FAILED
                }
            }
        }),
    }
}

fn with_session(db: &Path, action: impl FnOnce(&mut Session<SqliteKvBackend>) -> i32) -> i32 {
    let backend = match SqliteKvBackend::open(db) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("filofax: cannot open `{}`: {err}", db.display());
            return EXIT_PERSIST_FAILED;
        }
    };

    match Session::open(ContactStore::new(backend)) {
        Ok(mut session) => action(&mut session),
        Err(err @ LoadError::StorageCorrupt(_)) => {
            eprintln!("filofax: {err}");
            eprintln!("filofax: stored data was left untouched; run `filofax reset --yes` to re-seed");
            EXIT_LOAD_FAILED
        }
        Err(err @ LoadError::MalformedSeed(_)) => {
            eprintln!("filofax: bundled contacts are invalid: {err}");
            EXIT_LOAD_FAILED
        }
        Err(err @ LoadError::Persistence(_)) => {
            eprintln!("filofax: {err}");
            EXIT_PERSIST_FAILED
        }
    }
}

fn show(db: &Path) -> i32 {
    match SqliteKvBackend::open(db).and_then(|backend| backend.get(STORAGE_KEY)) {
        Ok(Some(blob)) => {
            println!("{blob}");
            0
        }
        Ok(None) => {
            eprintln!("filofax: nothing stored yet");
            0
        }
        Err(err) => {
            eprintln!("filofax: {err}");
            EXIT_PERSIST_FAILED
        }
    }
}

fn reset(db: &Path, confirmed: bool) -> i32 {
    if !confirmed {
        eprintln!("filofax: reset deletes all stored contact state; pass --yes to confirm");
        return EXIT_USAGE;
    }

    match SqliteKvBackend::open(db).and_then(|mut backend| backend.remove(STORAGE_KEY)) {
        Ok(removed) => {
            log::info!("event=contacts_reset module=cli status=ok removed={removed}");
            println!("{}", if removed { "reset" } else { "nothing to reset" });
            0
        }
        Err(err) => {
            eprintln!("filofax: {err}");
            EXIT_PERSIST_FAILED
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
