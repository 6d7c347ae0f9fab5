//! Developer CLI over the photo note store.
//!
//! # Responsibility
//! - Inspect and edit the same SQLite-backed store the mobile app uses.
//! - Keep output plain and line-oriented for quick local checks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use photonote_core::db::open_db;
use photonote_core::{
    init_logging, CoreConfig, Note, NoteDraft, NoteService, NoteStore, SqliteKeyValueStore,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "photonote", version, about = "Inspect and edit the photo note store")]
struct Cli {
    /// Database file; defaults to PHOTONOTE_DB_PATH or the temp directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for log files; logging stays off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List notes, newest first.
    List,
    /// Show one note.
    Show { id: String },
    /// Add a note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a note; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a note.
    Delete { id: String },
    /// Print the stored blob as-is.
    Raw,
    /// Remove every note.
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CoreConfig::from_env()?;
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir.clone() {
        config.log_dir = Some(log_dir);
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let stdout = std::io::stdout();
    run(&config, cli.command, &mut stdout.lock())
}

fn run(config: &CoreConfig, command: Command, out: &mut impl Write) -> Result<()> {
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let service = NoteService::new(NoteStore::new(SqliteKeyValueStore::new(&conn)));

    match command {
        Command::List => {
            for note in service.list_notes() {
                writeln!(out, "{}\t{}\t{}", note.id, note.date, note.title)?;
            }
        }
        Command::Show { id } => {
            let Some(note) = service.get_note(&id) else {
                bail!("note not found: {id}");
            };
            write_note(out, &note)?;
        }
        Command::Add {
            title,
            image,
            description,
        } => {
            let note = service.create_note(NoteDraft::new(title, description, image))?;
            writeln!(out, "{}", note.id)?;
        }
        Command::Edit {
            id,
            title,
            image,
            description,
        } => {
            let Some(current) = service.get_note(&id) else {
                bail!("note not found: {id}");
            };
            let draft = NoteDraft::new(
                title.unwrap_or(current.title),
                description.unwrap_or(current.description),
                image.unwrap_or(current.image_uri),
            );
            let note = service.edit_note(&id, draft)?;
            write_note(out, &note)?;
        }
        Command::Delete { id } => {
            service.delete_note(&id)?;
            writeln!(out, "deleted {id}")?;
        }
        Command::Raw => match service.store().raw()? {
            Some(raw) => writeln!(out, "{raw}")?,
            None => writeln!(out, "(empty)")?,
        },
        Command::Reset => {
            service.store().clear()?;
            writeln!(out, "cleared")?;
        }
    }
    Ok(())
}

fn write_note(out: &mut impl Write, note: &Note) -> Result<()> {
    writeln!(out, "id:          {}", note.id)?;
    writeln!(out, "title:       {}", note.title)?;
    writeln!(out, "description: {}", note.description)?;
    writeln!(out, "image:       {}", note.image_uri)?;
    writeln!(out, "date:        {}", note.date)?;
    Ok(())
}
