//! CLI command implementations.
//!
//! Each command opens the database, builds a [`Catalog`] over it, and
//! formats the result.

use crate::assets::{AssetStore, FsAssetStore};
use crate::catalog::{Catalog, WordInput};
use crate::cli::output::{
    OutputFormat, format_category, format_category_list, format_message, format_orphans,
    format_status, format_word, format_word_list,
};
use crate::cli::parser::{CategoryCommands, Cli, Commands, WordCommands, WordFields};
use crate::error::{CommandError, Result, StorageError};
use crate::storage::{CategoryRepository, SqliteCategories, SqliteStorage, SqliteWords};
use std::path::Path;

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();
    let assets = FsAssetStore::new(cli.get_asset_dir());

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, &assets, *force, format),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, &assets, *yes, format),
        Commands::Check { prune } => cmd_check(&db_path, *prune, format),
        Commands::Category(cmd) => {
            let storage = open_storage(&db_path)?;
            let catalog = Catalog::sqlite(&storage, assets);
            run_category(&catalog, cmd, format)
        }
        Commands::Word(cmd) => {
            let storage = open_storage(&db_path)?;
            let catalog = Catalog::sqlite(&storage, assets);
            run_word(&catalog, cmd, format)
        }
    }
}

/// Catalog type the CLI works with.
type SqliteCatalog<'s> = Catalog<SqliteCategories<'s>, SqliteWords<'s>, FsAssetStore>;

/// Opens storage and ensures it's initialized.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    if !db_path.exists() {
        return Err(StorageError::NotInitialized.into());
    }

    let storage = SqliteStorage::open(db_path)?;
    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

fn input_from(fields: &WordFields) -> WordInput {
    WordInput {
        word: fields.text.clone(),
        translation: fields.translation.clone(),
        image: fields.image.clone(),
        sound: fields.sound.clone(),
    }
}

// ==================== Command Implementations ====================

fn cmd_init(
    db_path: &Path,
    assets: &FsAssetStore,
    force: bool,
    format: OutputFormat,
) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let storage = SqliteStorage::open(db_path)?;
    storage.init()?;

    std::fs::create_dir_all(assets.root()).map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create asset directory: {e}"))
    })?;

    Ok(format_message(
        &format!("Initialized wordbank database at: {}", db_path.display()),
        format,
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let stats = storage.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_reset(
    db_path: &Path,
    assets: &FsAssetStore,
    yes: bool,
    format: OutputFormat,
) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let storage = open_storage(db_path)?;
    let categories = SqliteCategories::new(&storage).list()?;
    storage.reset()?;

    for category in &categories {
        assets.remove_category_dirs(&category.id)?;
    }

    Ok(format_message("Wordbank reset successfully.", format))
}

fn cmd_check(db_path: &Path, prune: bool, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let orphans = storage.orphaned_words()?;

    if prune && !orphans.is_empty() {
        storage.prune_orphaned_words()?;
    }

    Ok(format_orphans(&orphans, prune, format))
}

fn run_category(
    catalog: &SqliteCatalog<'_>,
    cmd: &CategoryCommands,
    format: OutputFormat,
) -> Result<String> {
    match cmd {
        CategoryCommands::List => Ok(format_category_list(&catalog.categories()?, format)),
        CategoryCommands::Show { id } => Ok(format_category(&catalog.category(id)?, format)),
        CategoryCommands::Add { name } => {
            Ok(format_category(&catalog.create_category(name)?, format))
        }
        CategoryCommands::Rename { id, name } => {
            Ok(format_category(&catalog.rename_category(id, name)?, format))
        }
        CategoryCommands::Delete { id, yes } => {
            if !*yes {
                return Err(CommandError::ExecutionFailed(
                    "Use --yes to confirm deletion. All words in the category are deleted too."
                        .to_string(),
                )
                .into());
            }
            let category = catalog.delete_category(id)?;
            Ok(format_message(
                &format!("Deleted category: {} ({})", category.category_name, category.id),
                format,
            ))
        }
    }
}

fn run_word(
    catalog: &SqliteCatalog<'_>,
    cmd: &WordCommands,
    format: OutputFormat,
) -> Result<String> {
    match cmd {
        WordCommands::List { category } => Ok(format_word_list(&catalog.words(category)?, format)),
        WordCommands::Show { category, word } => {
            Ok(format_word(&catalog.word(category, word)?, format))
        }
        WordCommands::Add { category, fields } => Ok(format_word(
            &catalog.add_word(category, &input_from(fields))?,
            format,
        )),
        WordCommands::Update {
            category,
            word,
            fields,
        } => Ok(format_word(
            &catalog.update_word(category, word, &input_from(fields))?,
            format,
        )),
        WordCommands::Delete { category, word } => {
            let deleted = catalog.delete_word(category, word)?;
            Ok(format_message(
                &format!("Deleted word: {} ({})", deleted.word, deleted.id),
                format,
            ))
        }
    }
}
