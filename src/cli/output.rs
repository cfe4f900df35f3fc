//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats. JSON uses the same field names as
//! the stored records (`categoryName`, `idCategory`).

use crate::core::{Category, Word};
use crate::error::Error;
use crate::storage::StorageStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StorageStats) -> String {
    let mut output = String::new();
    output.push_str("Wordbank Status\n");
    output.push_str("===============\n\n");
    let _ = writeln!(output, "  Categories:    {}", stats.category_count);
    let _ = writeln!(output, "  Words:         {}", stats.word_count);
    if stats.orphaned_word_count > 0 {
        let _ = writeln!(
            output,
            "  Orphaned:      {} (run `wordbank check`)",
            stats.orphaned_word_count
        );
    }
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:       {size} bytes");
    }
    output
}

/// Formats a category list.
#[must_use]
pub fn format_category_list(categories: &[Category], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_category_list_text(categories),
        OutputFormat::Json => format_json(&categories),
    }
}

fn format_category_list_text(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Categories:\n");
    let _ = writeln!(output, "{:<36}  Name", "ID");
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for category in categories {
        let _ = writeln!(output, "{:<36}  {}", category.id, category.category_name);
    }

    output
}

/// Formats a single category.
#[must_use]
pub fn format_category(category: &Category, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Category: {}", category.category_name);
            let _ = writeln!(output, "  ID:           {}", category.id);
            output
        }
        OutputFormat::Json => format_json(category),
    }
}

/// Formats the words of a category.
#[must_use]
pub fn format_word_list(words: &[Word], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_word_list_text(words),
        OutputFormat::Json => format_json(&words),
    }
}

fn format_word_list_text(words: &[Word]) -> String {
    if words.is_empty() {
        return "No words found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Words:\n");
    let _ = writeln!(output, "{:<36}  {:<20} Translation", "ID", "Word");
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for word in words {
        let _ = writeln!(
            output,
            "{:<36}  {:<20} {}",
            word.id,
            truncate(&word.word, 20),
            word.translation
        );
    }

    output
}

/// Formats a single word.
#[must_use]
pub fn format_word(word: &Word, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Word: {}", word.word);
            let _ = writeln!(output, "  ID:           {}", word.id);
            let _ = writeln!(output, "  Category:     {}", word.id_category);
            let _ = writeln!(output, "  Translation:  {}", word.translation);
            let _ = writeln!(output, "  Image:        {}", word.image);
            let _ = writeln!(output, "  Sound:        {}", word.sound);
            output
        }
        OutputFormat::Json => format_json(word),
    }
}

/// Formats the result of an integrity check.
#[must_use]
pub fn format_orphans(orphans: &[Word], pruned: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if orphans.is_empty() {
                return "No orphaned words.\n".to_string();
            }
            let mut output = String::new();
            let _ = writeln!(
                output,
                "{} orphaned word(s){}:",
                orphans.len(),
                if pruned { " deleted" } else { "" }
            );
            for word in orphans {
                let _ = writeln!(
                    output,
                    "  {}  {:<20} (missing category {})",
                    word.id,
                    truncate(&word.word, 20),
                    word.id_category
                );
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct CheckOutput<'a> {
                orphans: &'a [Word],
                pruned: bool,
            }
            format_json(&CheckOutput { orphans, pruned })
        }
    }
}

/// Formats a short confirmation, as a `{"message": ...}` object in JSON.
#[must_use]
pub fn format_message(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{message}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({ "message": message })),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
    }
}

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).map_or_else(|_| "{}".to_string(), |s| s + "\n")
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut out: String = s.chars().take(max_len - 3).collect();
        out.push_str("...");
        out
    }
}
