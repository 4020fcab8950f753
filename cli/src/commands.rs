//! Command execution.

use std::sync::Arc;

use anyhow::Context;
use filechooser_core::config::ChooserConfig;
use filechooser_core::files::browser::{FileBrowser, ListOptions, ViewBrowser};
use filechooser_core::files::FileEntry;
use filechooser_core::vfs::FileSystemManager;
use filechooser_core::view::sort::SortDirection;
use filechooser_core::view::FileSystemView;
use tracing::info;

use crate::args::{Cli, Command};

/// Execute a parsed command line, printing results to stdout.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ChooserConfig::load(path)?.expand(),
        None => ChooserConfig::default(),
    };

    let manager = Arc::new(FileSystemManager::with_defaults(&config));
    let view = Arc::new(FileSystemView::new(manager, &config));
    let browser = ViewBrowser::new(Arc::clone(&view));

    match cli.command {
        Command::Ls {
            uri,
            all,
            sort,
            desc,
            pattern,
        } => {
            let mut options = ListOptions {
                include_hidden: all || config.show_hidden,
                sort: config.sort,
                pattern,
            };
            if let Some(key) = sort {
                options.sort.key = key.into();
            }
            if desc {
                options.sort.direction = SortDirection::Descending;
            }
            let uri = target_or_default(&view, uri)?;
            let entries = browser.list_dir(&uri, &options).await?;
            print_entries(&entries, cli.json)
        }
        Command::Stat { uri } => {
            let entry = browser.stat(&uri).await?;
            print_entries(std::slice::from_ref(&entry), cli.json)
        }
        Command::Mkdir { uri } => {
            let entry = browser.create_folder(&uri).await?;
            info!(folder = %entry.display_name, "Folder created");
            print_entries(std::slice::from_ref(&entry), cli.json)
        }
        Command::Roots { uri } => {
            let uri = target_or_default(&view, uri)?;
            let entries = browser.roots(&uri).await?;
            print_entries(&entries, cli.json)
        }
    }
}

fn target_or_default(view: &FileSystemView, target: Option<String>) -> anyhow::Result<String> {
    match target {
        Some(uri) => Ok(uri),
        None => Ok(view
            .default_directory()
            .context("Failed to determine the default directory")?
            .uri()
            .to_string()),
    }
}

fn print_entries(entries: &[FileEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    for entry in entries {
        println!("{}", format_row(entry));
    }
    Ok(())
}

/// One table row: kind, size, modified time, display name.
fn format_row(entry: &FileEntry) -> String {
    let kind = if entry.is_directory { "d" } else { "-" };
    let modified = if entry.modified.is_empty() {
        "?"
    } else {
        entry.modified.as_str()
    };
    format!(
        "{kind} {:>10} {:<20} {}",
        entry.size_label, modified, entry.display_name
    )
}
