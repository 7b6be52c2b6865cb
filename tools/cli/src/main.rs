//! FileDock CLI - Command line front end for cloud file storage.
//!
//! Lists, uploads and deletes files on the selected storage provider
//! (Supabase or Firebase). Provider credentials come from the environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use filedock_app::{
    FilePreferenceStore, ListView, Preferences, SortKey, SortOrder, StorageController,
};
use filedock_common::{FileItem, ProviderName, UploadFile};
use filedock_storage::ProviderRegistry;

#[derive(Parser)]
#[command(name = "filedock")]
#[command(about = "FileDock - Manage files on Supabase or Firebase Storage")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Preferences file (default: platform config directory).
    #[arg(long)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files on the active provider, pinned files first.
    List {
        /// Only show keys containing this text (case-insensitive).
        #[arg(long, default_value = "")]
        search: String,

        /// Order by "date", "name", "size" or "type".
        #[arg(long, default_value = "date")]
        sort: SortKey,

        /// Ascending order (default: descending).
        #[arg(long)]
        asc: bool,
    },

    /// Upload one or more files concurrently.
    Upload {
        /// Files to upload.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Delete a file by key.
    Delete {
        /// Object key as shown by `list`.
        key: String,
    },

    /// Select the active provider: "supabase" or "firebase".
    Use {
        /// Provider name.
        provider: ProviderName,
    },

    /// Pin or unpin a key.
    Pin {
        /// Object key as shown by `list`.
        key: String,
    },

    /// Show the active provider and configuration state.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let preferences = open_preferences(cli.prefs);
    let controller = StorageController::new(ProviderRegistry::from_env(), preferences);

    match cli.command {
        Commands::List { search, sort, asc } => {
            let order = if asc {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            let view = ListView {
                search,
                sort,
                order,
            };
            cmd_list(&controller, &view).await
        }
        Commands::Upload { paths } => cmd_upload(&controller, &paths).await,
        Commands::Delete { key } => cmd_delete(&controller, &key).await,
        Commands::Use { provider } => cmd_use(&controller, provider).await,
        Commands::Pin { key } => cmd_pin(&controller, &key),
        Commands::Status => cmd_status(&controller).await,
    }
}

/// Open the preferences file, falling back to volatile preferences.
fn open_preferences(path: Option<PathBuf>) -> Preferences {
    match path.or_else(FilePreferenceStore::default_path) {
        Some(path) => Preferences::new(Arc::new(FilePreferenceStore::new(path))),
        None => Preferences::in_memory(),
    }
}

fn print_files(controller: &StorageController, files: &[FileItem], view: &ListView) {
    let preferences = controller.preferences();
    let shown = preferences.arrange(files, view);
    if shown.is_empty() {
        println!("No files.");
        return;
    }

    for file in shown {
        let marker = if preferences.is_pinned(&file.key) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<40} {:>12} bytes  {}",
            marker, file.key, file.size, file.last_modified
        );
        println!("    {}", file.url);
    }
}

/// List files on the active provider.
async fn cmd_list(controller: &StorageController, view: &ListView) -> Result<()> {
    let provider = controller.provider_name().await;
    let files = controller
        .list_files()
        .await
        .with_context(|| format!("Failed to list files on {}", provider))?;

    println!("Files on {}:", provider);
    print_files(controller, &files, view);
    Ok(())
}

/// Upload files.
async fn cmd_upload(controller: &StorageController, paths: &[PathBuf]) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;
        files.push(UploadFile::new(name, data));
    }

    info!("Uploading {} file(s) to {}", files.len(), controller.provider_name().await);
    let keys = controller
        .upload_files(files)
        .await
        .context("Upload failed")?;

    for key in keys {
        println!("Uploaded: {}", key);
    }
    Ok(())
}

/// Delete a file.
async fn cmd_delete(controller: &StorageController, key: &str) -> Result<()> {
    controller
        .delete_file(key)
        .await
        .with_context(|| format!("Failed to delete {}", key))?;

    println!("Deleted: {}", key);
    Ok(())
}

/// Select the active provider and show its files.
async fn cmd_use(controller: &StorageController, provider: ProviderName) -> Result<()> {
    controller.set_provider_name(provider).await;
    println!("Active provider: {}", provider);

    let snapshot = controller.snapshot().await;
    if let Some(error) = snapshot.error {
        anyhow::bail!("{} is selected but not usable: {}", provider, error);
    }
    print_files(controller, &snapshot.files, &ListView::default());
    Ok(())
}

/// Pin or unpin a key.
fn cmd_pin(controller: &StorageController, key: &str) -> Result<()> {
    if controller.preferences().toggle_pin(key) {
        println!("Pinned: {}", key);
    } else {
        println!("Unpinned: {}", key);
    }
    Ok(())
}

/// Show the active provider and whether each binding is usable.
async fn cmd_status(controller: &StorageController) -> Result<()> {
    let active = controller.provider_name().await;
    println!("Active provider: {}", active);

    let supabase = filedock_storage::SupabaseConfig::from_env().is_some();
    let firebase = filedock_storage::FirebaseConfig::from_env().is_some();
    for (name, configured) in [
        (ProviderName::Supabase, supabase),
        (ProviderName::Firebase, firebase),
    ] {
        let state = if configured { "configured" } else { "not configured" };
        println!("  {:<10} {}", name.as_str(), state);
    }

    println!("Pinned: {}", controller.preferences().pinned().len());
    Ok(())
}
