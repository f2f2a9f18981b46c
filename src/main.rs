// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use folio_sync::utils::logging;
use folio_sync::{
    Category, Config, ContentDocument, DocumentExporter, DocumentStore, FolioError, LoadOutcome,
    UploadTracker, Validator, content_hash, load_or_default, resolve_store,
};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const UPLOAD_WORKERS: usize = 4;

#[derive(Parser)]
#[command(name = "folio_sync")]
#[command(version = "0.1.0")]
#[command(about = "Persistence and sync core for a portfolio site CMS", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Shared admin passphrase for mutating commands.
    #[arg(long, global = true, env = "FOLIO_PASSPHRASE")]
    passphrase: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend resolution and reachability
    Status,

    /// Seed the backend with the built-in default document
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Fetch the document from the backend into a local JSON file
    Pull {
        #[arg(short, long, default_value = "portfolio.json")]
        output: PathBuf,
    },

    /// Replace the stored document with a local JSON file
    Push {
        #[arg(short, long, default_value = "portfolio.json")]
        input: PathBuf,
    },

    /// Upload images through the adapter and print their references
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show document counts and payload size
    Stats,

    /// Export the document plus a manifest
    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Overwrite the stored document with the built-in default
    Reset {
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        info!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
        Config::default_config()
    };

    let store = resolve_store(&config);

    match cli.command {
        Commands::Status => {
            cmd_status(store.as_deref()).await?;
        }
        Commands::Init { force } => {
            gate(&config, cli.passphrase.as_deref())?;
            cmd_init(store.as_deref(), force).await?;
        }
        Commands::Pull { output } => {
            cmd_pull(store.as_deref(), output).await?;
        }
        Commands::Push { input } => {
            gate(&config, cli.passphrase.as_deref())?;
            cmd_push(&config, store.as_deref(), input).await?;
        }
        Commands::Upload { files } => {
            gate(&config, cli.passphrase.as_deref())?;
            cmd_upload(store, files).await?;
        }
        Commands::Stats => {
            cmd_stats(&config, store.as_deref()).await?;
        }
        Commands::Export { output, pretty } => {
            cmd_export(store.as_deref(), output, pretty).await?;
        }
        Commands::Reset { confirm } => {
            gate(&config, cli.passphrase.as_deref())?;
            cmd_reset(store.as_deref(), confirm).await?;
        }
    }

    Ok(())
}

fn gate(config: &Config, provided: Option<&str>) -> Result<()> {
    Validator::verify_passphrase(config.admin.passphrase.as_deref(), provided)
        .context("Admin gate rejected the command")?;
    Ok(())
}

fn require_store(store: Option<&dyn DocumentStore>) -> Result<&dyn DocumentStore> {
    store.ok_or_else(|| {
        anyhow::anyhow!("no backend configured; set backend credentials in the config or environment")
    })
}

async fn cmd_status(store: Option<&dyn DocumentStore>) -> Result<()> {
    let Some(store) = store else {
        println!("{}", logging::format_backend_banner(None, None));
        return Ok(());
    };

    let reachable = store.ping().await;
    match reachable {
        Ok(up) => {
            println!(
                "{}",
                logging::format_backend_banner(Some(store.backend_name()), Some(up))
            );
        }
        Err(e) => {
            println!(
                "{}",
                logging::format_backend_banner(Some(store.backend_name()), Some(false))
            );
            return Err(e).context("Backend probe failed");
        }
    }
    Ok(())
}

async fn cmd_init(store: Option<&dyn DocumentStore>, force: bool) -> Result<()> {
    let store = require_store(store)?;

    if !force {
        if let Some(_existing) = store
            .load_document()
            .await
            .context("Could not check for an existing document")?
        {
            println!(
                "{}",
                logging::format_warning("backend already holds a document, use --force to overwrite")
            );
            return Ok(());
        }
    }

    let doc = ContentDocument::initial();
    store
        .save_document(&doc)
        .await
        .context("Failed to seed default document")?;
    println!(
        "{}",
        logging::format_success(&format!("seeded default document into {}", store.backend_name()))
    );
    Ok(())
}

async fn cmd_pull(store: Option<&dyn DocumentStore>, output: PathBuf) -> Result<()> {
    let (doc, outcome) = load_or_default(store)
        .await
        .context("Failed to load document")?;

    match outcome {
        LoadOutcome::NotConfigured => {
            println!("{}", logging::format_backend_banner(None, None));
        }
        LoadOutcome::Seeded => {
            println!(
                "{}",
                logging::format_warning("backend held no usable document, wrote defaults back")
            );
        }
        LoadOutcome::Remote => {}
    }

    let serialized = serde_json::to_string_pretty(&doc)?;
    tokio::fs::write(&output, serialized)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        logging::format_success(&format!(
            "pulled document ({} projects, {} staff) to {}",
            doc.projects.len(),
            doc.staff.len(),
            output.display()
        ))
    );
    Ok(())
}

async fn cmd_push(
    config: &Config,
    store: Option<&dyn DocumentStore>,
    input: PathBuf,
) -> Result<()> {
    let store = require_store(store)?;

    let raw = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let doc: ContentDocument =
        serde_json::from_str(&raw).context("Input is not a valid content document")?;

    for issue in Validator::document_issues(&doc) {
        warn!("{}", issue);
    }

    // Capacity gate runs here as well as inside size-limited backends, so the
    // failure surfaces before any bytes leave the machine.
    let size = serde_json::to_vec(&doc)?.len();
    Validator::validate_payload_size(size, config.document.max_payload_bytes)
        .context("Document exceeds the configured payload ceiling")?;

    store
        .save_document(&doc)
        .await
        .context("Failed to save document")?;

    println!(
        "{}",
        logging::format_success(&format!(
            "pushed {} bytes to {} (hash {})",
            size,
            store.backend_name(),
            &content_hash(&doc)[..12]
        ))
    );
    Ok(())
}

async fn cmd_upload(store: Option<Box<dyn DocumentStore>>, files: Vec<PathBuf>) -> Result<()> {
    let Some(store) = store else {
        anyhow::bail!("no backend configured; set backend credentials in the config or environment");
    };
    let store: Arc<dyn DocumentStore> = Arc::from(store);

    let tracker = Arc::new(UploadTracker::new(files.len()));

    let results = stream::iter(files.into_iter().map(|path| {
        let store = Arc::clone(&store);
        let tracker = Arc::clone(&tracker);

        async move {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());

            let result: std::result::Result<String, FolioError> = async {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| FolioError::FileOperation {
                        path: path.clone(),
                        source: e,
                    })?;
                let reference = store.upload_image(&bytes, &filename).await?;
                tracker.record_success(&filename, bytes.len() as u64);
                Ok(reference)
            }
            .await;

            if result.is_err() {
                tracker.record_failure(&filename);
            }
            (filename, result)
        }
    }))
    .buffer_unordered(UPLOAD_WORKERS)
    .collect::<Vec<_>>()
    .await;

    let stats = tracker.finish();

    for (filename, result) in &results {
        match result {
            Ok(reference) => {
                let shown = if reference.len() > 80 {
                    format!("{}… ({} chars, embedded image)", &reference[..60], reference.len())
                } else {
                    reference.clone()
                };
                println!("{}  {}", logging::format_success(filename), shown);
            }
            Err(e) => {
                println!("{}  {}", logging::format_error(filename), e);
            }
        }
    }

    info!(
        "Uploaded {}/{} files in {:.2}s",
        stats.uploaded,
        stats.uploaded + stats.failed,
        stats.duration_secs
    );

    if stats.failed > 0 {
        anyhow::bail!("{} upload(s) failed", stats.failed);
    }
    Ok(())
}

async fn cmd_stats(config: &Config, store: Option<&dyn DocumentStore>) -> Result<()> {
    let (doc, outcome) = load_or_default(store)
        .await
        .context("Failed to load document")?;

    let size = serde_json::to_vec(&doc)?.len();

    println!("Document source: {:?}", outcome);
    println!("Projects: {}", doc.projects.len());
    for category in Category::ALL {
        println!("  {}: {}", category, doc.projects_in(category).len());
    }
    println!("Staff credits: {}", doc.staff.len());
    println!(
        "Payload: {} bytes (ceiling {})",
        size, config.document.max_payload_bytes
    );
    println!("Content hash: {}", content_hash(&doc));
    Ok(())
}

async fn cmd_export(
    store: Option<&dyn DocumentStore>,
    output: PathBuf,
    pretty: bool,
) -> Result<()> {
    let (doc, _) = load_or_default(store)
        .await
        .context("Failed to load document")?;

    let exporter = DocumentExporter::new(output)?;
    let manifest = exporter.export(&doc, pretty)?;
    println!(
        "{}",
        logging::format_success(&format!(
            "export complete: {} files generated",
            manifest.files.len()
        ))
    );
    Ok(())
}

async fn cmd_reset(store: Option<&dyn DocumentStore>, confirm: bool) -> Result<()> {
    let store = require_store(store)?;

    if !confirm {
        println!(
            "{}",
            logging::format_error("this replaces the stored document, use --confirm to proceed")
        );
        return Ok(());
    }

    warn!("Resetting {} to the built-in default document", store.backend_name());
    store
        .save_document(&ContentDocument::initial())
        .await
        .context("Failed to reset document")?;
    println!("{}", logging::format_success("backend reset to defaults"));
    Ok(())
}
