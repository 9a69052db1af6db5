use clap::{Parser, Subcommand};
use importer::{
    CanonicalFile, ImportContext, OpportunitySource, SampleCatalog,
    canonical::transformer::CanonicalTransformer, load_validated,
};
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "opportunity-import")]
#[command(about = "Student opportunity catalog importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one canonical JSON batch.
    Canonical {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Import every canonical JSON batch found in a directory tree.
    BulkImport {
        #[arg(long, default_value = "./imports")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Seed the built-in sample catalog.
    Seed,
    /// Print the domain the classifier assigns to a piece of text.
    Classify { text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "opportunity_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Canonical {
            file,
            validate_only,
        } => {
            let context = connect_unless(validate_only, cli.database_url.as_deref()).await?;
            import_source(&CanonicalFile::new(file), context.as_ref()).await?;
        }
        Commands::BulkImport {
            directory,
            validate_only,
        } => {
            handle_bulk_import(&directory, validate_only, cli.database_url.as_deref()).await?;
        }
        Commands::Seed => {
            let context = connect_unless(false, cli.database_url.as_deref()).await?;
            import_source(&SampleCatalog::default(), context.as_ref()).await?;
        }
        Commands::Classify { text } => {
            let classifier = storage::services::DomainClassifier::default();
            println!("{}", classifier.classify(&text));
        }
    }

    Ok(())
}

async fn connect_unless(
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<Option<ImportContext>, Box<dyn std::error::Error>> {
    if validate_only {
        return Ok(None);
    }

    let database_url = database_url.ok_or("DATABASE_URL must be set to import")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Database::from_pool(pool.clone()).run_migrations().await?;

    Ok(Some(ImportContext::new(pool)))
}

async fn import_source(
    source: &dyn OpportunitySource,
    context: Option<&ImportContext>,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch = load_validated(source).await?;
    tracing::info!("✓ Validation successful!");

    let Some(context) = context else {
        return Ok(());
    };

    let stats = CanonicalTransformer::new(context)
        .import_to_database(batch)
        .await?;

    tracing::info!(
        "✓ Import completed: {} created, {} already present",
        stats.created,
        stats.existing
    );

    Ok(())
}

async fn handle_bulk_import(
    directory: &Path,
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Scanning directory for canonical JSON files: {}", directory.display());

    let mut json_files = Vec::new();
    let mut entries = tokio::fs::read_dir(directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            let mut sub_entries = tokio::fs::read_dir(&path).await?;
            while let Some(sub_entry) = sub_entries.next_entry().await? {
                let sub_path = sub_entry.path();
                if sub_path.extension().is_some_and(|ext| ext == "json") {
                    json_files.push(sub_path);
                }
            }
        } else if path.extension().is_some_and(|ext| ext == "json") {
            json_files.push(path);
        }
    }

    if json_files.is_empty() {
        tracing::warn!("No JSON files found in {}", directory.display());
        return Ok(());
    }

    json_files.sort();
    tracing::info!("Found {} canonical JSON file(s)", json_files.len());

    let context = connect_unless(validate_only, database_url).await?;

    let mut success_count = 0;
    let mut error_count = 0;

    for (idx, file_path) in json_files.iter().enumerate() {
        let source = CanonicalFile::new(file_path);
        tracing::info!(
            "[{}/{}] Processing: {}",
            idx + 1,
            json_files.len(),
            source.path().display()
        );

        match import_source(&source, context.as_ref()).await {
            Ok(()) => {
                success_count += 1;
                tracing::info!("  ✓ Success");
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    tracing::info!("Summary: {} succeeded, {} failed", success_count, error_count);

    if error_count > 0 {
        return Err(format!("{} file(s) failed to import", error_count).into());
    }

    Ok(())
}
