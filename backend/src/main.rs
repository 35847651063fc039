//! Intake CLI - normalize candidate spreadsheets
//!
//! # Main Commands
//!
//! ```bash
//! intake serve                                      # Start HTTP server (port 3000)
//! intake ingest cv.xlsx --name Ada --surname Lovelace
//! intake list --database-url sqlite://candidates.db
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! intake inspect cv.xlsx        # Dump the rows the reader sees
//! intake template -o blank.xlsx # Write a spreadsheet with the expected columns
//! ```

use clap::{Parser, Subcommand};
use intake::api::DEFAULT_MAX_UPLOAD_BYTES;
use intake::server::{start_server, ServerConfig};
use intake::{
    normalize_candidate, read_workbook_file, select_row, validate_identity, write_workbook,
    CandidateStore, CellValue, Identity, SqliteStore,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Normalize candidate spreadsheets into validated records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,

        /// SQLite database URL (in-memory store when absent)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Maximum request body size in bytes
        #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,
    },

    /// Run the ingestion pipeline on a local spreadsheet
    Ingest {
        /// Input spreadsheet (.xlsx, .xls, .ods)
        input: PathBuf,

        /// Candidate first name
        #[arg(long)]
        name: String,

        /// Candidate surname
        #[arg(long)]
        surname: String,

        /// Persist into this SQLite database instead of printing the draft
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the rows and the selected candidate row of a spreadsheet
    Inspect {
        /// Input spreadsheet
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a spreadsheet with the expected column labels
    Template {
        /// Output file
        #[arg(short, long, default_value = "candidate-template.xlsx")]
        output: PathBuf,
    },

    /// List stored candidates
    List {
        /// SQLite database URL
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    // stderr keeps stdout clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            database_url,
            max_upload_bytes,
        } => {
            start_server(ServerConfig {
                port,
                database_url,
                max_upload_bytes,
            })
            .await
        }

        Commands::Ingest {
            input,
            name,
            surname,
            database_url,
            output,
        } => {
            cmd_ingest(
                &input,
                Identity::new(name, surname),
                database_url.as_deref(),
                output.as_deref(),
            )
            .await
        }

        Commands::Inspect { input, output } => cmd_inspect(&input, output.as_deref()),

        Commands::Template { output } => cmd_template(&output),

        Commands::List { database_url } => cmd_list(&database_url).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_ingest(
    input: &Path,
    identity: Identity,
    database_url: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    if let Err(errors) = validate_identity(&identity) {
        for err in &errors {
            eprintln!("   - {}", err);
        }
        return Err("invalid candidate identity".into());
    }

    let bytes = fs::read(input)?;
    let draft = normalize_candidate(identity, Some(bytes.as_slice()))?;

    let json = match database_url {
        Some(url) => {
            let store = SqliteStore::connect(url).await?;
            let record = store.save(draft).await?;
            eprintln!("💾 Saved candidate #{}", record.id);
            serde_json::to_string_pretty(&record)?
        }
        None => serde_json::to_string_pretty(&draft)?,
    };

    write_output(&json, output)?;
    eprintln!("✨ Done!");
    Ok(())
}

fn cmd_inspect(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reading: {}", input.display());

    let rows = read_workbook_file(input)?;
    eprintln!("   Sheet: {}", rows.sheet_name);
    eprintln!("   Columns: {}", rows.headers.join(", "));
    eprintln!("   Data rows: {}", rows.keyed.len());

    match select_row(&rows) {
        Ok(selected) => {
            eprintln!("   Selected row {} ({:?})", selected.index + 1, selected.mode);
            let missing = selected.attributes.missing();
            if !missing.is_empty() {
                eprintln!("   ⚠️  Missing: {}", missing.join(", "));
            }
        }
        Err(e) => eprintln!("   ⚠️  {}", e),
    }

    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;
    Ok(())
}

fn cmd_template(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = vec![
        vec![
            CellValue::text("Seniority"),
            CellValue::text("Years of experience"),
            CellValue::text("Availability"),
        ],
        vec![
            CellValue::text("junior"),
            CellValue::Number(0.0),
            CellValue::Bool(true),
        ],
    ];

    fs::write(output, write_workbook(&rows)?)?;
    eprintln!("💾 Template written to: {}", output.display());
    Ok(())
}

async fn cmd_list(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::connect(database_url).await?;
    let records = store.find_all().await?;

    if records.is_empty() {
        eprintln!("📋 No candidates stored yet.");
        return Ok(());
    }

    eprintln!("📋 Stored candidates ({}):\n", records.len());
    for r in records {
        println!("  #{} {} {}", r.id, r.name, r.surname);
        println!(
            "     {} · {} years · {}",
            r.seniority,
            r.years,
            if r.availability { "available" } else { "not available" }
        );
        println!("     Created: {}", r.created_at);
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
