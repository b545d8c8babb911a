//! cdnjs CLI binary.
//!
//! A command-line interface for browsing the cdnjs library catalog.

use cdnjs::cli::{Cli, Command, Preset};
use cdnjs::{CdnJsClient, LibraryMetadata, PrettyPrint, SearchRequestOptions};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let client = match cli.api_url.as_deref() {
        Some(url) => CdnJsClient::with_base_url(url),
        None => CdnJsClient::new(),
    };
    let client = match client {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check CDNJS_API_URL or --api-url");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&client, cli).await;
    client.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &CdnJsClient, cli: Cli) -> cdnjs::Result<()> {
    let human = cli.human_output;

    match cli.command {
        Command::List { fields } => {
            let options = fields.to_options(Preset::Minimal, human)?;
            let libraries = client.list_libraries(options.as_ref(), None).await?;
            output_list(&libraries, cli.json)?;
        }
        Command::Search { term, fields } => {
            let options = fields
                .to_options(Preset::Unspecified, human)?
                .unwrap_or_default();
            let search = SearchRequestOptions::with_options(term, options);
            let libraries = client.search_libraries(&search, None).await?;
            output_list(&libraries, cli.json)?;
        }
        Command::Get { name, fields } => {
            let options = fields.to_options(Preset::Minimal, human)?;
            let library = client.get_library(&name, options.as_ref(), None).await?;
            output_single(&library, cli.json)?;
        }
        Command::Assets {
            name,
            version,
            fields,
        } => {
            let options = fields.to_options(Preset::Unspecified, human)?;
            let assets = client
                .get_library_assets(&name, &version, options.as_ref(), None)
                .await?;
            output_single(&assets, cli.json)?;
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> cdnjs::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list(libraries: &[LibraryMetadata], json: bool) -> cdnjs::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(libraries)?);
    } else {
        let rows: Vec<LibraryRow> = libraries.iter().map(LibraryRow::from).collect();
        println!("{}", Table::new(rows));
        println!("\n{} libraries", libraries.len());
    }
    Ok(())
}

// Table row type for non-JSON output

#[derive(Tabled)]
struct LibraryRow {
    name: String,
    version: String,
    latest: String,
}

impl From<&LibraryMetadata> for LibraryRow {
    fn from(l: &LibraryMetadata) -> Self {
        Self {
            name: l.name().unwrap_or_default().to_string(),
            version: l.version().unwrap_or_default().to_string(),
            latest: l.latest_main_file_url.clone().unwrap_or_default(),
        }
    }
}
