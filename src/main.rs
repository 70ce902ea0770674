//! CLI: generate a Postman collection for an Event Portal application's
//! consumed events and write it to a file.

use std::env;
use std::process;

use clap::Parser;
use ep2postman::{
    CollectionGenError, Credentials, EventPortalClient, GenerateOptions, GenerationReport,
    HostSpec, SchemaSynthesizer, generate_collection, write_collection_to_file,
};

const TOKEN_ENV_VAR: &str = "SOLACE_CLOUD_TOKEN";

#[derive(Parser)]
#[command(
    name = "ep2postman",
    about = "Create a Postman collection of POST requests to a broker's REST \
             messaging port from an Event Portal application's consumed events"
)]
struct Cli {
    /// Name of the Event Portal application
    #[arg(short = 'a', long)]
    application_name: String,

    /// Version of the Event Portal application
    #[arg(short = 'n', long)]
    application_version: String,

    /// Broker endpoint as <protocol>://<host>:<port>
    #[arg(long, default_value = "http://localhost:9000")]
    host: String,

    /// Broker credentials as <username>:<password>
    #[arg(short = 'u', long, default_value = "default:default")]
    user: String,

    /// Output file path
    #[arg(short = 'o', long, default_value = "application_Collections.json")]
    output: String,

    /// Event Portal API token (falls back to SOLACE_CLOUD_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Event Portal API base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn run(cli: &Cli) -> Result<(), CollectionGenError> {
    // Reject malformed config before any network call.
    let host: HostSpec = HostSpec::parse(&cli.host)?;
    let credentials: Credentials = Credentials::parse(&cli.user)?;

    let token: String = match cli.token.clone().or_else(|| env::var(TOKEN_ENV_VAR).ok()) {
        Some(token) => token,
        None => {
            return Err(CollectionGenError::ConfigError(format!(
                "no API token given; pass --token or set {TOKEN_ENV_VAR}"
            )));
        }
    };
    let catalog: EventPortalClient = match cli.base_url {
        Some(ref base_url) => EventPortalClient::with_base_url(token, base_url.clone()),
        None => EventPortalClient::new(token),
    };

    let options = GenerateOptions {
        application_name: cli.application_name.clone(),
        application_version: cli.application_version.clone(),
        host: Some(host),
        credentials: Some(credentials),
    };

    let report: GenerationReport = generate_collection(&catalog, &SchemaSynthesizer, &options)?;
    for skip in &report.skipped {
        eprintln!(
            "warning: skipped event version {}: {}",
            skip.event_version_id, skip.reason
        );
    }

    write_collection_to_file(&report.collection, &cli.output)?;
    eprintln!(
        "wrote {} request item(s) to {} ({} skipped)",
        report.collection.item.len(),
        cli.output,
        report.skipped.len()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        // An empty consumed-event list is a normal no-op, not a failure.
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}
