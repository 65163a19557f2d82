//! AI API Contract
//!
//! Serves and checks the request/response contract of the multi-provider
//! text API.

use ai_api_contract::{
    api::operations::operation_descriptor,
    catalog::{openapi, Catalog, OperationKind},
    config::{Environment, LogFormat, Settings},
    logging::init_tracing,
    server::App,
    validation::{check_request, check_response},
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// AI API Contract
///
/// Browse the operation catalogue, check payloads against it, export it as
/// OpenAPI, or serve it over HTTP.
#[derive(Parser, Debug)]
#[command(name = "ai-api-contract")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (overrides LOG_FORMAT env var)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Report body fields the catalogue does not declare
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the catalogue service (default)
    Serve {
        /// Port to listen on (overrides PORT env var)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Environment: dev, staging, prod (overrides ENVIRONMENT env var)
        #[arg(short, long)]
        env: Option<Environment>,
    },

    /// List operations with their providers
    List,

    /// Print an operation descriptor
    Show {
        /// Operation, e.g. `text/chat` or `chat`
        operation: OperationKind,

        /// Print an example request body instead
        #[arg(long)]
        example: bool,
    },

    /// Check a JSON file against an operation
    Validate {
        operation: OperationKind,

        file: PathBuf,

        /// Treat the file as a 200 response body
        #[arg(long)]
        response: bool,
    },

    /// Print or write the OpenAPI document
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_format) = args.log_format {
        settings.log_format = log_format;
    }
    if args.strict {
        settings.reject_unknown_fields = true;
    }

    let command = args.command.unwrap_or(Command::Serve {
        port: None,
        host: None,
        env: None,
    });

    match command {
        Command::Serve { port, host, env } => {
            if let Some(port) = port {
                settings.port = port;
            }
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(env) = env {
                settings.environment = env;
            }
            settings.validate()?;

            init_tracing(&settings.log_level, settings.log_format)?;
            serve(settings).await?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            init_tracing(&settings.log_level, settings.log_format)?;
            run_command(command, &settings)
        }
    }
}

async fn serve(settings: Settings) -> Result<()> {
    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        host = %settings.host,
        port = %settings.port,
        reject_unknown_fields = settings.reject_unknown_fields,
        "Starting application"
    );

    App::new(settings).run_with_graceful_shutdown().await?;

    tracing::info!("Application shutdown complete");
    Ok(())
}

fn run_command(command: Command, settings: &Settings) -> Result<ExitCode> {
    let catalog = Catalog::builtin();

    match command {
        Command::List => {
            for op in catalog.iter() {
                println!("{:<40} {:<32} {}", op.path(), op.name, op.providers.join(", "));
            }
        }
        Command::Show { operation, example } => {
            let op = catalog.get(operation);
            let document = if example {
                op.example_request()
            } else {
                operation_descriptor(op)
            };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::Validate {
            operation,
            file,
            response,
        } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let body: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;

            let options = settings.validation_options();
            let result = if response {
                check_response(operation, &body, options)
            } else {
                check_request(operation, &body, options)
            };

            if let Err(err) = result {
                println!("{}", serde_json::to_string_pretty(&err.body())?);
                return Ok(ExitCode::FAILURE);
            }
            println!("OK");
        }
        Command::Export { out } => {
            let document = openapi::openapi_document(catalog, &settings.app_version);
            match out {
                Some(path) => {
                    openapi::write_document(&path, &document)?;
                    tracing::info!(path = %path.display(), "OpenAPI document written");
                }
                None => println!("{}", serde_json::to_string_pretty(&document)?),
            }
        }
        Command::Serve { .. } => anyhow::bail!("serve is not a one-shot command"),
    }

    Ok(ExitCode::SUCCESS)
}
