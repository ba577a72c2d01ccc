use risk_register::adapters::outbound::console::TableRenderer;
use risk_register::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use risk_register::adapters::outbound::storage::JsonFileRiskRepository;
use risk_register::application::use_cases::ManageRisksUseCase;
use risk_register::cli::{Args, Command};
use risk_register::config::{discover_config, load_config_from_path, ConfigFile};
use risk_register::ports::inbound::RiskManagementPort;
use risk_register::ports::outbound::OutputPresenter;
use risk_register::shared::{ExitCode, FieldViolation, Result, RiskError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "risks.json";
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args).await {
        let code = exit_code_for(&e);
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(code.as_i32());
    }
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<RiskError>()
        .map(RiskError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    init_tracing(config.log_filter.as_deref());

    let store_path = args
        .store
        .clone()
        .or_else(|| config.store.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
    debug!(store = %store_path.display(), "Opening risk store");

    // Create adapters (Dependency Injection)
    let repository = JsonFileRiskRepository::open(store_path).await?;
    let mut use_case = ManageRisksUseCase::new(repository);
    if let Some(bulk) = config.export_bulk_size {
        use_case = use_case.with_export_bulk_size(bulk);
    }
    if let Some(format) = config.export_format() {
        use_case = use_case.with_default_export_format(format);
    }

    execute(&use_case, args.command).await
}

async fn execute(register: &dyn RiskManagementPort, command: Command) -> Result<()> {
    let stdout = StdoutPresenter::new();
    let renderer = TableRenderer::for_stdout();

    match command {
        Command::Create { fields } => {
            let input = fields.into_input().map_err(|e| bad_input("body", e))?;
            let risk = register.create_risk(input).await?;
            stdout.present(&to_json(&risk)?)?;
        }
        Command::Show { id } => {
            let risk = register.get_risk(&id).await?;
            stdout.present(&to_json(&risk)?)?;
        }
        Command::Update { id, fields } => {
            let input = fields.into_input().map_err(|e| bad_input("body", e))?;
            let risk = register.update_risk(&id, input).await?;
            stdout.present(&to_json(&risk)?)?;
        }
        Command::Delete { id } => {
            register.delete_risk(&id).await?;
            eprintln!("✅ Deleted risk {}", id);
        }
        Command::List {
            query,
            page,
            page_size,
            json,
        } => {
            let mut request = query.into_request().map_err(|e| bad_input("query", e))?;
            request.page = page;
            request.page_size = page_size;

            let page = register.list_risks(request).await?;
            let output = if json {
                to_json(&page)?
            } else {
                renderer.render_page(&page)
            };
            stdout.present(&output)?;
        }
        Command::Export {
            query,
            format,
            output,
        } => {
            let request = query
                .into_export_request(format)
                .map_err(|e| bad_input("query", e))?;
            let document = register.export_risks(request).await?;

            let presenter: Box<dyn OutputPresenter> = match output {
                Some(path) if path.is_dir() => {
                    Box::new(FileSystemWriter::in_directory(&path, &document.filename))
                }
                Some(path) => Box::new(FileSystemWriter::new(path)),
                None => Box::new(StdoutPresenter::new()),
            };
            presenter.present(&document.content)?;
        }
        Command::Matrix { query, json } => {
            let request = query.into_request().map_err(|e| bad_input("query", e))?;
            let matrix = register.risk_matrix(request).await?;
            let output = if json {
                to_json(&matrix)?
            } else {
                renderer.render_matrix(&matrix)
            };
            stdout.present(&output)?;
        }
        Command::Summary { query, json } => {
            let request = query.into_request().map_err(|e| bad_input("query", e))?;
            let summary = register.risk_summary(request).await?;
            let output = if json {
                to_json(&summary)?
            } else {
                renderer.render_summary(&summary)
            };
            stdout.present(&output)?;
        }
    }

    Ok(())
}

/// Malformed raw input (JSON body, query string) is a validation failure
fn bad_input(field: &str, err: anyhow::Error) -> RiskError {
    RiskError::validation(vec![FieldViolation::new(field, err.to_string())])
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

/// Filter precedence: `RUST_LOG`, then the config's `log_filter`, then `warn`
fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
