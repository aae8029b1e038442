//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::config_validation::{
    source_kind, validate_config, SourceKind, DEFAULT_LOG_LEVEL,
};
use crate::domain::error::ScannerError;
use crate::domain::scan::scan;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const PROMPT: &str = "Enter stock ticker (or 'exit' to quit): ";

/// Shared handle to whichever loader the config selects.
pub type SharedDataPort = Arc<dyn DataPort + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "tickerscan", about = "Single-ticker technical scanner")]
pub struct Cli {
    /// INI config file; every key is optional
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Read `{TICKER}.csv` files from this directory instead of Yahoo
    #[arg(long, global = true)]
    pub csv_dir: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan one ticker and print the report
    Scan { ticker: String },
    /// Prompt for tickers until `exit`
    Repl,
    /// Start the web server
    Serve,
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match cli.config.as_deref() {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => FileConfigAdapter::empty(),
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    init_logging(&config, cli.verbose);

    let data_port = match build_data_port(&config, cli.csv_dir.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match cli.command {
        Command::Scan { ticker } => run_scan(&*data_port, &ticker),
        Command::Repl => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match run_repl(&*data_port, stdin.lock(), stdout.lock(), || {
                Local::now().date_naive()
            }) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    let err = ScannerError::from(e);
                    eprintln!("error: {err}");
                    (&err).into()
                }
            }
        }
        Command::Serve => run_serve(&config, data_port),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ScannerError> {
    FileConfigAdapter::from_file(path).map_err(|e| ScannerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// `RUST_LOG` wins, then `--verbose`, then `[log] level`.
fn init_logging(config: &dyn ConfigPort, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            let level = config
                .get_string("log", "level")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
            EnvFilter::new(level.trim().to_lowercase())
        }
    });

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.get_bool("log", "ansi", true))
        .try_init();
}

/// Selects the loader: `--csv-dir` forces CSV, otherwise `[data] source`.
pub fn build_data_port(
    config: &dyn ConfigPort,
    csv_override: Option<&Path>,
) -> Result<SharedDataPort, ScannerError> {
    if let Some(dir) = csv_override {
        debug!(dir = %dir.display(), "using csv loader from command line");
        return Ok(Arc::new(CsvAdapter::new(dir.to_path_buf())));
    }

    match source_kind(config)? {
        SourceKind::Csv => {
            let dir = config
                .get_string("data", "csv_dir")
                .ok_or_else(|| ScannerError::ConfigInvalid {
                    section: "data".into(),
                    key: "csv_dir".into(),
                    reason: "csv source requires csv_dir".into(),
                })?;
            debug!(%dir, "using csv loader");
            Ok(Arc::new(CsvAdapter::new(PathBuf::from(dir.trim()))))
        }
        SourceKind::Yahoo => yahoo_port(config),
    }
}

#[cfg(feature = "yahoo")]
fn yahoo_port(config: &dyn ConfigPort) -> Result<SharedDataPort, ScannerError> {
    use crate::adapters::yahoo_adapter::YahooAdapter;

    debug!("using yahoo loader");
    Ok(Arc::new(YahooAdapter::from_config(config)?))
}

#[cfg(not(feature = "yahoo"))]
fn yahoo_port(_config: &dyn ConfigPort) -> Result<SharedDataPort, ScannerError> {
    Err(ScannerError::ConfigInvalid {
        section: "data".into(),
        key: "source".into(),
        reason: "built without the yahoo feature; use source = csv".into(),
    })
}

fn run_scan(data_port: &dyn DataPort, ticker: &str) -> ExitCode {
    let today = Local::now().date_naive();
    let result = scan(data_port, ticker, today).and_then(|report| TextReportAdapter.render(&report));
    match result {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Reads tickers line by line until `exit` or end of input.
///
/// Per-query failures are written to `output` and the loop continues.
pub fn run_repl<R, W, F>(
    data_port: &dyn DataPort,
    input: R,
    mut output: W,
    today: F,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> NaiveDate,
{
    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;
        let ticker = line.trim();

        if ticker.is_empty() {
            continue;
        }
        if ticker.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        match scan(data_port, ticker, today()).and_then(|r| TextReportAdapter.render(&r)) {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(e) if e.is_insufficient_data() => writeln!(output, "{}", e)?,
            Err(e) => writeln!(output, "error: {}", e)?,
        }
    }
}

#[cfg(feature = "web")]
fn run_serve(config: &dyn ConfigPort, data_port: SharedDataPort) -> ExitCode {
    use crate::adapters::web::{build_router, AppState};
    use crate::domain::config_validation::{listen_addr, DEFAULT_TICKER};
    use crate::domain::scan::normalize_ticker;

    let addr = match listen_addr(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let default_ticker = config
        .get_string("web", "default_ticker")
        .map(|t| normalize_ticker(&t))
        .unwrap_or_else(|| DEFAULT_TICKER.to_string());

    let router = build_router(AppState {
        data_port,
        default_ticker,
    });

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            let err = ScannerError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let served: io::Result<()> = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "web server listening");
        axum::serve(listener, router).await
    });

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = ScannerError::from(e);
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

#[cfg(not(feature = "web"))]
fn run_serve(_config: &dyn ConfigPort, _data_port: SharedDataPort) -> ExitCode {
    eprintln!("error: web feature is required for serve");
    ExitCode::from(1)
}
