//! `model-info` binary: list providers and models, show model info and token costs.
//!
//! Subcommands: `providers`, `models`, `info`, `cost`, `flush`.

mod log_format;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cli::{CliError, ExtraAdapter};
use model_info::{ModelInfoFactory, ModelInfoSettings, ModelProvider};
use tracing::Instrument;

#[derive(Parser, Debug)]
#[command(name = "model-info")]
#[command(about = "Look up LLM model info: context limits, token prices, capabilities")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// With --json, pretty-print (multi-line)
    #[arg(long, global = true)]
    pretty: bool,

    /// Debug logs from model-info to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH", env = "LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Persist the lookup cache in this JSON file (default: in-memory for this run)
    #[arg(long, value_name = "PATH", env = "MODEL_INFO_CACHE_FILE", global = true)]
    cache_file: Option<PathBuf>,

    /// Register an extra adapter ahead of the defaults (repeatable)
    #[arg(long = "with", value_enum, value_name = "ADAPTER", global = true)]
    with: Vec<ExtraAdapter>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every provider and the adapter that serves it
    Providers,
    /// List model names of a provider
    Models {
        provider: ModelProvider,
        /// Fail with the lookup error instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },
    /// Show the normalized info of one model
    Info {
        provider: ModelProvider,
        model: String,
        /// Show the lookup error instead of a generic message
        #[arg(long)]
        strict: bool,
    },
    /// Price a number of input and output tokens
    Cost {
        provider: ModelProvider,
        model: String,
        /// Input (prompt) tokens
        #[arg(long, default_value_t = 0)]
        input: u64,
        /// Output (completion) tokens
        #[arg(long, default_value_t = 0)]
        output: u64,
    },
    /// Drop cached model lists and model info
    Flush,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Providers => "providers",
            Command::Models { .. } => "models",
            Command::Info { .. } => "info",
            Command::Cost { .. } => "cost",
            Command::Flush => "flush",
        }
    }
}

/// Runs the subcommand and prints its result to `out`.
async fn run<W: Write>(args: &Args, factory: &ModelInfoFactory, out: &mut W) -> Result<(), CliError> {
    match &args.cmd {
        Command::Providers => {
            let rows = cli::providers(factory);
            if args.json {
                cli::write_json_output(&rows, out, args.pretty)
            } else {
                Ok(write!(out, "{}", cli::render_providers(&rows))?)
            }
        }
        Command::Models { provider, strict } => {
            let models = cli::models(factory, *provider, *strict).await?;
            if args.json {
                cli::write_json_output(&models, out, args.pretty)
            } else {
                Ok(write!(out, "{}", cli::render_models(&models))?)
            }
        }
        Command::Info {
            provider,
            model,
            strict,
        } => {
            let info = cli::info(factory, *provider, model, *strict).await?;
            if args.json {
                cli::write_json_output(&info, out, args.pretty)
            } else {
                Ok(write!(out, "{}", cli::render_info(&info))?)
            }
        }
        Command::Cost {
            provider,
            model,
            input,
            output,
        } => {
            let report = cli::cost(factory, *provider, model, *input, *output).await?;
            if args.json {
                cli::write_json_output(&report, out, args.pretty)
            } else {
                Ok(write!(out, "{}", cli::render_cost(&report))?)
            }
        }
        Command::Flush => {
            let flushed = cli::flush(factory).await;
            if args.json {
                cli::write_json_output(&serde_json::json!({ "flushed": flushed }), out, args.pretty)
            } else {
                Ok(writeln!(out, "{}", if flushed { "cache flushed" } else { "cache flush failed" })?)
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config_result = config::load_and_apply("model-info", None);
    let args = Args::parse();

    let _guard = match logging::init(args.verbose, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("model-info: logging: {}", e);
            None
        }
    };
    if let Err(e) = config_result {
        tracing::warn!(error = %e, "config not loaded");
    }

    let settings = ModelInfoSettings::from_env();
    let factory = cli::build_factory(&settings, args.cache_file.as_deref(), &args.with);

    let span = tracing::info_span!("command", name = args.cmd.name());
    let result = run(&args, &factory, &mut std::io::stdout())
        .instrument(span)
        .await;
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("model-info: {}", e);
            ExitCode::FAILURE
        }
    }
}
