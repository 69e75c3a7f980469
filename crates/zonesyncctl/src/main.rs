// # zonesyncctl - zonesync command-line client
//
// A thin host around the provider crates: it reads credentials, builds a
// provider through the registry, runs one record operation and prints the
// result. All DNS logic lives in the library crates.
//
// ## Configuration
//
// Credentials come from flags or environment variables:
//
// - `AUTODNS_USERNAME`: API user name (required)
// - `AUTODNS_PASSWORD`: API password (required)
// - `AUTODNS_CONTEXT`: Domainrobot context (default `4`, live system)
// - `AUTODNS_ENDPOINT`: API base URL (default `https://api.autodns.com/v1`)
// - `ZONESYNC_LOG_LEVEL`: trace, debug, info, warn, error (default `warn`)
//
// ## Example
//
// ```bash
// export AUTODNS_USERNAME=api-user
// export AUTODNS_PASSWORD=secret
//
// zonesyncctl get example.com
// zonesyncctl set example.com --record "_acme-challenge 60 TXT token"
// zonesyncctl delete example.com --record "www 300 A 192.0.2.1"
// ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;
use zonesync_core::{DnsProvider, ProviderConfig, ProviderRegistry, Record, Rr};

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration or usage error
/// - 2: Runtime error (the provider operation failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Manage DNS records of AutoDNS zones
#[derive(Parser, Debug)]
#[command(name = "zonesyncctl", version, about)]
struct Cli {
    /// API user name
    #[arg(long, env = "AUTODNS_USERNAME")]
    username: Option<String>,

    /// API password
    #[arg(long, env = "AUTODNS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Domainrobot context (4 = live, 1 = demo)
    #[arg(long, env = "AUTODNS_CONTEXT")]
    context: Option<String>,

    /// API base URL
    #[arg(long, env = "AUTODNS_ENDPOINT")]
    endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, env = "ZONESYNC_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every record of a zone
    Get { zone: String },
    /// Add records without touching existing ones
    Append(RecordArgs),
    /// Replace all records sharing type and name
    Set(RecordArgs),
    /// Remove records matching type, name and value exactly
    Delete(RecordArgs),
}

#[derive(clap::Args, Debug)]
struct RecordArgs {
    zone: String,

    /// Record in zone-file form: "<name> <ttl> <TYPE> <data>"
    #[arg(long = "record", short = 'r', required = true)]
    records: Vec<String>,
}

impl Cli {
    fn provider_config(&self) -> Result<ProviderConfig> {
        let username = self
            .username
            .clone()
            .filter(|u| !u.is_empty())
            .context("AUTODNS_USERNAME is required. Set it via: export AUTODNS_USERNAME=api-user")?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .context("AUTODNS_PASSWORD is required. Set it via: export AUTODNS_PASSWORD=secret")?;

        let config = ProviderConfig::Autodns {
            username,
            password,
            context: self.context.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "ZONESYNC_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

/// Parse `<name> <ttl> <TYPE> <data>` into a record
///
/// The data is everything after the type, so values may contain spaces.
fn parse_record(spec: &str) -> Result<Record> {
    let mut fields = spec.split_whitespace();
    let (Some(name), Some(ttl), Some(rtype)) = (fields.next(), fields.next(), fields.next()) else {
        anyhow::bail!("Record '{}' must have the form '<name> <ttl> <TYPE> <data>'", spec);
    };
    let data = fields.collect::<Vec<_>>().join(" ");
    if data.is_empty() {
        anyhow::bail!("Record '{}' has no data", spec);
    }

    let ttl: u64 = ttl
        .parse()
        .with_context(|| format!("Record '{}' has an invalid TTL '{}'", spec, ttl))?;

    let rr = Rr {
        name: name.to_string(),
        ttl: Duration::from_secs(ttl),
        rtype: rtype.to_uppercase(),
        data,
    };
    rr.parse()
        .with_context(|| format!("Record '{}' could not be parsed", spec))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match parse_log_level(&cli.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let config = match cli.provider_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let registry = ProviderRegistry::new();
    zonesync_provider_autodns::register(&registry);

    let provider = match registry.create_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };
    debug!("Using provider: {}", provider.provider_name());

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(run(provider.as_ref(), cli.command)).into()
}

/// Parse every `--record` argument, reporting the first bad one
fn parse_records(specs: &[String]) -> Option<Vec<Record>> {
    match specs.iter().map(|spec| parse_record(spec)).collect::<Result<Vec<_>>>() {
        Ok(records) => Some(records),
        Err(e) => {
            eprintln!("Invalid record: {:#}", e);
            None
        }
    }
}

/// Run one command and print its result
async fn run(provider: &dyn DnsProvider, command: Command) -> CtlExitCode {
    let (zone, result) = match command {
        Command::Get { zone } => {
            let result = provider.get_records(&zone).await;
            (zone, result)
        }
        Command::Append(args) => {
            let Some(records) = parse_records(&args.records) else {
                return CtlExitCode::ConfigError;
            };
            let result = provider.append_records(&args.zone, &records).await;
            (args.zone, result)
        }
        Command::Set(args) => {
            let Some(records) = parse_records(&args.records) else {
                return CtlExitCode::ConfigError;
            };
            let result = provider.set_records(&args.zone, &records).await;
            (args.zone, result)
        }
        Command::Delete(args) => {
            let Some(records) = parse_records(&args.records) else {
                return CtlExitCode::ConfigError;
            };
            let result = provider.delete_records(&args.zone, &records).await;
            (args.zone, result)
        }
    };

    match result {
        Ok(records) => {
            for record in &records {
                println!("{}", record);
            }
            CtlExitCode::Success
        }
        Err(e) if e.is_validation() => {
            eprintln!("Error: {}", e);
            CtlExitCode::ConfigError
        }
        Err(e) => {
            error!("Operation on zone {} failed: {}", zone, e);
            eprintln!("Error: {}", e);
            CtlExitCode::RuntimeError
        }
    }
}
