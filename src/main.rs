//! Conflux - compile and check a proxy configuration

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use conflux::app::{LogSettings, LogTarget, RuntimeConfig};
use conflux::config::{Config, LogConfig};

fn main() {
    let args = Args::parse();

    if args.version {
        print_version();
        return;
    }

    let Some(path) = args.config else {
        print_help();
        std::process::exit(1);
    };

    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LogSettings::default());
            error!("Failed to load {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    // Log settings compile on their own so the subscriber is up before the
    // rest of the document is compiled.
    let log = config.log.as_ref().map(LogConfig::build).unwrap_or_default();
    init_logging(&log);

    info!("Conflux v{} compiling {}", env!("CARGO_PKG_VERSION"), path.display());

    let runtime_config = match config.build() {
        Ok(runtime_config) => runtime_config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    print_summary(&runtime_config);

    if args.dump {
        match serde_json::to_string_pretty(&runtime_config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize compiled config: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_logging(settings: &LogSettings) {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .or_else(|| settings.level.max_level());
    let Some(level) = level else {
        return;
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    let result = match &settings.error {
        LogTarget::None => return,
        LogTarget::Console => {
            tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())
        }
        LogTarget::File(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => tracing::subscriber::set_global_default(
                builder.with_ansi(false).with_writer(Mutex::new(file)).finish(),
            ),
            Err(e) => {
                eprintln!("Cannot open error log {}: {}", path.display(), e);
                tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn print_summary(config: &RuntimeConfig) {
    for inbound in &config.inbounds {
        info!(
            "[{}] inbound {} on {}:{}",
            inbound.tag, inbound.protocol, inbound.listen, inbound.ports
        );
    }
    for outbound in &config.outbounds {
        info!("[{}] outbound {}", outbound.tag, outbound.protocol);
    }
    info!("Configuration OK");
}

/// Command line arguments
struct Args {
    config: Option<PathBuf>,
    dump: bool,
    version: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = None;
        let mut dump = false;
        let mut version = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        config = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                "--dump" => dump = true,
                "-v" | "--version" => version = true,
                "-h" | "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                arg if !arg.starts_with('-') && config.is_none() => {
                    // Positional argument: treat as config file
                    config = Some(PathBuf::from(arg));
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            config,
            dump,
            version,
        }
    }
}

fn print_help() {
    println!(
        r#"Conflux - proxy configuration compiler

USAGE:
    conflux [OPTIONS] <FILE>

OPTIONS:
    -c, --config <FILE>     Path to configuration file
    --dump                  Print the compiled configuration as JSON
    -v, --version           Print version information
    -h, --help              Print help information

EXAMPLES:
    conflux -c config.json
    conflux config.json --dump > compiled.json
"#
    );
}

fn print_version() {
    println!("Conflux v{}", env!("CARGO_PKG_VERSION"));
    println!("Configuration compiler for multi-protocol proxies");
}
