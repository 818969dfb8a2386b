use hostprobe::cli::{write_report, CliArgs, OutputFormat};
use hostprobe::fs::RealFileSystem;
use hostprobe::process::SystemCommandRunner;
use hostprobe::util::{init_logging, parse_level, LoggingConfig};
use hostprobe::{Discovery, HostprobeConfig, Platform, ProbeContext, VERSION};

use clap::Parser;
use std::process;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let logging = LoggingConfig {
        log_file: Some(args.log_file.clone()),
        console: args.log_to_stdout,
        ..LoggingConfig::with_level(log_level(&args, &config))
    };
    if let Err(e) = init_logging(logging) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    debug!("hostprobe v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {}", config);

    process::exit(run(&args, &config).await);
}

fn load_config(args: &CliArgs) -> Result<HostprobeConfig, hostprobe::ConfigError> {
    let mut config = HostprobeConfig::from_env()?;
    if let Some(timeout) = args.timeout {
        config.command_timeout_secs = timeout;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    config.validate()?;
    Ok(config)
}

fn log_level(args: &CliArgs, config: &HostprobeConfig) -> Level {
    if args.log_level.is_some() {
        parse_level(&config.log_level)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    }
}

async fn run(args: &CliArgs, config: &HostprobeConfig) -> i32 {
    let started = Instant::now();
    let context = ProbeContext::new(
        Arc::new(SystemCommandRunner::new(config.command_timeout())),
        Arc::new(RealFileSystem::new()),
        Platform::current(),
    );
    let report = Discovery::new(context, config).run().await;

    let output = args.output_path();
    if let Err(e) = write_report(&report, &output, OutputFormat::from(args.format)) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return 1;
    }

    info!(
        report = %output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Report written"
    );
    0
}
