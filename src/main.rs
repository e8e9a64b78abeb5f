use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use proxylist_generator::error::EXIT_FAILURE;
use proxylist_generator::{GeneratorConfig, GeneratorError, ProxyListGenerator};
use std::path::PathBuf;
use std::process;

/// Convert proxy definition files into a grouped proxy list document
#[derive(Parser, Debug)]
#[command(name = "proxylist-generator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output file for the proxy list (must not exist yet)
    output: PathBuf,

    /// Input files, one group is built from each
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of proxies a consumer selects from each group
    #[arg(long, default_value = "2")]
    select_per_group: u32,

    /// Connection count attached to every proxy
    #[arg(long, default_value = "3")]
    conn_num: u32,

    /// Obfuscate the output with this key
    #[arg(short, long)]
    key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::init_from_env(Env::default().default_filter_or(default_level));

    if let Err(err) = run(cli) {
        error!("{:#}", err);
        let code = err
            .downcast_ref::<GeneratorError>()
            .map_or(EXIT_FAILURE, GeneratorError::exit_code);
        process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GeneratorConfig::new()
        .with_select_per_group(cli.select_per_group)
        .with_conn_num(cli.conn_num);
    if let Some(key) = cli.key {
        config = config.with_key(key);
    }

    info!(
        "Generating {:?} from {} input files",
        cli.output,
        cli.inputs.len()
    );

    let generator = ProxyListGenerator::with_config(config);
    let document = generator
        .run(&cli.output, &cli.inputs)
        .with_context(|| format!("failed to generate {:?}", cli.output))?;

    for group in &document.groups {
        info!("  {} ({} proxies)", group.name, group.len());
    }

    Ok(())
}
