//! sensorcast - Hardware Telemetry Binary
//!
//! A standalone agent that streams selected hardware sensor values to a UDP
//! collector at a fixed interval.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sensorcast::{
    FrameEncoder, HardwareNode, Monitor, SelectionSpec, SensorSource, SysinfoSource,
    TelemetryConfig, DEFAULT_INTERVAL_MS, DEFAULT_PORT,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sensorcast")]
#[command(about = "📡 sensorcast - Hardware Sensor Telemetry over UDP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Polls hardware sensors and streams fixed-slot binary frames to a UDP collector")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Collector host to send frames to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Collector UDP port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Update period in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval: u64,

    /// Selection spec JSON file (uses the built-in default map when omitted)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start streaming frames to the collector (default)
    Run,

    /// List the discovered sensor tree and exit
    Sensors(SensorsArgs),

    /// Show the resolved configuration and spec summary
    Info,
}

#[derive(Args)]
struct SensorsArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Run) | None => {
            run_command(&cli).await?;
        }
        Some(Commands::Sensors(args)) => {
            sensors_command(args)?;
        }
        Some(Commands::Info) => {
            info_command(&cli)?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Resolve the selection spec from the CLI, falling back to the built-in map.
fn load_spec(cli: &Cli) -> anyhow::Result<SelectionSpec> {
    match &cli.spec {
        Some(path) => SelectionSpec::from_path(path)
            .with_context(|| format!("failed to load selection spec from {}", path.display())),
        None => Ok(SelectionSpec::default()),
    }
}

async fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let spec = load_spec(cli)?;
    if cli.spec.is_none() {
        info!("No spec file given, using the built-in default map");
    }

    let source = SysinfoSource::new().context("sensor discovery failed at startup")?;
    info!("Discovered {} sensors", source.tree().sensor_count());

    let config = TelemetryConfig::new(&cli.host, cli.port).with_interval_ms(cli.interval);
    info!("Destination: {}", config.destination());
    info!("Selection: {}", spec.describe());

    let monitor = Monitor::new(source, spec, &config)?;
    monitor.run().await?;

    Ok(())
}

fn sensors_command(args: &SensorsArgs) -> anyhow::Result<()> {
    let mut source = SysinfoSource::new().context("sensor discovery failed at startup")?;
    source.refresh()?;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(source.tree())?;
            println!("{}", json);
        }
        "pretty" => {
            print_tree(&source);
        }
        other => {
            anyhow::bail!("unsupported format: {}. Use 'json' or 'pretty'", other);
        }
    }

    Ok(())
}

fn print_tree(source: &SysinfoSource) {
    let tree = source.tree();
    println!("📡 Discovered sensor tree ({} sensors)", tree.sensor_count());
    println!("==========================================");
    println!();

    let positions = FrameEncoder::positions_of(tree);
    for node in &tree.nodes {
        print_node(node, 0, &positions);
    }

    println!();
    println!("Positions are traversal order; use them for positional specs on");
    println!("this machine only.");
}

fn print_node(node: &HardwareNode, depth: usize, positions: &std::collections::HashMap<String, usize>) {
    let indent = "  ".repeat(depth);
    println!("{}{}", indent, node.name);

    for child in &node.children {
        print_node(child, depth + 1, positions);
    }

    for sensor in &node.sensors {
        let position = positions.get(&sensor.identifier).copied().unwrap_or(0);
        println!(
            "{}  [{:>3}] {:<40} {:<12} {:.2}",
            indent, position, sensor.identifier, sensor.kind, sensor.value
        );
    }
}

fn info_command(cli: &Cli) -> anyhow::Result<()> {
    let spec = load_spec(cli)?;

    println!("📡 sensorcast Configuration");
    println!("===========================");
    println!();
    println!("Destination: {}:{}", cli.host, cli.port);
    println!("Interval: {}ms", cli.interval);
    println!(
        "Spec: {} ({})",
        cli.spec
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in default".to_string()),
        spec.describe()
    );
    println!("Frame: {} slots, {} bytes per datagram", spec.frame_len(), spec.frame_len() * 4);

    Ok(())
}
