use anyhow::Context;
use clap::{Parser, Subcommand};
use escpos_raster::{ReceiptRenderer, TargetSpec};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use receipt_printer::models::AppConfig;
use receipt_printer::server;
use receipt_printer::services::PrintService;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5050";

#[derive(Parser)]
#[command(name = "receipt-printer")]
#[command(about = "Print images on ESC/POS thermal receipt printers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen on 127.0.0.1:<PORT> (overrides BIND_ADDR)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Render an image to an ESC/POS job file
    Render {
        /// Input image (PNG, JPEG, GIF, BMP, WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the raw job bytes
        #[arg(short, long)]
        output: PathBuf,

        /// Print head width in dots (576 for 80 mm, 384 for 58 mm)
        #[arg(short, long)]
        width: Option<u32>,
    },
    /// Render an image and send it to the configured printer
    Print {
        /// Input image (PNG, JPEG, GIF, BMP, WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Print head width in dots (576 for 80 mm, 384 for 58 mm)
        #[arg(short, long)]
        width: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => run_server(port).await,
        Some(Commands::Render {
            input,
            output,
            width,
        }) => run_render_command(&input, &output, width),
        Some(Commands::Print { input, width }) => run_print_command(&input, width).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::var("CONFIG_FILE").ok().map(PathBuf::from)
}

/// Minimal logging for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_printer=warn,escpos_raster=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config, letting `--width` override the configured head width.
fn load_config(width: Option<u32>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(config_path().as_deref());
    if let Some(width) = width {
        config.device_width_px = TargetSpec::new(width)?.device_width_px;
    }
    Ok(config)
}

/// Render an image straight to a job file (no printer needed)
fn run_render_command(input: &Path, output: &Path, width: Option<u32>) -> anyhow::Result<()> {
    init_cli_logging();

    let config = load_config(width)?;
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let job = ReceiptRenderer::new()
        .target(config.target())
        .render_bytes(&bytes)?;
    let (width_bytes, height) = job.dimensions();

    std::fs::write(output, job.as_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Rendered {} ({} bytes, {}x{} dots)",
        output.display(),
        job.len(),
        width_bytes * 8,
        height
    );

    Ok(())
}

/// Render, deliver and wait for the result
async fn run_print_command(input: &Path, width: Option<u32>) -> anyhow::Result<()> {
    init_cli_logging();

    let config = load_config(width)?;
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let service = PrintService::from_config(&config);
    let report = service.print(bytes).await?;

    println!(
        "Printed {} via {} ({} bytes)",
        input.display(),
        report.transport,
        report.bytes
    );
    for path in &report.kept {
        println!("  kept {}", path.display());
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("receipt-printer v{VERSION}");
    println!("Images to ESC/POS thermal receipt printers\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr
            .as_deref()
            .unwrap_or(&format!("{DEFAULT_BIND_ADDR} (default)"))
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };

    let config = AppConfig::load(config_path().as_deref());
    let service = PrintService::from_config(&config);

    println!("\nConfiguration:");
    println!("  Source:     {config_source}");
    println!("  Head width: {} dots", config.device_width_px);
    println!("  Spool dir:  {}", config.spool_dir().display());
    println!("  Printer:    {}", service.sink());

    println!("\nCommands:");
    println!("  receipt-printer serve    Start the HTTP server");
    println!("  receipt-printer render   Render an image to a job file");
    println!("  receipt-printer print    Print an image once");
    println!("\nRun 'receipt-printer --help' for more details.");
}

/// Run the HTTP server
async fn run_server(port: Option<u16>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "receipt_printer=debug,escpos_raster=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = match port {
        Some(port) => format!("127.0.0.1:{port}"),
        None => std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
    };

    let config = AppConfig::load(config_path().as_deref());
    let state = server::create_app_state(&config);
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Receipt printer listening");

    axum::serve(listener, app).await?;

    Ok(())
}
