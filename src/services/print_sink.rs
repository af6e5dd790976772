//! Delivery of finished jobs to the operating system.
//!
//! Supports:
//! - Raw channels: character devices, lp queues, TCP port 9100 and (on
//!   Windows) the spooler with datatype `RAW`
//! - The platform's default document handler for the spooled image
//!
//! The sink is resolved once at startup by [`PrintSink::detect`].

use escpos_raster::PrintJob;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::process::Command;
use tracing::{info, instrument, warn};

use crate::error::DeliveryError;
use crate::models::{PrinterConfig, Transport};

/// What a transport is handed.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Framed ESC/POS bytes for a raw channel
    Job(PrintJob),
    /// An image file for the document handler
    Document(PathBuf),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Job(_) => "job",
            Payload::Document(_) => "document",
        }
    }
}

/// A channel that passes bytes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTarget {
    /// Character device such as /dev/usb/lp0
    Device(PathBuf),
    /// lp queue, fed through `lp -d <queue> -o raw`
    Queue(String),
    /// Raw TCP printer
    Network(SocketAddr),
    /// Windows printer name
    Spooler(String),
}

impl fmt::Display for RawTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTarget::Device(path) => write!(f, "device {}", path.display()),
            RawTarget::Queue(queue) => write!(f, "queue {queue}"),
            RawTarget::Network(addr) => write!(f, "tcp {addr}"),
            RawTarget::Spooler(name) => write!(f, "spooler {name}"),
        }
    }
}

/// Command line that hands a file to the desktop's default handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl Opener {
    /// `start /print` asks the associated application to print directly.
    pub const WINDOWS: Self = Self {
        program: "cmd",
        args: &["/c", "start", "/min", "", "/print"],
    };
    pub const LINUX: Self = Self {
        program: "xdg-open",
        args: &[],
    };
    pub const MACOS: Self = Self {
        program: "open",
        args: &[],
    };

    /// Opener for a `std::env::consts::OS` value.
    pub fn for_os(os: &str) -> Option<Self> {
        match os {
            "windows" => Some(Self::WINDOWS),
            "linux" => Some(Self::LINUX),
            "macos" => Some(Self::MACOS),
            _ => None,
        }
    }

    pub fn command(&self, file: &Path) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// Where finished jobs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintSink {
    RawChannel { target: RawTarget, timeout: Duration },
    DocumentOpen(Opener),
    Unsupported { platform: String },
}

impl PrintSink {
    /// Raw sink with the default timeout.
    pub fn raw(target: RawTarget) -> Self {
        PrintSink::RawChannel {
            target,
            timeout: Duration::from_secs(PrinterConfig::default().timeout_secs),
        }
    }

    /// Resolve the sink from configuration and the host OS.
    pub fn detect(config: &PrinterConfig, os: &str) -> Self {
        let unsupported = || PrintSink::Unsupported {
            platform: os.to_string(),
        };

        match config.transport {
            Transport::Raw => {
                let target = if let Some(device) = &config.device {
                    RawTarget::Device(device.clone())
                } else if let Some(queue) = &config.queue {
                    RawTarget::Queue(queue.clone())
                } else if let Some(addr) = config.address {
                    RawTarget::Network(addr)
                } else if let Some(name) = &config.spooler {
                    RawTarget::Spooler(name.clone())
                } else {
                    warn!("Raw transport selected but no device, queue, address or spooler set");
                    return unsupported();
                };

                let platform_ok = match &target {
                    RawTarget::Spooler(_) => os == "windows",
                    RawTarget::Queue(_) | RawTarget::Device(_) => os != "windows",
                    RawTarget::Network(_) => true,
                };
                if !platform_ok {
                    warn!(%target, os, "Raw target not available on this platform");
                    return unsupported();
                }

                PrintSink::RawChannel {
                    target,
                    timeout: Duration::from_secs(config.timeout_secs),
                }
            }
            Transport::GenericOpen => Opener::for_os(os)
                .map(PrintSink::DocumentOpen)
                .unwrap_or_else(unsupported),
        }
    }

    /// Transport tag for logs and status output.
    pub fn transport(&self) -> &'static str {
        match self {
            PrintSink::RawChannel { .. } => Transport::Raw.as_str(),
            PrintSink::DocumentOpen(_) => Transport::GenericOpen.as_str(),
            PrintSink::Unsupported { .. } => "none",
        }
    }

    /// Whether this sink wants rendered ESC/POS bytes.
    pub fn wants_job(&self) -> bool {
        matches!(self, PrintSink::RawChannel { .. })
    }

    /// Hand a payload to the printer.
    ///
    /// Only success or failure is reported; there is no job status.
    pub async fn deliver(&self, payload: Payload) -> Result<(), DeliveryError> {
        match (self, payload) {
            (PrintSink::Unsupported { platform }, _) => {
                Err(DeliveryError::UnsupportedPlatform(platform.clone()))
            }
            (PrintSink::RawChannel { target, timeout }, Payload::Job(job)) => {
                tokio::time::timeout(*timeout, write_raw(target, job))
                    .await
                    .map_err(|_| DeliveryError::Timeout(*timeout))?
            }
            (PrintSink::DocumentOpen(opener), Payload::Document(path)) => {
                open_document(opener, &path)
            }
            (sink, payload) => Err(DeliveryError::PayloadMismatch {
                transport: sink.transport(),
                payload: payload.kind(),
            }),
        }
    }
}

impl fmt::Display for PrintSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintSink::RawChannel { target, timeout } => {
                write!(f, "raw {target} (timeout {}s)", timeout.as_secs())
            }
            PrintSink::DocumentOpen(opener) => write!(f, "generic-open via {}", opener.program),
            PrintSink::Unsupported { platform } => write!(f, "unsupported platform {platform}"),
        }
    }
}

#[instrument(skip_all, fields(raw = %target, bytes = job.len()))]
async fn write_raw(target: &RawTarget, job: PrintJob) -> Result<(), DeliveryError> {
    match target {
        RawTarget::Device(path) => {
            let path = path.clone();
            tokio::task::spawn_blocking(move || write_device(&path, job.as_bytes()))
                .await
                .map_err(|e| DeliveryError::Io(std::io::Error::other(e)))??;
        }
        RawTarget::Queue(queue) => write_queue(queue, job.as_bytes()).await?,
        RawTarget::Network(addr) => write_network(*addr, job.as_bytes()).await?,
        RawTarget::Spooler(name) => {
            let name = name.clone();
            tokio::task::spawn_blocking(move || spooler::write(&name, job.as_bytes()))
                .await
                .map_err(|e| DeliveryError::Io(std::io::Error::other(e)))??;
        }
    }
    info!("Print job delivered");
    Ok(())
}

fn write_device(path: &Path, data: &[u8]) -> Result<(), DeliveryError> {
    use std::io::Write;

    let mut device = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| unavailable(path.display(), e))?;
    device.write_all(data)?;
    device.flush()?;
    Ok(())
}

async fn write_queue(queue: &str, data: &[u8]) -> Result<(), DeliveryError> {
    let mut child = Command::new("lp")
        .args(["-d", queue, "-o", "raw"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| unavailable("lp", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(data).await?;
        stdin.shutdown().await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeliveryError::Rejected(format!(
            "lp exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

async fn write_network(addr: SocketAddr, data: &[u8]) -> Result<(), DeliveryError> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|e| unavailable(addr, e))?;
    stream.write_all(data).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    Ok(())
}

fn open_document(opener: &Opener, path: &Path) -> Result<(), DeliveryError> {
    // The handler keeps running on its own; tokio reaps it.
    opener
        .command(path)
        .spawn()
        .map_err(|e| unavailable(opener.program, e))?;
    info!(file = %path.display(), handler = opener.program, "Document handed to default handler");
    Ok(())
}

fn unavailable(what: impl fmt::Display, e: std::io::Error) -> DeliveryError {
    match e.kind() {
        std::io::ErrorKind::NotFound
        | std::io::ErrorKind::PermissionDenied
        | std::io::ErrorKind::ConnectionRefused => {
            DeliveryError::Unavailable(format!("{what}: {e}"))
        }
        _ => DeliveryError::Io(e),
    }
}

#[cfg(windows)]
mod spooler {
    use crate::error::DeliveryError;
    use core::ffi::c_void;
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Graphics::Printing::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, OpenPrinterW, StartDocPrinterW,
        StartPagePrinter, WritePrinter, DOC_INFO_1W, PRINTER_HANDLE,
    };

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    pub fn write(name: &str, data: &[u8]) -> Result<(), DeliveryError> {
        let name_w = to_wide(name);
        let doc_name_w = to_wide("Receipt");
        let datatype_w = to_wide("RAW");

        unsafe {
            let mut handle = PRINTER_HANDLE::default();
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|e| DeliveryError::Unavailable(format!("{name}: {e}")))?;

            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                let _ = ClosePrinter(handle);
                return Err(DeliveryError::Rejected("StartDocPrinter failed".to_string()));
            }

            if !StartPagePrinter(handle).as_bool() {
                let _ = EndDocPrinter(handle);
                let _ = ClosePrinter(handle);
                return Err(DeliveryError::Rejected("StartPagePrinter failed".to_string()));
            }

            let mut written: u32 = 0;
            let ok = WritePrinter(
                handle,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            let _ = EndPagePrinter(handle);
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);

            if !ok.as_bool() {
                return Err(DeliveryError::Rejected("WritePrinter failed".to_string()));
            }
            if written != data.len() as u32 {
                return Err(DeliveryError::Rejected(format!(
                    "incomplete write: {written} of {} bytes",
                    data.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(not(windows))]
mod spooler {
    use crate::error::DeliveryError;

    pub fn write(_name: &str, _data: &[u8]) -> Result<(), DeliveryError> {
        Err(DeliveryError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}
