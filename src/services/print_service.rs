//! Fire-and-forget print jobs.
//!
//! [`PrintService::submit`] validates and spools the image, then returns while
//! rendering and delivery continue on their own task.

use escpos_raster::{decode_image, ReceiptRenderer};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use super::print_sink::{Payload, PrintSink};
use super::spool::Spool;
use crate::error::PrintError;
use crate::models::AppConfig;

/// Outcome of a delivered job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job_id: Uuid,
    pub transport: &'static str,
    /// ESC/POS bytes sent, 0 when the image file was handed over instead
    pub bytes: usize,
    /// Files left in the spool directory
    pub kept: Vec<PathBuf>,
}

/// Decode, render, encode and deliver images.
#[derive(Debug, Clone)]
pub struct PrintService {
    renderer: ReceiptRenderer,
    sink: Arc<PrintSink>,
    spool: Spool,
}

impl PrintService {
    pub fn new(renderer: ReceiptRenderer, sink: PrintSink, spool: Spool) -> Self {
        Self {
            renderer,
            sink: Arc::new(sink),
            spool,
        }
    }

    /// Build from configuration, detecting the sink for the host OS.
    pub fn from_config(config: &AppConfig) -> Self {
        let sink = PrintSink::detect(&config.printer, std::env::consts::OS);
        let spool = Spool::new(config.spool_dir(), config.keep_spooled_files);
        Self::new(ReceiptRenderer::new().target(config.target()), sink, spool)
    }

    pub fn sink(&self) -> &PrintSink {
        &self.sink
    }

    /// Accept encoded image bytes and dispatch the job in the background.
    ///
    /// Returns once the image has been decoded and spooled. Undecodable
    /// bytes fail here; everything after is reported through the handle
    /// and the log.
    pub async fn submit(
        &self,
        bytes: Vec<u8>,
    ) -> Result<JoinHandle<Result<JobReport, PrintError>>, PrintError> {
        let job_id = Uuid::new_v4();

        let (image, bytes) = tokio::task::spawn_blocking(move || {
            decode_image(&bytes).map(|image| (image, bytes))
        })
        .await??;

        let path = self.spool.store_image(job_id, &bytes).await?;
        info!(%job_id, width = image.width(), height = image.height(), "Print job accepted");

        let service = self.clone();
        let span = tracing::info_span!("print_job", %job_id);
        Ok(tokio::spawn(
            async move {
                let result = service.run(job_id, image, path).await;
                match &result {
                    Ok(report) => {
                        info!(transport = report.transport, bytes = report.bytes, "Print job done")
                    }
                    Err(e) => error!(error = %e, "Print job failed"),
                }
                result
            }
            .instrument(span),
        ))
    }

    /// Submit and wait for the outcome.
    pub async fn print(&self, bytes: Vec<u8>) -> Result<JobReport, PrintError> {
        self.submit(bytes).await?.await?
    }

    async fn run(
        &self,
        job_id: Uuid,
        image: DynamicImage,
        path: PathBuf,
    ) -> Result<JobReport, PrintError> {
        let mut kept = Vec::new();
        let outcome = self.dispatch(job_id, image, &path, &mut kept).await;

        // The document handler reads the file after we return
        if matches!(*self.sink, PrintSink::DocumentOpen(_)) && outcome.is_ok() {
            kept.push(path);
        } else {
            self.spool.release(&path).await;
            if self.spool.keeps_files() {
                kept.push(path);
            }
        }

        let bytes = outcome?;
        Ok(JobReport {
            job_id,
            transport: self.sink.transport(),
            bytes,
            kept,
        })
    }

    /// Render when the sink takes raw jobs, then deliver.
    ///
    /// Returns the number of ESC/POS bytes sent.
    async fn dispatch(
        &self,
        job_id: Uuid,
        image: DynamicImage,
        path: &Path,
        kept: &mut Vec<PathBuf>,
    ) -> Result<usize, PrintError> {
        if !self.sink.wants_job() {
            self.sink
                .deliver(Payload::Document(path.to_path_buf()))
                .await?;
            return Ok(0);
        }

        let renderer = self.renderer;
        let job = tokio::task::spawn_blocking(move || renderer.render_job(&image)).await??;
        let bytes = job.len();
        kept.extend(self.spool.store_job(job_id, &job).await?);
        self.sink.deliver(Payload::Job(job)).await?;
        Ok(bytes)
    }
}
