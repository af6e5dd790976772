//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use escpos_raster::{ReceiptRenderer, TargetSpec};
use http_body_util::BodyExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use receipt_printer::server::{build_router, AppState};
use receipt_printer::services::{PrintService, PrintSink, RawTarget, Spool};

use super::fixtures::TEST_WIDTH;

/// Test application whose printer is a plain file standing in for
/// /dev/usb/lp0.
pub struct TestApp {
    router: axum::Router,
    pub device: PathBuf,
    pub spool_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application with a recording raw device
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let device = dir.path().join("lp0");
        std::fs::write(&device, b"").expect("Failed to create device file");
        let spool_dir = dir.path().join("spool");

        Self::with_sink(
            dir,
            PrintSink::raw(RawTarget::Device(device.clone())),
            device,
            spool_dir,
        )
    }

    /// Create a test application around a custom sink
    pub fn with_sink(dir: TempDir, sink: PrintSink, device: PathBuf, spool_dir: PathBuf) -> Self {
        let renderer = ReceiptRenderer::new().target(TargetSpec::new(TEST_WIDTH).unwrap());
        let service = PrintService::new(renderer, sink, Spool::new(&spool_dir, false));
        let router = build_router(AppState::new(service));

        Self {
            router,
            device,
            spool_dir,
            _dir: dir,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Bytes written to the recording device so far
    pub fn printed(&self) -> Vec<u8> {
        std::fs::read(&self.device).unwrap_or_default()
    }

    /// Wait until the background job has written to the device
    pub async fn wait_for_print(&self) -> Vec<u8> {
        wait_for_file(&self.device).await
    }

    /// Number of files currently in the spool directory
    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(&self.spool_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll a file until it is non-empty and stops growing, or give up.
pub async fn wait_for_file(path: &Path) -> Vec<u8> {
    let mut last_len = 0;
    for _ in 0..250 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let bytes = std::fs::read(path).unwrap_or_default();
        if !bytes.is_empty() && bytes.len() == last_len {
            return bytes;
        }
        last_len = bytes.len();
    }
    panic!("Nothing written to {} within 5s", path.display());
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
