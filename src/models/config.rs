use escpos_raster::TargetSpec;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Printable dots per line of the attached printer
    #[serde(default = "default_device_width")]
    pub device_width_px: u32,

    /// Where incoming images are stored (OS temp dir if unset)
    #[serde(default)]
    pub spool_dir: Option<PathBuf>,

    /// Keep spooled images and raw jobs after delivery
    #[serde(default)]
    pub keep_spooled_files: bool,

    /// How jobs reach the printer
    #[serde(default)]
    pub printer: PrinterConfig,
}

fn default_device_width() -> u32 {
    TargetSpec::RECEIPT_80MM.device_width_px
}

/// How a job is handed to the operating system.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    /// ESC/POS bytes written verbatim to a raw channel
    Raw,
    /// The spooled image file opened with the platform's default handler
    #[default]
    GenericOpen,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Raw => "raw",
            Transport::GenericOpen => "generic-open",
        }
    }
}

/// Printer connection settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PrinterConfig {
    #[serde(default)]
    pub transport: Transport,

    /// Character device, e.g. /dev/usb/lp0
    #[serde(default)]
    pub device: Option<PathBuf>,

    /// lp queue name
    #[serde(default)]
    pub queue: Option<String>,

    /// Raw TCP endpoint, usually port 9100
    #[serde(default)]
    pub address: Option<SocketAddr>,

    /// Windows printer name
    #[serde(default)]
    pub spooler: Option<String>,

    /// Upper bound for a single delivery
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            device: None,
            queue: None,
            address: None,
            spooler: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing path, unreadable file or parse failure falls back to
    /// defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        width = config.device_width_px,
                        transport = config.printer.transport.as_str(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML, replacing an unusable head width with the default.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(content)?;
        if config.device_width_px == 0 {
            tracing::warn!("device_width_px is 0, using default");
            config.device_width_px = default_device_width();
        }
        Ok(config)
    }

    pub fn target(&self) -> TargetSpec {
        TargetSpec::new(self.device_width_px).unwrap_or_default()
    }

    pub fn spool_dir(&self) -> PathBuf {
        self.spool_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_width_px: default_device_width(),
            spool_dir: None,
            keep_spooled_files: false,
            printer: PrinterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.device_width_px, 576);
        assert_eq!(config.spool_dir, None);
        assert!(!config.keep_spooled_files);
        assert_eq!(config.printer.transport, Transport::GenericOpen);
        assert_eq!(config.printer.timeout_secs, 30);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
device_width_px: 384
spool_dir: /var/spool/receipts
keep_spooled_files: true
printer:
  transport: raw
  device: /dev/usb/lp0
  address: 192.168.1.50:9100
  timeout_secs: 5
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.device_width_px, 384);
        assert_eq!(config.spool_dir, Some(PathBuf::from("/var/spool/receipts")));
        assert!(config.keep_spooled_files);
        assert_eq!(config.printer.transport, Transport::Raw);
        assert_eq!(config.printer.device, Some(PathBuf::from("/dev/usb/lp0")));
        assert_eq!(
            config.printer.address,
            Some("192.168.1.50:9100".parse().unwrap())
        );
        assert_eq!(config.printer.queue, None);
        assert_eq!(config.printer.timeout_secs, 5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_yaml("printer:\n  queue: receipt\n").unwrap();

        assert_eq!(config.device_width_px, 576);
        assert_eq!(config.printer.transport, Transport::GenericOpen);
        assert_eq!(config.printer.queue.as_deref(), Some("receipt"));
        assert_eq!(config.printer.timeout_secs, 30);
    }

    #[test]
    fn test_generic_open_transport_name() {
        let config = AppConfig::from_yaml("printer:\n  transport: generic-open\n").unwrap();
        assert_eq!(config.printer.transport, Transport::GenericOpen);
        assert_eq!(config.printer.transport.as_str(), "generic-open");
    }

    #[test]
    fn test_unknown_transport_is_error() {
        assert!(AppConfig::from_yaml("printer:\n  transport: carrier-pigeon\n").is_err());
    }

    #[test]
    fn test_zero_width_replaced_with_default() {
        let config = AppConfig::from_yaml("device_width_px: 0\n").unwrap();
        assert_eq!(config.device_width_px, 576);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/receipt.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "device_width_px: [not, a, number]").unwrap();

        assert_eq!(AppConfig::load(Some(file.path())), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "device_width_px: 384").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.target(), TargetSpec::RECEIPT_58MM);
    }

    #[test]
    fn test_spool_dir_falls_back_to_temp() {
        assert_eq!(AppConfig::default().spool_dir(), std::env::temp_dir());
    }
}
