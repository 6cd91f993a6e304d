//! Resolved application settings
//!
//! `Settings` is built once per process by one of two constructors:
//! [`Settings::from_secrets`] for hosted deployments and
//! [`Settings::from_table`] for a parsed `config.toml`. Both yield the same
//! value with the same defaults, so consumers never care which path ran.

use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::error::{ConfigError, ConfigResult};
use super::tools::ToolEnvironment;
use crate::log_warn;
use crate::logging::{LogLevel, Logger};
use crate::secrets::SecretStore;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Debug;
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_PROJECT_NAME: &str = "MoneyPrinterTurbo";
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "<a href='https://github.com/harry0703/MoneyPrinterTurbo'>https://github.com/harry0703/MoneyPrinterTurbo</a>";
pub const DEFAULT_PROJECT_VERSION: &str = "1.2.6";
pub const DEFAULT_VIDEO_SOURCE: &str = "pexels";
pub const DEFAULT_WHISPER_MODEL_SIZE: &str = "large-v3";
pub const DEFAULT_WHISPER_DEVICE: &str = "CPU";
pub const DEFAULT_WHISPER_COMPUTE_TYPE: &str = "int8";

/// Secret that switches resolution to the hosted path
pub const PEXELS_API_KEY: &str = "PEXELS_API_KEY";
pub const VIDEO_SOURCE: &str = "VIDEO_SOURCE";
pub const OLLAMA_BASE_URL: &str = "OLLAMA_BASE_URL";
pub const OLLAMA_MODEL_NAME: &str = "OLLAMA_MODEL_NAME";
pub const WHISPER_MODEL_SIZE: &str = "WHISPER_MODEL_SIZE";
pub const WHISPER_DEVICE: &str = "WHISPER_DEVICE";
pub const WHISPER_COMPUTE_TYPE: &str = "WHISPER_COMPUTE_TYPE";

/// Top-level tables recognized in `config.toml`
pub const SECTIONS: [&str; 6] = ["app", "whisper", "proxy", "azure", "siliconflow", "ui"];

/// Where a `Settings` value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// Hosted secret store, by store name
    Secrets(String),
    /// Parsed config file
    File(PathBuf),
    /// Built in memory (tests, embedding)
    Memory,
}

/// One top-level table of `config.toml`
///
/// Sections are open-ended: consumers look up whatever keys they own.
/// Absent sections are empty, never missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    table: Table,
}

impl Section {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// String list under `key`
    ///
    /// A bare non-empty string counts as a one-element list, which is how
    /// older config files wrote single API keys. Non-string array items are
    /// skipped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn as_table(&self) -> &Table {
        &self.table
    }
}

impl From<Table> for Section {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

/// Speech-recognition model parameters from `[whisper]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhisperSettings {
    #[serde(default = "default_model_size")]
    pub model_size: String,
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default = "default_compute_type")]
    pub compute_type: String,
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model_size: default_model_size(),
            device: default_device(),
            compute_type: default_compute_type(),
        }
    }
}

fn default_model_size() -> String {
    DEFAULT_WHISPER_MODEL_SIZE.to_string()
}

fn default_device() -> String {
    DEFAULT_WHISPER_DEVICE.to_string()
}

fn default_compute_type() -> String {
    DEFAULT_WHISPER_COMPUTE_TYPE.to_string()
}

impl WhisperSettings {
    /// Read `[whisper]` field by field; a bad field falls back on its own
    fn from_section(section: &Section, logger: &dyn Logger) -> Self {
        let fields = Lenient::new(section.as_table(), "whisper", logger);
        Self {
            model_size: fields.string_or("model_size", DEFAULT_WHISPER_MODEL_SIZE),
            device: fields.string_or("device", DEFAULT_WHISPER_DEVICE),
            compute_type: fields.string_or("compute_type", DEFAULT_WHISPER_COMPUTE_TYPE),
        }
    }

    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.insert("model_size".into(), Value::String(self.model_size.clone()));
        table.insert("device".into(), Value::String(self.device.clone()));
        table.insert("compute_type".into(), Value::String(self.compute_type.clone()));
        table
    }
}

/// The resolved, immutable configuration of the process
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    app: Section,
    whisper: Section,
    proxy: Section,
    azure: Section,
    siliconflow: Section,
    ui: Section,
    whisper_settings: WhisperSettings,
    log_level: LogLevel,
    listen_host: String,
    listen_port: u16,
    project_name: String,
    project_description: String,
    project_version: String,
    hostname: String,
    source: SettingsSource,
}

impl Settings {
    /// Build settings from a parsed `config.toml`
    ///
    /// Absent keys take their defaults. A recognized key holding a value of
    /// the wrong type or range is reported on `logger` and replaced by its
    /// default, so any well-formed file yields usable settings.
    pub fn from_table(
        mut table: Table,
        hostname: impl Into<String>,
        source: SettingsSource,
        logger: &dyn Logger,
    ) -> Self {
        let app = take_section(&mut table, "app", logger).unwrap_or_default();
        let whisper = take_section(&mut table, "whisper", logger).unwrap_or_default();
        let proxy = take_section(&mut table, "proxy", logger).unwrap_or_default();
        let azure = take_section(&mut table, "azure", logger).unwrap_or_default();
        let siliconflow = take_section(&mut table, "siliconflow", logger).unwrap_or_default();
        let ui = take_section(&mut table, "ui", logger).unwrap_or_else(default_ui);
        let whisper_settings = WhisperSettings::from_section(&whisper, logger);

        let top = Lenient::new(&table, "", logger);

        let log_level = match table.get("log_level") {
            None => DEFAULT_LOG_LEVEL,
            Some(Value::String(name)) => LogLevel::parse(name).unwrap_or_else(|| {
                top.ignore("log_level", &format!("unknown log level '{}'", name));
                DEFAULT_LOG_LEVEL
            }),
            Some(other) => {
                top.wrong_type("log_level", "a string", other);
                DEFAULT_LOG_LEVEL
            }
        };

        let listen_port = match table.get("listen_port") {
            None => DEFAULT_LISTEN_PORT,
            Some(Value::Integer(port)) => u16::try_from(*port).unwrap_or_else(|_| {
                top.ignore("listen_port", &format!("{} is not a valid port", port));
                DEFAULT_LISTEN_PORT
            }),
            Some(other) => {
                top.wrong_type("listen_port", "an integer", other);
                DEFAULT_LISTEN_PORT
            }
        };

        Self {
            listen_host: top.string_or("listen_host", DEFAULT_LISTEN_HOST),
            project_name: top.string_or("project_name", DEFAULT_PROJECT_NAME),
            project_description: top
                .string_or("project_description", DEFAULT_PROJECT_DESCRIPTION),
            project_version: top.string_or("project_version", DEFAULT_PROJECT_VERSION),
            app,
            whisper,
            proxy,
            azure,
            siliconflow,
            ui,
            whisper_settings,
            log_level,
            listen_port,
            hostname: hostname.into(),
            source,
        }
    }

    /// Build settings from a hosted secret store
    ///
    /// Only the keys a hosted deployment can inject are filled in. Multiple
    /// Pixabay keys are not supported this way, and `proxy`, `azure` and
    /// `siliconflow` stay empty.
    pub fn from_secrets(store: &dyn SecretStore, hostname: impl Into<String>) -> Self {
        let secret = |key: &str, default: &str| store.get(key).unwrap_or_else(|| default.to_string());

        let whisper_settings = WhisperSettings {
            model_size: secret(WHISPER_MODEL_SIZE, DEFAULT_WHISPER_MODEL_SIZE),
            device: secret(WHISPER_DEVICE, DEFAULT_WHISPER_DEVICE),
            compute_type: secret(WHISPER_COMPUTE_TYPE, DEFAULT_WHISPER_COMPUTE_TYPE),
        };

        let mut app = Table::new();
        app.insert(
            "video_source".into(),
            Value::String(secret(VIDEO_SOURCE, DEFAULT_VIDEO_SOURCE)),
        );
        app.insert(
            "pexels_api_keys".into(),
            Value::Array(store.get(PEXELS_API_KEY).into_iter().map(Value::String).collect()),
        );
        app.insert("pixabay_api_keys".into(), Value::Array(Vec::new()));
        app.insert("ollama_base_url".into(), Value::String(secret(OLLAMA_BASE_URL, "")));
        app.insert("ollama_model_name".into(), Value::String(secret(OLLAMA_MODEL_NAME, "")));
        app.insert("imagemagick_path".into(), Value::String(String::new()));
        app.insert("ffmpeg_path".into(), Value::String(String::new()));

        Self {
            app: Section::new(app),
            whisper: Section::new(whisper_settings.to_table()),
            proxy: Section::default(),
            azure: Section::default(),
            siliconflow: Section::default(),
            ui: default_ui(),
            whisper_settings,
            log_level: DEFAULT_LOG_LEVEL,
            listen_host: DEFAULT_LISTEN_HOST.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            project_description: DEFAULT_PROJECT_DESCRIPTION.to_string(),
            project_version: DEFAULT_PROJECT_VERSION.to_string(),
            hostname: hostname.into(),
            source: SettingsSource::Secrets(store.name().to_string()),
        }
    }

    pub fn app(&self) -> &Section {
        &self.app
    }

    pub fn whisper_section(&self) -> &Section {
        &self.whisper
    }

    pub fn proxy(&self) -> &Section {
        &self.proxy
    }

    pub fn azure(&self) -> &Section {
        &self.azure
    }

    pub fn siliconflow(&self) -> &Section {
        &self.siliconflow
    }

    pub fn ui(&self) -> &Section {
        &self.ui
    }

    /// Every recognized section with its table name
    pub fn sections(&self) -> [(&'static str, &Section); 6] {
        [
            ("app", &self.app),
            ("whisper", &self.whisper),
            ("proxy", &self.proxy),
            ("azure", &self.azure),
            ("siliconflow", &self.siliconflow),
            ("ui", &self.ui),
        ]
    }

    pub fn whisper(&self) -> &WhisperSettings {
        &self.whisper_settings
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn listen_host(&self) -> &str {
        &self.listen_host
    }

    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// `listen_host:listen_port` as a bindable address
    pub fn listen_addr(&self) -> ConfigResult<SocketAddr> {
        (self.listen_host.as_str(), self.listen_port)
            .to_socket_addrs()
            .map_err(|e| ConfigError::invalid_value("listen_host", e.to_string()))?
            .next()
            .ok_or_else(|| {
                ConfigError::invalid_value(
                    "listen_host",
                    format!("'{}' resolved to no addresses", self.listen_host),
                )
            })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_description(&self) -> &str {
        &self.project_description
    }

    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    /// Host name of the machine, never read from the file
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn source(&self) -> &SettingsSource {
        &self.source
    }

    pub fn video_source(&self) -> &str {
        self.app.get_str_or("video_source", DEFAULT_VIDEO_SOURCE)
    }

    pub fn pexels_api_keys(&self) -> Vec<String> {
        self.app.get_string_list("pexels_api_keys")
    }

    pub fn pixabay_api_keys(&self) -> Vec<String> {
        self.app.get_string_list("pixabay_api_keys")
    }

    pub fn ollama_base_url(&self) -> &str {
        self.app.get_str_or("ollama_base_url", "")
    }

    pub fn ollama_model_name(&self) -> &str {
        self.app.get_str_or("ollama_model_name", "")
    }

    pub fn imagemagick_path(&self) -> Option<&Path> {
        non_empty_path(&self.app, "imagemagick_path")
    }

    pub fn ffmpeg_path(&self) -> Option<&Path> {
        non_empty_path(&self.app, "ffmpeg_path")
    }

    pub fn hide_log(&self) -> bool {
        self.ui.get_bool("hide_log").unwrap_or(false)
    }

    /// Proxy URL for `scheme` (`"http"` or `"https"`), if configured
    pub fn proxy_url(&self, scheme: &str) -> Option<&str> {
        self.proxy.get_str(scheme).filter(|url| !url.is_empty())
    }

    /// Tool binaries for media consumers; see [`ToolEnvironment`]
    pub fn tool_environment(&self) -> ToolEnvironment {
        ToolEnvironment::from_paths(self.imagemagick_path(), self.ffmpeg_path())
    }

    /// The file-representable part of the settings as a TOML table
    ///
    /// `hostname` and the source are runtime facts and are left out.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.insert("log_level".into(), Value::String(self.log_level.as_str().to_string()));
        table.insert("listen_host".into(), Value::String(self.listen_host.clone()));
        table.insert("listen_port".into(), Value::Integer(i64::from(self.listen_port)));
        table.insert("project_name".into(), Value::String(self.project_name.clone()));
        table.insert(
            "project_description".into(),
            Value::String(self.project_description.clone()),
        );
        table.insert("project_version".into(), Value::String(self.project_version.clone()));
        for (name, section) in self.sections() {
            table.insert(name.to_string(), Value::Table(section.as_table().clone()));
        }
        table
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(&self.to_table())?)
    }

    /// Write the settings as a `config.toml`, creating parent directories
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl Default for Settings {
    /// Settings of an empty `config.toml`
    fn default() -> Self {
        Self {
            app: Section::default(),
            whisper: Section::default(),
            proxy: Section::default(),
            azure: Section::default(),
            siliconflow: Section::default(),
            ui: default_ui(),
            whisper_settings: WhisperSettings::default(),
            log_level: DEFAULT_LOG_LEVEL,
            listen_host: DEFAULT_LISTEN_HOST.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            project_description: DEFAULT_PROJECT_DESCRIPTION.to_string(),
            project_version: DEFAULT_PROJECT_VERSION.to_string(),
            hostname: String::new(),
            source: SettingsSource::Memory,
        }
    }
}

fn default_ui() -> Section {
    let mut ui = Table::new();
    ui.insert("hide_log".into(), Value::Boolean(false));
    Section::new(ui)
}

/// Remove section `name`; `None` when absent or not a table
fn take_section(table: &mut Table, name: &str, logger: &dyn Logger) -> Option<Section> {
    match table.remove(name)? {
        Value::Table(section) => Some(Section::new(section)),
        other => {
            Lenient::new(table, "", logger).wrong_type(name, "a table", &other);
            None
        }
    }
}

/// Key lookups that replace wrongly typed values with defaults
struct Lenient<'a> {
    table: &'a Table,
    section: &'a str,
    logger: &'a dyn Logger,
}

impl<'a> Lenient<'a> {
    fn new(table: &'a Table, section: &'a str, logger: &'a dyn Logger) -> Self {
        Self {
            table,
            section,
            logger,
        }
    }

    fn string_or(&self, key: &str, default: &str) -> String {
        match self.table.get(key) {
            None => default.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.wrong_type(key, "a string", other);
                default.to_string()
            }
        }
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &Value) {
        self.ignore(key, &format!("expected {}, found {}", expected, found.type_str()));
    }

    fn ignore(&self, key: &str, reason: &str) {
        let key = if self.section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.section, key)
        };
        log_warn!(self.logger, "Ignoring config value for '{}': {}, using default", key, reason);
    }
}

fn non_empty_path<'a>(section: &'a Section, key: &str) -> Option<&'a Path> {
    section
        .get_str(key)
        .filter(|p| !p.is_empty())
        .map(Path::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{NoOpLogger, RecordingLogger};
    use crate::secrets::MemorySecretStore;
    use tempfile::tempdir;

    fn parse(text: &str) -> Settings {
        let table: Table = toml::from_str(text).unwrap();
        Settings::from_table(table, "render-01", SettingsSource::Memory, &NoOpLogger)
    }

    fn parse_logged(text: &str) -> (Settings, Vec<String>) {
        let log = RecordingLogger::default();
        let table: Table = toml::from_str(text).unwrap();
        let settings = Settings::from_table(table, "render-01", SettingsSource::Memory, &log);
        (settings, log.at(LogLevel::Warn))
    }

    #[test]
    fn test_empty_table_yields_defaults() {
        let settings = parse("");

        assert_eq!(settings.log_level(), LogLevel::Debug);
        assert_eq!(settings.listen_host(), "0.0.0.0");
        assert_eq!(settings.listen_port(), 8080);
        assert_eq!(settings.project_name(), "MoneyPrinterTurbo");
        assert_eq!(settings.project_version(), "1.2.6");
        assert_eq!(settings.project_description(), DEFAULT_PROJECT_DESCRIPTION);
        assert_eq!(settings.hostname(), "render-01");
        assert!(!settings.hide_log());
        assert_eq!(settings.ui().get_bool("hide_log"), Some(false));
        assert_eq!(settings.whisper(), &WhisperSettings::default());
        assert_eq!(settings.whisper().model_size, "large-v3");
        assert_eq!(settings.whisper().device, "CPU");
        assert_eq!(settings.whisper().compute_type, "int8");
        assert_eq!(settings.video_source(), "pexels");
        assert!(settings.pexels_api_keys().is_empty());
        assert!(settings.proxy().is_empty());
        assert!(settings.azure().is_empty());
        assert!(settings.siliconflow().is_empty());
        assert_eq!(settings.imagemagick_path(), None);
        assert!(settings.tool_environment().is_empty());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = parse(
            r#"
listen_port = 9090
log_level = "info"

[app]
video_source = "pixabay"
pixabay_api_keys = ["pb-1", "pb-2"]

[whisper]
device = "cuda"
"#,
        );

        assert_eq!(settings.listen_port(), 9090);
        assert_eq!(settings.log_level(), LogLevel::Info);
        assert_eq!(settings.listen_host(), DEFAULT_LISTEN_HOST);
        assert_eq!(settings.project_name(), DEFAULT_PROJECT_NAME);
        assert_eq!(settings.video_source(), "pixabay");
        assert_eq!(settings.pixabay_api_keys(), vec!["pb-1", "pb-2"]);
        assert_eq!(settings.whisper().device, "cuda");
        assert_eq!(settings.whisper().model_size, DEFAULT_WHISPER_MODEL_SIZE);
        assert_eq!(settings.whisper().compute_type, DEFAULT_WHISPER_COMPUTE_TYPE);
    }

    #[test]
    fn test_present_ui_section_is_taken_verbatim() {
        let settings = parse("[ui]\nlanguage = \"zh\"\n");
        assert_eq!(settings.ui().get_str("language"), Some("zh"));
        assert!(!settings.ui().contains_key("hide_log"));
        assert!(!settings.hide_log());

        let hidden = parse("[ui]\nhide_log = true\n");
        assert!(hidden.hide_log());
    }

    #[test]
    fn test_single_key_string_is_a_list() {
        let settings = parse("[app]\npexels_api_keys = \"px-only\"\n");
        assert_eq!(settings.pexels_api_keys(), vec!["px-only"]);

        let blank = parse("[app]\npexels_api_keys = \"\"\n");
        assert!(blank.pexels_api_keys().is_empty());
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let (settings, warnings) = parse_logged("listen_port = \"8080\"");
        assert_eq!(settings.listen_port(), DEFAULT_LISTEN_PORT);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'listen_port'"));

        let (settings, warnings) = parse_logged("listen_port = 70000");
        assert_eq!(settings.listen_port(), DEFAULT_LISTEN_PORT);
        assert!(warnings[0].contains("70000 is not a valid port"));

        let (settings, warnings) = parse_logged("log_level = \"verbose\"");
        assert_eq!(settings.log_level(), DEFAULT_LOG_LEVEL);
        assert!(warnings[0].contains("'log_level'"));

        let (settings, warnings) = parse_logged("project_name = 1");
        assert_eq!(settings.project_name(), DEFAULT_PROJECT_NAME);
        assert!(warnings[0].contains("expected a string, found integer"));

        let (settings, warnings) = parse_logged("app = 3\nui = \"x\"");
        assert!(settings.app().is_empty());
        assert_eq!(settings.ui(), &default_ui());
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_bad_whisper_field_falls_back_alone() {
        let (settings, warnings) = parse_logged("[whisper]\nmodel_size = 3\ndevice = \"cuda\"\n");

        assert_eq!(settings.whisper().model_size, DEFAULT_WHISPER_MODEL_SIZE);
        assert_eq!(settings.whisper().device, "cuda");
        assert_eq!(settings.whisper().compute_type, DEFAULT_WHISPER_COMPUTE_TYPE);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'whisper.model_size'"));
    }

    #[test]
    fn test_valid_file_logs_no_warnings() {
        let (_, warnings) = parse_logged("listen_port = 9000\n[whisper]\ndevice = \"CPU\"\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unresolvable_listen_host_is_invalid() {
        let settings = parse("listen_host = \"no such host\"");
        let err = settings.listen_addr().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "listen_host"));
    }

    #[test]
    fn test_from_secrets_uses_fixed_layout() {
        let store: MemorySecretStore = [
            (PEXELS_API_KEY, "px-secret"),
            (WHISPER_DEVICE, "CUDA"),
            (OLLAMA_BASE_URL, "http://ollama:11434"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_secrets(&store, "cloud-host");

        assert_eq!(settings.source(), &SettingsSource::Secrets("memory".to_string()));
        assert_eq!(settings.pexels_api_keys(), vec!["px-secret"]);
        assert!(settings.pixabay_api_keys().is_empty());
        assert_eq!(settings.video_source(), "pexels");
        assert_eq!(settings.ollama_base_url(), "http://ollama:11434");
        assert_eq!(settings.ollama_model_name(), "");
        assert_eq!(settings.whisper().device, "CUDA");
        assert_eq!(settings.whisper().model_size, "large-v3");
        assert_eq!(settings.whisper_section().get_str("device"), Some("CUDA"));
        assert!(!settings.hide_log());
        assert!(settings.proxy().is_empty());
        assert!(settings.azure().is_empty());
        assert!(settings.siliconflow().is_empty());
        assert_eq!(settings.listen_port(), DEFAULT_LISTEN_PORT);
        assert_eq!(settings.hostname(), "cloud-host");
        assert!(settings.tool_environment().is_empty());
    }

    #[test]
    fn test_proxy_and_listen_addr() {
        let settings = parse(
            r#"
listen_host = "127.0.0.1"
listen_port = 8502

[proxy]
http = "http://127.0.0.1:7890"
https = ""
"#,
        );

        assert_eq!(settings.proxy_url("http"), Some("http://127.0.0.1:7890"));
        assert_eq!(settings.proxy_url("https"), None);
        assert_eq!(
            settings.listen_addr().unwrap(),
            "127.0.0.1:8502".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_save_and_reparse_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let original = parse(
            r#"
log_level = "WARNING"
listen_port = 8888
project_name = "Clips"

[app]
video_source = "local"
pexels_api_keys = ["a", "b"]

[azure]
speech_region = "eastasia"
"#,
        );
        original.save_to(&path).unwrap();

        let table: Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let reloaded =
            Settings::from_table(table, "other-host", SettingsSource::File(path), &NoOpLogger);

        assert_eq!(reloaded.log_level(), LogLevel::Warn);
        assert_eq!(reloaded.listen_port(), 8888);
        assert_eq!(reloaded.project_name(), "Clips");
        assert_eq!(reloaded.project_version(), original.project_version());
        assert_eq!(reloaded.sections(), original.sections());
        assert_eq!(reloaded.whisper(), original.whisper());
        assert_ne!(reloaded.hostname(), original.hostname());
    }

    #[test]
    fn test_default_matches_empty_file() {
        let from_file = parse("");
        let default = Settings::default();
        assert_eq!(default.sections(), from_file.sections());
        assert_eq!(default.to_table(), from_file.to_table());
    }
}
