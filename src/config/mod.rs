#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_header, validate_range, validate_url, Validate};
use std::time::Duration;
use toml_config::FeedConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// 合併 CLI 與設定檔後、實際交給傳輸層的設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl FeedSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            headers: Vec::new(),
            verbose: false,
            json_logs: false,
        }
    }

    /// 設定檔的值優先於命令列
    pub fn merge_file(mut self, file: &FeedConfig) -> Self {
        self.base_url = file.source.base_url.clone();
        if let Some(seconds) = file.source.timeout_seconds {
            self.timeout = Some(Duration::from_secs(seconds));
        }
        self.headers = file.headers();
        self.verbose |= file.verbose();
        self.json_logs |= file.json_logs();
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let settings = Self {
            base_url: cli.base_url.clone(),
            timeout: cli.timeout_seconds.map(Duration::from_secs),
            headers: Vec::new(),
            verbose: cli.verbose,
            json_logs: cli.json_logs,
        };

        match &cli.config {
            Some(path) => {
                let file = FeedConfig::from_file(path)?;
                file.validate()?;
                Ok(settings.merge_file(&file))
            }
            None => Ok(settings),
        }
    }
}

impl ConfigProvider for FeedSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl Validate for FeedSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout_seconds", timeout.as_secs(), 1, 300)?;
        }
        for (name, value) in &self.headers {
            validate_header("headers", name, value)?;
        }
        Ok(())
    }
}
