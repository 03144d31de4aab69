use crate::filter::DomainAllowlist;
use std::path::PathBuf;
use std::time::Duration;

pub const APP_DIR: &str = "waybar-basecamp";
pub const CONFIG_FILE: &str = "data.json";
pub const OUTPUT_FILE: &str = "waybar_basecamp.json";
pub const DEFAULT_BASE_URL: &str = "https://3.basecamp.com";
pub const DEFAULT_COOKIE_DOMAINS: &[&str] = &["basecamp.com", "37signals.com"];
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Which process gets the refresh signal, and which real-time signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSignal {
    pub process_name: String,
    /// Offset from SIGRTMIN
    pub rt_offset: u8,
}

impl Default for WidgetSignal {
    fn default() -> Self {
        Self {
            process_name: "waybar".to_string(),
            rt_offset: 8,
        }
    }
}

/// Runtime settings handed to each pipeline stage
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub output_path: PathBuf,
    pub base_url: String,
    pub cookie_domains: DomainAllowlist,
    pub timeout: Duration,
    pub user_agent: String,
    /// Browser "Safe Storage" password used to decrypt cookie values
    pub safe_storage_password: Option<String>,
}

impl Settings {
    /// Defaults around an explicit config file
    pub fn new(config_path: PathBuf) -> crate::Result<Self> {
        Ok(Self {
            config_path,
            output_path: default_output_path(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_domains: DomainAllowlist::new(DEFAULT_COOKIE_DOMAINS)?,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            safe_storage_password: None,
        })
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_cookie_domains(mut self, domains: DomainAllowlist) -> Self {
        self.cookie_domains = domains;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_safe_storage_password(mut self, password: Option<String>) -> Self {
        self.safe_storage_password = password;
        self
    }
}

/// `<user config dir>/waybar-basecamp/data.json`
pub fn default_config_path() -> crate::Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        crate::Error::Config("Could not determine user config directory".to_string())
    })?;
    Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
}

/// `/tmp/waybar_basecamp.json`, the path the bar configuration points at
///
/// Fixed on unix regardless of `TMPDIR`.
pub fn default_output_path() -> PathBuf {
    #[cfg(unix)]
    let dir = PathBuf::from("/tmp");
    #[cfg(not(unix))]
    let dir = std::env::temp_dir();

    dir.join(OUTPUT_FILE)
}
