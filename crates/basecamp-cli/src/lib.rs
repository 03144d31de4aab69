use basecamp_browser::{BrowserRoot, StoreLocator};
use basecamp_core::settings::{default_config_path, default_output_path};
use basecamp_core::{NoopNotifier, Notifier, Result, Settings, SignalNotifier, WidgetSignal};
use clap::Args;
use std::path::PathBuf;

pub mod commands;

/// Overrides shared by every subcommand
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalOptions {
    /// Path of the config file written by `setup`
    #[arg(long, global = true, value_name = "PATH", env = "WAYBAR_BASECAMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path of the status file read by Waybar
    #[arg(long, global = true, value_name = "PATH", env = "WAYBAR_BASECAMP_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Service base URL
    #[arg(long, global = true, hide = true, env = "WAYBAR_BASECAMP_BASE_URL")]
    pub base_url: Option<String>,

    /// Search this browser user-data directory instead of the system ones
    #[arg(long, global = true, hide = true, value_name = "PATH", env = "WAYBAR_BASECAMP_BROWSER_ROOT")]
    pub browser_root: Option<PathBuf>,

    /// Browser "Safe Storage" password for encrypted cookies
    #[arg(
        long,
        global = true,
        hide = true,
        hide_env_values = true,
        env = "WAYBAR_BASECAMP_SAFE_STORAGE"
    )]
    pub safe_storage_password: Option<String>,

    /// Do not signal the status bar after publishing
    #[arg(long, global = true, hide = true, env = "WAYBAR_BASECAMP_NO_SIGNAL")]
    pub no_signal: bool,
}

impl GlobalOptions {
    /// The user's config directory is only consulted without `--config`
    pub fn settings(&self) -> Result<Settings> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };

        let mut settings = Settings::new(config_path)?
            .with_output_path(self.output_path())
            .with_safe_storage_password(self.safe_storage_password.clone());

        if let Some(url) = &self.base_url {
            settings = settings.with_base_url(url.clone());
        }

        Ok(settings)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(default_output_path)
    }

    pub fn notifier(&self) -> Box<dyn Notifier> {
        if self.no_signal {
            Box::new(NoopNotifier)
        } else {
            Box::new(SignalNotifier::new(WidgetSignal::default()))
        }
    }

    pub fn locator(&self) -> StoreLocator {
        match &self.browser_root {
            Some(root) => StoreLocator::new(vec![BrowserRoot::new("Chrome", root.clone())]),
            None => StoreLocator::system(),
        }
    }
}
