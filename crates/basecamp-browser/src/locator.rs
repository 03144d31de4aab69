use crate::{Error, Result};
use std::cmp::Ordering;
use std::path::PathBuf;

/// A browser user-data directory holding one sub-directory per profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRoot {
    pub label: String,
    pub path: PathBuf,
}

impl BrowserRoot {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// One discovered cookie database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieStoreRef {
    pub path: PathBuf,
    pub browser: String,
}

impl CookieStoreRef {
    fn is_cookies_file(&self) -> bool {
        self.path.file_name().is_some_and(|n| n == "Cookies")
    }

    fn mentions_profile(&self, profile: &str) -> bool {
        self.path.to_string_lossy().contains(profile)
    }

    fn has_profile_component(&self, profile: &str) -> bool {
        self.path.components().any(|c| c.as_os_str() == profile)
    }

    /// Whether the store belongs to Chrome or Chromium proper
    pub fn is_chrome(&self) -> bool {
        self.browser.contains("hrome") || self.browser.contains("hromium")
    }
}

/// Locates Chromium-family cookie databases on the system
pub struct StoreLocator {
    roots: Vec<BrowserRoot>,
}

impl StoreLocator {
    /// Search the given browser roots instead of the platform defaults
    pub fn new(roots: Vec<BrowserRoot>) -> Self {
        Self { roots }
    }

    /// Search the platform's default browser locations
    pub fn system() -> Self {
        Self::new(Self::default_roots())
    }

    pub fn roots(&self) -> &[BrowserRoot] {
        &self.roots
    }

    /// Enumerate every cookie database under the configured roots
    ///
    /// Both `<profile>/Cookies` and the newer `<profile>/Network/Cookies`
    /// layouts are found. The result is sorted by path.
    pub fn find_stores(&self) -> Vec<CookieStoreRef> {
        let mut stores = Vec::new();

        for root in &self.roots {
            if !root.path.is_dir() {
                continue;
            }

            let Some(root_str) = root.path.to_str() else {
                tracing::debug!("Skipping non UTF-8 browser root: {}", root.path.display());
                continue;
            };
            let escaped = glob::Pattern::escape(root_str);

            for layout in ["*/Cookies", "*/Network/Cookies"] {
                let pattern = format!("{}/{}", escaped, layout);
                let paths = match glob::glob(&pattern) {
                    Ok(paths) => paths,
                    Err(e) => {
                        tracing::debug!("Bad glob pattern {}: {}", pattern, e);
                        continue;
                    }
                };

                for entry in paths {
                    match entry {
                        Ok(path) => stores.push(CookieStoreRef {
                            path,
                            browser: root.label.clone(),
                        }),
                        Err(e) => tracing::debug!("Unreadable path while scanning: {}", e),
                    }
                }
            }
        }

        stores.sort_by(|a, b| a.path.cmp(&b.path));
        stores.dedup_by(|a, b| a.path == b.path);

        tracing::debug!("Found {} cookie stores", stores.len());
        stores
    }

    /// Pick the store for `profile`
    ///
    /// A candidate's path must contain the profile name, end in a `Cookies`
    /// file and exist right now. Paths with a component equal to the profile
    /// name beat plain substring matches (`Profile 1` over `Profile 10`);
    /// remaining ties go to the lexicographically first path.
    pub fn select_store(stores: &[CookieStoreRef], profile: &str) -> Result<CookieStoreRef> {
        stores
            .iter()
            .filter(|s| s.mentions_profile(profile))
            .filter(|s| s.is_cookies_file())
            .filter(|s| s.path.is_file())
            .min_by(|a, b| {
                let rank_a = !a.has_profile_component(profile);
                let rank_b = !b.has_profile_component(profile);
                match rank_a.cmp(&rank_b) {
                    Ordering::Equal => a.path.cmp(&b.path),
                    other => other,
                }
            })
            .cloned()
            .ok_or_else(|| Error::StoreNotFound(profile.to_string()))
    }

    /// Discover stores and select the one for `profile`
    pub fn locate(&self, profile: &str) -> Result<CookieStoreRef> {
        let store = Self::select_store(&self.find_stores(), profile)?;
        tracing::info!(
            "Using {} cookie store: {}",
            store.browser,
            store.path.display()
        );
        Ok(store)
    }

    /// Platform-specific Chromium-family user-data directories
    fn default_roots() -> Vec<BrowserRoot> {
        #[cfg(target_os = "linux")]
        let (base, layout): (Option<PathBuf>, &[(&str, &str)]) = (
            dirs::config_dir(),
            &[
                ("Chrome", "google-chrome"),
                ("Chrome Beta", "google-chrome-beta"),
                ("Chromium", "chromium"),
                ("Brave", "BraveSoftware/Brave-Browser"),
                ("Edge", "microsoft-edge"),
                ("Vivaldi", "vivaldi"),
            ],
        );

        #[cfg(target_os = "macos")]
        let (base, layout): (Option<PathBuf>, &[(&str, &str)]) = (
            dirs::config_dir(),
            &[
                ("Chrome", "Google/Chrome"),
                ("Chrome Beta", "Google/Chrome Beta"),
                ("Chromium", "Chromium"),
                ("Brave", "BraveSoftware/Brave-Browser"),
                ("Edge", "Microsoft Edge"),
                ("Vivaldi", "Vivaldi"),
            ],
        );

        #[cfg(target_os = "windows")]
        let (base, layout): (Option<PathBuf>, &[(&str, &str)]) = (
            dirs::data_local_dir(),
            &[
                ("Chrome", r"Google\Chrome\User Data"),
                ("Chromium", r"Chromium\User Data"),
                ("Brave", r"BraveSoftware\Brave-Browser\User Data"),
                ("Edge", r"Microsoft\Edge\User Data"),
                ("Vivaldi", r"Vivaldi\User Data"),
            ],
        );

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let (base, layout): (Option<PathBuf>, &[(&str, &str)]) = (None, &[]);

        match base {
            Some(base) => layout
                .iter()
                .map(|(label, dir)| BrowserRoot::new(*label, base.join(dir)))
                .collect(),
            None => Vec::new(),
        }
    }
}
