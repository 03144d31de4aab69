//! The `setup` command: pick a browser profile and account, save the config.
//!
//! ```bash
//! waybar-basecamp setup
//! ```

use anyhow::{Result, bail};
use basecamp_browser::StoreLocator;
use basecamp_core::Config;
use basecamp_core::config::DEFAULT_PROFILE;
use basecamp_core::settings::Settings;
use console::style;
use std::io::{self, BufRead, Write};

pub fn execute(settings: &Settings, locator: &StoreLocator) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(settings, locator, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Interactive dialogue over arbitrary input/output
pub fn run<R: BufRead, W: Write>(
    settings: &Settings,
    locator: &StoreLocator,
    input: &mut R,
    out: &mut W,
) -> Result<Config> {
    writeln!(out, "{}", style("--- Basecamp Setup ---").bold().cyan())?;
    writeln!(out, "Scanning for browser cookie databases...")?;

    let stores: Vec<_> = locator
        .find_stores()
        .into_iter()
        .filter(|s| s.is_chrome())
        .collect();

    if stores.is_empty() {
        writeln!(
            out,
            "\n{}",
            style("No Chrome or Chromium cookie stores found on this system.").yellow()
        )?;
    } else {
        writeln!(out, "\n{} Found these Cookie Files:", style("[STEP 1]").bold())?;
        for store in &stores {
            writeln!(out, "  - {} ({})", store.path.display(), store.browser)?;
        }
    }

    writeln!(out, "\nLook at the paths above. Identify the unique folder name for your profile.")?;
    writeln!(out, "Examples: 'Profile 1', 'Default', 'Work'")?;
    write!(out, "Enter unique Profile identifier [{}]: ", DEFAULT_PROFILE)?;
    out.flush()?;
    let profile_name = read_line(input)?;

    writeln!(out, "\n{} Enter Account ID", style("[STEP 2]").bold())?;
    writeln!(out, "  (Found in URL: https://3.basecamp.com/YOUR_ID/...)")?;
    write!(out, "Enter ID: ")?;
    out.flush()?;
    let account_id = read_line(input)?;

    if account_id.is_empty() {
        bail!("Account ID is required.");
    }

    let config = Config::new(&account_id, &profile_name)?;

    if StoreLocator::select_store(&stores, &config.profile_name).is_err() {
        writeln!(
            out,
            "\n{} no Chrome cookie store matches '{}' yet; `check` will report an error until it does.",
            style("Warning:").yellow().bold(),
            config.profile_name
        )?;
    }

    config.save(&settings.config_path)?;

    writeln!(
        out,
        "\n{} Saved configuration to {}",
        style("Success!").green().bold(),
        settings.config_path.display()
    )?;

    Ok(config)
}

/// One trimmed line; empty at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basecamp_browser::BrowserRoot;
    use std::io::Cursor;

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings::new(dir.join("cfg").join("data.json")).unwrap()
    }

    fn locator_with_profile(dir: &std::path::Path, profile: &str) -> StoreLocator {
        let root = dir.join("chrome");
        let cookies = root.join(profile).join("Cookies");
        std::fs::create_dir_all(cookies.parent().unwrap()).unwrap();
        std::fs::write(&cookies, b"").unwrap();
        StoreLocator::new(vec![BrowserRoot::new("Chrome", root)])
    }

    #[test]
    fn test_setup_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let locator = locator_with_profile(dir.path(), "Profile 1");

        let mut input = Cursor::new("Profile 1\n4123456\n");
        let mut out = Vec::new();
        let config = run(&settings, &locator, &mut input, &mut out).unwrap();

        assert_eq!(config.profile_name, "Profile 1");
        assert_eq!(config.account_id, "4123456");
        assert_eq!(Config::load(&settings.config_path).unwrap(), config);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Profile 1/Cookies (Chrome)"));
        assert!(printed.contains("Success!"));
        assert!(!printed.contains("Warning:"));
    }

    #[test]
    fn test_blank_profile_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let locator = locator_with_profile(dir.path(), "Default");

        let mut input = Cursor::new("\n77\n");
        let config = run(&settings, &locator, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(config.profile_name, "Default");
    }

    #[test]
    fn test_missing_account_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let locator = StoreLocator::new(vec![]);

        let mut input = Cursor::new("Default\n\n");
        let err = run(&settings, &locator, &mut input, &mut Vec::new()).unwrap_err();

        assert!(err.to_string().contains("Account ID is required"));
        assert!(!settings.config_path.exists());
    }

    #[test]
    fn test_unmatched_profile_warns_but_saves() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let locator = StoreLocator::new(vec![]);

        let mut input = Cursor::new("Work\n5\n");
        let mut out = Vec::new();
        run(&settings, &locator, &mut input, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("No Chrome or Chromium cookie stores found"));
        assert!(printed.contains("Warning:"));
        assert!(settings.config_path.exists());
    }
}
