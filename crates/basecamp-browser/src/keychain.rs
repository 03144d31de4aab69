use crate::decrypt::DEFAULT_SAFE_STORAGE_PASSWORD;

/// Keychain entries Chromium browsers store their "Safe Storage" secret under,
/// as `(service, account)`
pub const SAFE_STORAGE_ENTRIES: &[(&str, &str)] = &[
    ("Chrome Safe Storage", "Chrome"),
    ("Chromium Safe Storage", "Chromium"),
];

/// Somewhere a browser secret can be looked up
pub trait PasswordSource {
    fn lookup(&self, service: &str, account: &str) -> Option<String>;
}

/// The platform credential store (Keychain, Secret Service, Credential Manager)
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringSource;

impl PasswordSource for KeyringSource {
    fn lookup(&self, service: &str, account: &str) -> Option<String> {
        let password = keyring::Entry::new(service, account).and_then(|entry| entry.get_password());

        match password {
            Ok(password) => Some(password),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                tracing::debug!("Keyring lookup for '{}' failed: {}", service, e);
                None
            }
        }
    }
}

/// First non-empty Safe Storage secret from `source`, else Chromium's fallback
pub fn safe_storage_password<S: PasswordSource>(source: &S) -> String {
    for (service, account) in SAFE_STORAGE_ENTRIES {
        if let Some(password) = source.lookup(service, account).filter(|p| !p.is_empty()) {
            tracing::debug!("Using safe-storage password from '{}'", service);
            return password;
        }
    }

    tracing::debug!("No safe-storage password in the keyring, using the built-in fallback");
    DEFAULT_SAFE_STORAGE_PASSWORD.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FixedSource(HashMap<(&'static str, &'static str), &'static str>);

    impl PasswordSource for FixedSource {
        fn lookup(&self, service: &str, account: &str) -> Option<String> {
            self.0
                .iter()
                .find(|((s, a), _)| *s == service && *a == account)
                .map(|(_, p)| p.to_string())
        }
    }

    #[test]
    fn test_chrome_entry_preferred() {
        let source = FixedSource(HashMap::from([
            (("Chrome Safe Storage", "Chrome"), "chrome-secret"),
            (("Chromium Safe Storage", "Chromium"), "chromium-secret"),
        ]));
        assert_eq!(safe_storage_password(&source), "chrome-secret");
    }

    #[test]
    fn test_chromium_entry_used_when_chrome_missing() {
        let source = FixedSource(HashMap::from([(
            ("Chromium Safe Storage", "Chromium"),
            "chromium-secret",
        )]));
        assert_eq!(safe_storage_password(&source), "chromium-secret");
    }

    #[test]
    fn test_falls_back_to_builtin_password() {
        assert_eq!(safe_storage_password(&FixedSource::default()), "peanuts");

        let blank = FixedSource(HashMap::from([(("Chrome Safe Storage", "Chrome"), "")]));
        assert_eq!(safe_storage_password(&blank), "peanuts");
    }

    #[test]
    fn test_keyring_password_decrypts_cookie() {
        use crate::decrypt::{CookieDecryptor, encrypt_for_tests};

        let source = FixedSource(HashMap::from([(
            ("Chrome Safe Storage", "Chrome"),
            "from-keychain",
        )]));
        let encrypted = encrypt_for_tests("from-keychain", b"session-value");

        let decryptor = CookieDecryptor::new(&safe_storage_password(&source));
        assert_eq!(decryptor.decrypt(&encrypted, false).unwrap(), "session-value");
    }
}
