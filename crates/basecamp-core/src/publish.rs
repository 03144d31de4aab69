use crate::Result;
use crate::settings::WidgetSignal;
use crate::status::StatusRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tells the status-bar widget that a new record is available
pub trait Notifier {
    fn notify(&self) -> std::io::Result<()>;
}

/// Sends `SIGRTMIN+n` to the widget process by name via `pkill`
pub struct SignalNotifier {
    signal: WidgetSignal,
}

impl SignalNotifier {
    pub fn new(signal: WidgetSignal) -> Self {
        Self { signal }
    }

    /// `pkill -RTMIN+n -x <process>`
    ///
    /// The name must match exactly: a plain pattern would also hit
    /// `waybar-basecamp` itself.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new("pkill");
        cmd.arg(format!("-RTMIN+{}", self.signal.rt_offset))
            .arg("-x")
            .arg(&self.signal.process_name);
        cmd
    }
}

impl Notifier for SignalNotifier {
    fn notify(&self) -> std::io::Result<()> {
        let status = self.command().status()?;

        // pkill exits 1 when no process matched
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "pkill exited with {} for '{}'",
                status, self.signal.process_name
            )));
        }
        Ok(())
    }
}

/// Does nothing; for tests and headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self) -> std::io::Result<()> {
        (**self).notify()
    }
}

/// Writes the status record where the widget reads it
pub struct Publisher<N: Notifier> {
    output_path: PathBuf,
    notifier: N,
}

impl<N: Notifier> Publisher<N> {
    pub fn new(output_path: PathBuf, notifier: N) -> Self {
        Self {
            output_path,
            notifier,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Replace the output file with `record`, then poke the widget
    ///
    /// Only the write can fail; notification problems are logged and dropped.
    pub fn publish(&self, record: &StatusRecord) -> Result<()> {
        let json = record.to_json()?;
        self.write_atomic(json.as_bytes())?;

        tracing::debug!(
            "Published {:?} status to {}",
            record.class,
            self.output_path.display()
        );

        if let Err(e) = self.notifier.notify() {
            tracing::debug!("Widget refresh not delivered: {}", e);
        }

        Ok(())
    }

    /// Write to a temp file beside the target and rename it into place
    fn write_atomic(&self, contents: &[u8]) -> Result<()> {
        let dir = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(contents)?;
        temp.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }

        temp.persist(&self.output_path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NotificationCount;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingNotifier {
        calls: Cell<usize>,
        fail: bool,
    }

    impl Notifier for &CountingNotifier {
        fn notify(&self) -> std::io::Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(std::io::Error::other("no widget"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_signal_command_matches_process_name_exactly() {
        let notifier = SignalNotifier::new(WidgetSignal::default());
        let cmd = notifier.command();

        assert_eq!(cmd.get_program(), "pkill");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["-RTMIN+8", "-x", "waybar"]);
    }

    #[test]
    fn test_signal_command_follows_widget_settings() {
        let notifier = SignalNotifier::new(WidgetSignal {
            process_name: "yambar".to_string(),
            rt_offset: 3,
        });
        let command = notifier.command();
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["-RTMIN+3", "-x", "yambar"]);
    }

    #[test]
    fn test_boxed_notifier_delegates() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CountingNotifier::default();
        let boxed: Box<dyn Notifier + '_> = Box::new(&notifier);
        let publisher = Publisher::new(dir.path().join("status.json"), boxed);

        publisher.publish(&StatusRecord::failed()).unwrap();
        assert_eq!(notifier.calls.get(), 1);
    }

    #[test]
    fn test_publish_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        std::fs::write(&path, "a much longer previous content that must disappear entirely").unwrap();

        let publisher = Publisher::new(path.clone(), NoopNotifier);
        publisher
            .publish(&StatusRecord::from_count(NotificationCount::new(2)))
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{"text":"2","alt":"2","tooltip":"2 Unread Notifications","class":"unread"}"#
        );
    }

    #[test]
    fn test_publish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        let publisher = Publisher::new(path.clone(), NoopNotifier);
        let record = StatusRecord::from_count(NotificationCount::new(0));

        publisher.publish(&record).unwrap();
        let first = std::fs::read(&path).unwrap();
        publisher.publish(&record).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_notifier_called_after_write() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CountingNotifier::default();
        let publisher = Publisher::new(dir.path().join("status.json"), &notifier);

        publisher.publish(&StatusRecord::failed()).unwrap();
        assert_eq!(notifier.calls.get(), 1);
    }

    #[test]
    fn test_notifier_failure_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        let notifier = CountingNotifier {
            fail: true,
            ..Default::default()
        };
        let publisher = Publisher::new(path.clone(), &notifier);

        assert!(publisher.publish(&StatusRecord::failed()).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_location_fails_without_notifying() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = CountingNotifier::default();
        let publisher = Publisher::new(dir.path().join("missing").join("status.json"), &notifier);

        assert!(publisher.publish(&StatusRecord::failed()).is_err());
        assert_eq!(notifier.calls.get(), 0);
    }
}
