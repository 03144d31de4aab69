//! The `check` command: one poll of the readings endpoint, one status file.
//!
//! Whatever fails along the way, a status record is always published; the
//! error only changes which record and the process exit code.

use crate::GlobalOptions;
use anyhow::Result;
use basecamp_browser::{
    CookieDecryptor, JarBuilder, KeyringSource, StoreLocator, safe_storage_password,
};
use basecamp_core::{
    Config, NotificationCount, Notifier, Publisher, Settings, StatusRecord, normalize,
};
use basecamp_poller::NotificationPoller;

/// Store lookup, jar, request and normalization wired together
pub struct CheckPipeline {
    locator: StoreLocator,
    jar_builder: JarBuilder,
    poller: NotificationPoller,
}

impl CheckPipeline {
    pub fn new(settings: &Settings, locator: StoreLocator) -> basecamp_core::Result<Self> {
        let password = match &settings.safe_storage_password {
            Some(password) => password.clone(),
            None => safe_storage_password(&KeyringSource),
        };
        let decryptor = CookieDecryptor::new(&password);

        Ok(Self {
            locator,
            jar_builder: JarBuilder::new(settings.cookie_domains.clone(), decryptor),
            poller: NotificationPoller::from_settings(settings)?,
        })
    }

    pub async fn run(&self, config: &Config) -> basecamp_core::Result<NotificationCount> {
        let store = self.locator.locate(&config.profile_name)?;
        let jar = self.jar_builder.build(&store)?;
        if jar.is_empty() {
            tracing::warn!("No session cookies found, the request will likely be rejected");
        }
        let response = self.poller.poll(&jar, &config.account_id).await?;
        normalize(&response.body, response.status)
    }
}

async fn check(settings: &Settings, locator: StoreLocator) -> basecamp_core::Result<NotificationCount> {
    let config = Config::load(&settings.config_path)?;
    let pipeline = CheckPipeline::new(settings, locator)?;
    pipeline.run(&config).await
}

/// Run the pipeline and publish its status, returning the pipeline outcome
pub fn run_and_publish<N: Notifier>(
    settings: &Settings,
    locator: StoreLocator,
    publisher: &Publisher<N>,
) -> basecamp_core::Result<NotificationCount> {
    let outcome = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(check(settings, locator)),
        Err(e) => Err(e.into()),
    };

    publish_outcome(publisher, outcome)
}

/// Publish the record for `outcome` and hand the outcome back
///
/// Failures are only logged at debug level here; the caller reports them.
fn publish_outcome<N: Notifier>(
    publisher: &Publisher<N>,
    outcome: basecamp_core::Result<NotificationCount>,
) -> basecamp_core::Result<NotificationCount> {
    match &outcome {
        Ok(count) => tracing::info!("{} unread notifications", count),
        Err(e) => tracing::debug!("Check failed: {}", e),
    }

    let record = StatusRecord::render(&outcome);
    if let Err(e) = publisher.publish(&record) {
        tracing::error!(
            "Failed to write status to {}: {}",
            publisher.output_path().display(),
            e
        );
    }

    outcome
}

/// Settings problems are check failures too and still publish a record
pub fn execute(options: &GlobalOptions) -> Result<()> {
    let publisher = Publisher::new(options.output_path(), options.notifier());

    match options.settings() {
        Ok(settings) => run_and_publish(&settings, options.locator(), &publisher)?,
        Err(e) => publish_outcome(&publisher, Err(e))?,
    };
    Ok(())
}
