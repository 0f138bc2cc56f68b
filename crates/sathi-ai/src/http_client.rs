use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

const DISABLE_SYSTEM_PROXY_ENV: &str = "SATHI_DISABLE_SYSTEM_PROXY";

/// Build the shared HTTP client used by completion providers.
///
/// `timeout` bounds the whole request so a hung endpoint cannot block a reply forever.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if should_disable_system_proxy() {
        builder = builder.no_proxy();
    }
    Ok(builder.build()?)
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}
