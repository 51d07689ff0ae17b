//! Logged-in Backloggery session.

use tokio::time::Duration;

use crate::client::{self, join_url};
use crate::credentials::Credentials;
use crate::error::SyncError;
use crate::settings::Settings;

pub(crate) const LOGIN_PATH: &str = "/!/login";

/// An authenticated Backloggery session. Owns the cookie store; dropping it
/// ends the session.
#[derive(Debug)]
pub struct BackloggerySession {
    http: reqwest::Client,
    base_url: String,
    login_url: reqwest::Url,
    username: String,
}

impl BackloggerySession {
    /// Log in with `credentials`, consuming them.
    ///
    /// Login succeeds iff the form submission ends on a page other than the
    /// login page within `settings.login_timeout`. Staying put or running
    /// out of time is an [`SyncError::Auth`].
    pub async fn login(settings: &Settings, credentials: Credentials) -> Result<Self, SyncError> {
        let http = client::build_client(true)?;
        let login_url = reqwest::Url::parse(&join_url(&settings.backloggery_url, LOGIN_PATH))
            .map_err(|e| SyncError::Config(format!("Invalid Backloggery URL: {e}")))?;

        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password()),
            ("submit", "Log In"),
        ];
        let submit = http.post(login_url.clone()).form(&form).send();

        let landed = match tokio::time::timeout(settings.login_timeout, submit).await {
            Ok(Ok(resp)) => resp.url().clone(),
            Ok(Err(e)) => {
                return Err(SyncError::network(format!("login request failed: {e}")));
            }
            Err(_) => {
                return Err(SyncError::auth(format!(
                    "still on the login page after {}",
                    format_wait(settings.login_timeout)
                )));
            }
        };

        if same_page(&landed, &login_url) {
            return Err(SyncError::auth("credentials rejected"));
        }

        log::debug!(
            "Logged in to Backloggery as {} (landed on {})",
            credentials.username,
            landed
        );

        Ok(Self {
            http,
            base_url: settings.backloggery_url.clone(),
            login_url,
            username: credentials.username.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Whether a response ended up back on the login page (session lost).
    pub(crate) fn is_login_page(&self, url: &reqwest::Url) -> bool {
        same_page(url, &self.login_url)
    }
}

impl Drop for BackloggerySession {
    fn drop(&mut self) {
        log::debug!("Closing Backloggery session for {}", self.username);
    }
}

/// Compare pages ignoring query string and fragment.
fn same_page(a: &reqwest::Url, b: &reqwest::Url) -> bool {
    a.origin() == b.origin() && a.path().trim_end_matches('/') == b.path().trim_end_matches('/')
}

fn format_wait(d: Duration) -> String {
    if d.as_millis() % 1000 == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}
