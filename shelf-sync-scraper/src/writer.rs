//! Adding games to Backloggery through the add-game form.
//!
//! The form page is loaded once per batch; each game is then a single
//! "Stealth Save" submission (adds without posting to the activity feed),
//! followed by a fixed pause. The first failed submission ends the batch.

use shelf_sync_core::Game;
use tokio::time::Duration;

use crate::client;
use crate::error::SyncError;
use crate::html::{self, SelectOption};
use crate::session::BackloggerySession;
use crate::settings::Settings;

const ADD_PATH: &str = "/!/add";
const STEALTH_SAVE: &str = "Stealth Save";

/// Console and region choices offered by the add-game form.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub consoles: Vec<SelectOption>,
    pub regions: Vec<SelectOption>,
}

impl AddForm {
    /// Parse the add-game page. Both selects must be present.
    pub fn parse(page: &str) -> Option<Self> {
        Some(Self {
            consoles: html::select_options(page, "console")?,
            regions: html::select_options(page, "region")?,
        })
    }

    /// Option value for a console, matched on value first, then on label.
    pub fn console_value(&self, console: &str) -> Option<&str> {
        self.consoles
            .iter()
            .find(|o| o.value == console)
            .or_else(|| self.consoles.iter().find(|o| o.label == console))
            .map(|o| o.value.as_str())
    }

    pub fn has_region(&self, code: u8) -> bool {
        let code = code.to_string();
        self.regions.iter().any(|o| o.value == code)
    }
}

/// Submits games one at a time with a fixed delay between them.
pub struct GameWriter {
    delay: Duration,
}

impl GameWriter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            delay: settings.submit_delay,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Add every game, returning how many were added.
    pub async fn add_games(
        &self,
        session: &BackloggerySession,
        games: &[Game],
    ) -> Result<usize, SyncError> {
        self.add_games_with_progress(session, games, |_, _| {}).await
    }

    /// Like [`add_games`](Self::add_games), calling `on_added(index, game)`
    /// after each successful submission.
    pub async fn add_games_with_progress(
        &self,
        session: &BackloggerySession,
        games: &[Game],
        mut on_added: impl FnMut(usize, &Game),
    ) -> Result<usize, SyncError> {
        let Some(first) = games.first() else {
            return Ok(0);
        };

        let add_url = session.url(ADD_PATH);
        let form = self
            .open_form(session, &add_url)
            .await
            .map_err(|reason| SyncError::submission(0, first, reason))?;

        for (index, game) in games.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let console = form.console_value(&game.console).ok_or_else(|| {
                SyncError::submission(index, game, "console not offered by the add form")
            })?;
            if !form.has_region(game.region.code()) {
                return Err(SyncError::submission(
                    index,
                    game,
                    format!("region {} not offered by the add form", game.region),
                ));
            }

            let region = game.region.code().to_string();
            let fields = [
                ("name", game.name.as_str()),
                ("console", console),
                ("region", region.as_str()),
                ("submit", STEALTH_SAVE),
            ];

            let resp = session
                .http()
                .post(&add_url)
                .form(&fields)
                .send()
                .await
                .map_err(|e| SyncError::submission(index, game, e.to_string()))?;

            let status = resp.status();
            if session.is_login_page(resp.url()) {
                return Err(SyncError::submission(index, game, "session expired"));
            }
            if !status.is_success() {
                return Err(SyncError::submission(
                    index,
                    game,
                    format!("HTTP {}", status.as_u16()),
                ));
            }

            log::debug!("Stealth-saved {}", game);
            on_added(index, game);
        }

        Ok(games.len())
    }

    /// Load the add-game page and read its selects.
    async fn open_form(
        &self,
        session: &BackloggerySession,
        add_url: &str,
    ) -> Result<AddForm, String> {
        let resp = session
            .http()
            .get(add_url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if session.is_login_page(resp.url()) {
            return Err("session expired before the add form loaded".to_string());
        }

        let page = client::read_body(resp, "add form")
            .await
            .map_err(|e| e.to_string())?;
        AddForm::parse(&page).ok_or_else(|| "add form has no console/region selects".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
    <form method="post">
      <input type="text" name="name">
      <select name="console">
        <option value="">Choose...</option>
        <option value="SNES">Super Nintendo Entertainment System</option>
        <option value="Steam">Steam</option>
      </select>
      <select name="status"><option value="1">Unfinished</option></select>
      <select name="region">
        <option value="2">NA</option>
        <option value="3">Japan</option>
      </select>
      <button name="submit" value="Stealth Save">Stealth Save</button>
    </form>"#;

    #[test]
    fn form_parses_both_selects() {
        let form = AddForm::parse(FORM).unwrap();
        assert_eq!(form.consoles.len(), 3);
        assert_eq!(form.regions.len(), 2);
    }

    #[test]
    fn console_matches_value_or_label() {
        let form = AddForm::parse(FORM).unwrap();
        assert_eq!(
            form.console_value("Super Nintendo Entertainment System"),
            Some("SNES")
        );
        assert_eq!(form.console_value("Steam"), Some("Steam"));
        assert_eq!(form.console_value("Atari Jaguar"), None);
    }

    #[test]
    fn region_lookup_by_code() {
        let form = AddForm::parse(FORM).unwrap();
        assert!(form.has_region(2));
        assert!(!form.has_region(4));
    }

    #[test]
    fn form_without_region_select_is_rejected() {
        assert!(AddForm::parse("<select name=\"console\"></select>").is_none());
    }
}
