use shelf_sync_core::Game;

/// Errors that can abort a sync run.
///
/// None of these are retried: the first one ends the run, and games already
/// added before it stay added.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad status, unparseable body, or a pagination ceiling was hit.
    #[error("Network error: {0}")]
    Network(String),

    /// Login did not leave the login page in time.
    #[error("Login failed: {0}")]
    Auth(String),

    /// An add-game submission did not go through. `index` is the position in
    /// the batch, which is also how many games were added before it.
    #[error("Failed to add game #{} ({game}): {reason}", .index + 1)]
    Submission {
        index: usize,
        game: Box<Game>,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub(crate) fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub(crate) fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub(crate) fn submission(index: usize, game: &Game, reason: impl Into<String>) -> Self {
        Self::Submission {
            index,
            game: Box::new(game.clone()),
            reason: reason.into(),
        }
    }

    /// Transport, status, and parse failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Json(_) | Self::Network(_))
    }

    /// Number of games that made it in before a submission failure.
    pub fn added_before_failure(&self) -> Option<usize> {
        match self {
            Self::Submission { index, .. } => Some(*index),
            _ => None,
        }
    }
}
