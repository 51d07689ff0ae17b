use zeroize::Zeroizing;

const ENV_PASSWORD: &str = "BACKLOGGERY_PASSWORD";

/// Backloggery login. The password buffer is wiped when this is dropped,
/// which happens as soon as the session is established or the run aborts.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: String) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password from `$BACKLOGGERY_PASSWORD`, for non-interactive runs.
    pub fn password_from_env() -> Option<String> {
        std::env::var(ENV_PASSWORD).ok().filter(|p| !p.is_empty())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_masks_password() {
        let creds = Credentials::new("shelfie", "hunter2".to_string());
        let shown = format!("{:?}", creds);
        assert!(shown.contains("shelfie"));
        assert!(!shown.contains("hunter2"));
        assert_eq!(creds.password(), "hunter2");
    }
}
