use std::env;

/// Credential verification seam. The dashboard only ever needs a yes/no
/// answer, so the real mechanism (and any future one) hides behind this.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Literal comparison against a single configured pair. This is the demo
/// placeholder the dashboard shipped with, NOT a security boundary: the
/// admin API itself is unauthenticated and the "session" lives in the
/// page. Anyone deploying this beyond a demo must replace the whole
/// login story, not just this struct.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Demo defaults (admin / admin123), overridable via ADMIN_USER and
    /// ADMIN_PASS.
    pub fn from_env() -> Self {
        Self {
            username: env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
            password: env::var("ADMIN_PASS").unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}

impl CredentialCheck for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_pair_only() {
        let check = StaticCredentials::new("admin", "admin123");
        assert!(check.verify("admin", "admin123"));
        assert!(!check.verify("admin", "wrong"));
        assert!(!check.verify("Admin", "admin123"));
        assert!(!check.verify("", ""));
    }
}
