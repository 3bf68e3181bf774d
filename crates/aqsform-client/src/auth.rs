//! Bearer credential source.
//!
//! The client never stores or generates credentials; it asks the provider
//! for the current token per request. `None` means the request is sent
//! unauthenticated, since some forms are public.

/// Supplies the current bearer token, if any.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token. Useful for service credentials and tests.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Always unauthenticated.
pub struct NoAuth;

impl TokenProvider for NoAuth {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token_is_returned_verbatim() {
        let provider = StaticToken("abc123".into());
        assert_eq!(provider.bearer_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn no_auth_yields_nothing() {
        assert!(NoAuth.bearer_token().is_none());
    }
}
