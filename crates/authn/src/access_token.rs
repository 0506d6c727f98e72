//! Access-token header parsing.
//!
//! The `Authorization` header value carried by a request is a scheme name
//! and a credentials blob separated by a single ASCII space, for example
//! `Bearer eyJhbGciOi...` or `maydear abc123`. Parsing is purely
//! syntactic; validating the credentials is the schemes' job.

/// A parsed access token: scheme name plus opaque credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    /// Scheme name, e.g. `Bearer`.
    pub scheme: String,
    /// The credentials blob following the scheme.
    pub credentials: String,
}

impl AccessToken {
    /// Parses a raw header value into scheme and credentials.
    ///
    /// The value must consist of exactly two non-empty tokens separated by
    /// a single ASCII space. Anything else — a bare token, leading or
    /// trailing spaces, an embedded second space — yields `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use tessera_authn::AccessToken;
    ///
    /// let token = AccessToken::parse("maydear abc123").unwrap();
    /// assert_eq!(token.scheme, "maydear");
    /// assert_eq!(token.credentials, "abc123");
    ///
    /// assert!(AccessToken::parse("abc123").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (scheme, credentials) = value.split_once(' ')?;
        if scheme.is_empty() || credentials.is_empty() || credentials.contains(' ') {
            return None;
        }
        Some(Self { scheme: scheme.to_owned(), credentials: credentials.to_owned() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_tokens() {
        let token = AccessToken::parse("Bearer eyJhbGciOiJIUzI1NiJ9.e30.sig").unwrap();
        assert_eq!(token.scheme, "Bearer");
        assert_eq!(token.credentials, "eyJhbGciOiJIUzI1NiJ9.e30.sig");
    }

    #[test]
    fn test_parse_custom_scheme() {
        let token = AccessToken::parse("maydear abc123").unwrap();
        assert_eq!(token.scheme, "maydear");
        assert_eq!(token.credentials, "abc123");
    }

    #[test]
    fn test_rejects_single_token() {
        assert!(AccessToken::parse("abc123").is_none());
    }

    #[test]
    fn test_rejects_empty_and_space_variants() {
        assert!(AccessToken::parse("").is_none());
        assert!(AccessToken::parse(" ").is_none());
        assert!(AccessToken::parse(" abc").is_none());
        assert!(AccessToken::parse("abc ").is_none());
        assert!(AccessToken::parse("a b c").is_none());
        assert!(AccessToken::parse("scheme  creds").is_none());
    }
}
