//! Sources of the bearer credential attached to every request.
//!
//! The client only reads the credential; storing and refreshing it is the
//! caller's business.

/// Name of the cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accesstoken";

/// Supplies the bearer token for outgoing requests.
pub trait CredentialSource: Send + Sync {
    /// Current access token, if one exists.
    fn access_token(&self) -> Option<String>;
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

/// A fixed token, typically read from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Wrap a token; an empty string counts as no token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self((!token.trim().is_empty()).then_some(token))
    }

    /// No credential at all; requests go out unauthenticated.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the access token out of a `Cookie` header value.
#[derive(Debug, Clone)]
pub struct CookieCredential {
    header: String,
}

impl CookieCredential {
    /// Wrap a raw header such as `theme=dark; accesstoken=abc`.
    ///
    /// The token value is percent-decoded when read.
    #[must_use]
    pub fn from_header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl CredentialSource for CookieCredential {
    fn access_token(&self) -> Option<String> {
        self.header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
            .map(|(_, value)| percent_decode(value.trim_matches('"')))
            .filter(|value| !value.is_empty())
    }
}

/// Decode `%XX` escapes as browsers write them into cookie values.
///
/// Malformed escapes are kept as they are.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| bytes.get(i + 1..i + 3))
            .flatten()
            .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
