use cec_domain::constants::{EMBEDDED_MARKER, FALLBACK_BASE};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static FALLBACK: LazyLock<Url> =
    LazyLock::new(|| Url::parse(FALLBACK_BASE).expect("fallback base is a valid absolute URL"));

/// Reasons a candidate endpoint is not navigable.
#[cec_derive::portal_error]
pub enum UrlGuardError {
    #[error("Invalid URL{}: empty candidate", format_context(.context))]
    Empty { context: Option<Cow<'static, str>> },

    #[error("Invalid URL{}: {source}", format_context(.context))]
    Parse { source: url::ParseError, context: Option<Cow<'static, str>> },

    #[error("Invalid URL{}: unsupported scheme `{scheme}`", format_context(.context))]
    UnsupportedScheme { scheme: String, context: Option<Cow<'static, str>> },
}

/// Validates endpoints against the origin of the page that will navigate to them.
///
/// Relative endpoints (the built-in defaults are root-relative) are resolved against that
/// origin, or against `http://localhost` when no usable origin is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGuard {
    base: Url,
}

impl Default for UrlGuard {
    fn default() -> Self {
        Self { base: FALLBACK.clone() }
    }
}

impl UrlGuard {
    /// Guard resolving against `origin`. An absent origin, or one that cannot serve as a
    /// base, selects the fallback base.
    #[must_use]
    pub fn new(origin: Option<&str>) -> Self {
        let Some(origin) = origin.filter(|o| !o.is_empty()) else {
            return Self::default();
        };
        match Url::parse(origin) {
            Ok(base) if !base.cannot_be_a_base() => Self { base },
            Ok(_) => {
                debug!(origin, "Origin cannot be used as a base, using fallback");
                Self::default()
            },
            Err(err) => {
                debug!(origin, error = %err, "Unparseable origin, using fallback");
                Self::default()
            },
        }
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves `candidate` and requires an `http` or `https` scheme.
    ///
    /// # Errors
    /// [`UrlGuardError`] describing why the candidate is rejected.
    pub fn check(&self, candidate: &str) -> Result<Url, UrlGuardError> {
        if candidate.is_empty() {
            return Err(UrlGuardError::Empty { context: None });
        }

        let url = Url::options().base_url(Some(&self.base)).parse(candidate)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(UrlGuardError::UnsupportedScheme { scheme: other.to_owned(), context: None }),
        }
    }

    /// True when `candidate` resolves to an absolute `http`/`https` URL.
    /// `None` and the empty string are never valid.
    pub fn is_valid_http_url<'a>(&self, candidate: impl Into<Option<&'a str>>) -> bool {
        candidate.into().is_some_and(|c| self.check(c).is_ok())
    }
}

/// Appends the embedding marker as a query parameter.
///
/// Plain string append: existing parameters are left byte-for-byte untouched, a fragment is
/// not moved, and applying it twice appends the marker twice.
#[must_use]
pub fn with_embedded_flag(candidate: &str) -> String {
    let separator = if candidate.contains('?') { '&' } else { '?' };
    let mut out = String::with_capacity(candidate.len() + 1 + EMBEDDED_MARKER.len());
    out.push_str(candidate);
    out.push(separator);
    out.push_str(EMBEDDED_MARKER);
    out
}
