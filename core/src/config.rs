//! Client configuration: where to send requests and how to label them.
//!
//! # Design
//! `Config` is owned by `FhrsClient` and lent to every endpoint service by
//! shared reference. The only mutation after construction is
//! `set_language`, which takes `&mut self`; the borrow checker therefore keeps
//! language changes from overlapping with requests that read the config.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Production endpoint of the FHRS API.
pub const DEFAULT_BASE_URL: &str = "https://api.ratings.food.gov.uk/";

/// API protocol version sent as `x-api-version`.
pub const DEFAULT_API_VERSION: u32 = 2;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Language the API should answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Welsh,
}

impl Language {
    /// Locale tag sent as `Accept-Language`.
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en-GB",
            Language::Welsh => "cy-GB",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts the locale tag, the bare language code or the language name,
/// ignoring ASCII case.
impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en-gb" | "en" | "english" => Ok(Language::English),
            "cy-gb" | "cy" | "welsh" | "cymraeg" => Ok(Language::Welsh),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
    version: u32,
    language: Language,
    timeout: Duration,
}

impl Config {
    /// Build a configuration rooted at `base_url`. A trailing slash is added
    /// when missing so relative endpoint paths resolve beneath it.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |source| Error::InvalidRequest {
            target: base_url.to_string(),
            source,
        };
        let parsed = Url::parse(&normalized).map_err(invalid)?;
        if parsed.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self {
            base_url: parsed,
            version: DEFAULT_API_VERSION,
            language: Language::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Configuration for the production API.
    pub fn production() -> Result<Self, Error> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Switch the response language. On failure the current language is kept.
    pub fn set_language(&mut self, language: &str) -> Result<(), Error> {
        self.language = language.parse()?;
        Ok(())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
