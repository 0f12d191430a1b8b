//! Placeholder substitution.
//!
//! Rendering is a pure function of the body, the data record and the
//! renderer's locale. Supplied keys replace every `{{key}}` and
//! `{{key:annotation}}` occurrence; placeholders with no data entry are left
//! verbatim so a partially filled draft still shows what is missing.

use std::borrow::Cow;

use chrono::Locale;
use regex::{NoExpand, Regex};
use tracing::warn;

use super::date::{self, DEFAULT_LOCALE};
use crate::types::Result;

/// Template renderer bound to a date locale
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    locale: Locale,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self { locale }
    }

    /// Build a renderer from a locale name such as `fr_FR`
    pub fn from_locale_name(name: &str) -> Result<Self> {
        Ok(Self::with_locale(date::parse_locale(name)?))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Substitute every supplied value into `body`
    ///
    /// Keys are applied one after another in the iteration order of `data`.
    pub fn render<I, K, V>(&self, body: &str, data: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut content = body.to_string();

        for (key, value) in data {
            let key = key.as_ref();
            if key.is_empty() {
                continue;
            }

            let pattern = match key_pattern(key) {
                Ok(re) => re,
                Err(e) => {
                    warn!("Skipping placeholder '{}': {}", key, e);
                    continue;
                }
            };

            let value = self.format_value(value.as_ref());
            content = pattern
                .replace_all(&content, NoExpand(value.as_ref()))
                .into_owned();
        }

        content
    }

    /// Value as it appears in the rendered text
    ///
    /// ISO dates become long-form localized dates; everything else,
    /// including impossible dates such as `2025-13-45`, is kept as is.
    pub fn format_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match date::localize(value, self.locale) {
            Some(long) => Cow::Owned(long),
            None => Cow::Borrowed(value),
        }
    }
}

/// Render with the default (`fr_FR`) renderer
pub fn render<I, K, V>(body: &str, data: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Renderer::default().render(body, data)
}

/// `{{key}}` or `{{key:...}}`, anchored on both braces
fn key_pattern(key: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"\{{\{{{}(?::[^{{}}]*)?\}}\}}", regex::escape(key)))
}
