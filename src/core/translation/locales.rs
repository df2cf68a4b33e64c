//! Configured locale set
//!
//! The set of locales the deployment maintains translations for. The
//! mutation service computes fan-out targets from it; the pipeline filters
//! defensively on its own.

use crate::domain::{KartotekaError, Locale, Result};

/// Locales maintained by the deployment, in configuration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet(Vec<Locale>);

impl LocaleSet {
    /// Builds a locale set from configured codes
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a code is invalid, the set is
    /// empty, or a code appears twice.
    pub fn from_codes<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut locales = Vec::new();
        for code in codes {
            let locale = Locale::new(code.as_ref())
                .map_err(KartotekaError::Configuration)?;
            if locales.contains(&locale) {
                return Err(KartotekaError::Configuration(format!(
                    "Duplicate locale in configured set: {locale}"
                )));
            }
            locales.push(locale);
        }
        if locales.is_empty() {
            return Err(KartotekaError::Configuration(
                "Configured locale set must not be empty".to_string(),
            ));
        }
        Ok(Self(locales))
    }

    /// All locales in the set
    pub fn all(&self) -> &[Locale] {
        &self.0
    }

    /// Whether the set contains the given locale
    pub fn contains(&self, locale: &Locale) -> bool {
        self.0.contains(locale)
    }

    /// Fan-out targets for a source locale: the full set minus the source
    pub fn targets_excluding(&self, source: &Locale) -> Vec<Locale> {
        self.0.iter().filter(|l| *l != source).cloned().collect()
    }
}

impl Default for LocaleSet {
    /// The locales the hospital dashboard ships with
    fn default() -> Self {
        Self(vec![
            Locale::new("en").expect("static locale"),
            Locale::new("sr-Latn").expect("static locale"),
            Locale::new("ru").expect("static locale"),
        ])
    }
}
