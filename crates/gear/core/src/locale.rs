//! Display locales and localized strings.
//!
//! Locale is always passed explicitly to display code. Scoring and search never
//! look at names except for the name-based forbid/force lists, which compare
//! against the locale the caller configured.

/// Supported display locales.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
    Pt,
}

/// A string available in up to four locales.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalizedText {
    pub en: Option<String>,
    pub fr: Option<String>,
    pub es: Option<String>,
    pub pt: Option<String>,
}

impl LocalizedText {
    /// Same text for every locale.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: Some(text.clone()),
            fr: Some(text.clone()),
            es: Some(text.clone()),
            pt: Some(text),
        }
    }

    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Fr => self.fr.as_deref(),
            Locale::Es => self.es.as_deref(),
            Locale::Pt => self.pt.as_deref(),
        }
    }

    pub fn set(&mut self, locale: Locale, text: impl Into<String>) {
        let slot = match locale {
            Locale::En => &mut self.en,
            Locale::Fr => &mut self.fr,
            Locale::Es => &mut self.es,
            Locale::Pt => &mut self.pt,
        };
        *slot = Some(text.into());
    }

    /// True when no locale carries text.
    pub fn is_empty(&self) -> bool {
        self.en.is_none() && self.fr.is_none() && self.es.is_none() && self.pt.is_none()
    }
}
