//! Locale string parsing for `lang[_COUNTRY[_variant]]` identifiers.

use crate::error::{CoreError, CoreResult};

/// A parsed locale identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSpec {
    /// Two-letter lowercase language code.
    pub language: String,
    /// Two-letter uppercase country code, if present.
    pub country: Option<String>,
    /// Free-form variant, if present.
    pub variant: Option<String>,
}

impl std::fmt::Display for LocaleSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{variant}")?;
        }
        Ok(())
    }
}

/// ## Summary
/// Parses a locale identifier of the form `lang`, `lang_COUNTRY` or
/// `lang_COUNTRY_variant`.
///
/// ## Errors
/// Returns `CoreError::InvalidLocale` if the language is not two ASCII
/// letters or the country field is present but not two ASCII letters.
pub fn parse_locale(s: &str) -> CoreResult<LocaleSpec> {
    let mut parts = s.splitn(3, '_');

    let language = parts.next().unwrap_or_default();
    if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::InvalidLocale(format!(
            "bad language field in {s:?}"
        )));
    }

    let country = match parts.next() {
        None => None,
        Some(c) => {
            if c.len() != 2 || !c.chars().all(|ch| ch.is_ascii_alphabetic()) {
                return Err(CoreError::InvalidLocale(format!(
                    "bad country field in {s:?}"
                )));
            }
            Some(c.to_ascii_uppercase())
        }
    };

    let variant = parts.next().filter(|v| !v.is_empty()).map(str::to_owned);

    Ok(LocaleSpec {
        language: language.to_ascii_lowercase(),
        country,
        variant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_only() {
        let locale = parse_locale("en").expect("valid");
        assert_eq!(locale.language, "en");
        assert_eq!(locale.country, None);
        assert_eq!(locale.variant, None);
    }

    #[test]
    fn test_language_country() {
        let locale = parse_locale("en_US").expect("valid");
        assert_eq!(locale.language, "en");
        assert_eq!(locale.country.as_deref(), Some("US"));
    }

    #[test]
    fn test_full_locale_round_trips() {
        let locale = parse_locale("en_US_POSIX").expect("valid");
        assert_eq!(locale.variant.as_deref(), Some("POSIX"));
        assert_eq!(locale.to_string(), "en_US_POSIX");
    }

    #[test]
    fn test_case_normalized() {
        let locale = parse_locale("EN_us").expect("valid");
        assert_eq!(locale.language, "en");
        assert_eq!(locale.country.as_deref(), Some("US"));
    }

    #[test]
    fn test_invalid_language() {
        assert!(parse_locale("").is_err());
        assert!(parse_locale("e").is_err());
        assert!(parse_locale("eng").is_err());
        assert!(parse_locale("e1").is_err());
    }

    #[test]
    fn test_invalid_country() {
        assert!(parse_locale("en_USA").is_err());
        assert!(parse_locale("en_u").is_err());
    }
}
