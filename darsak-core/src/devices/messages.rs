use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language for user-facing device messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar", alias = "arabic")]
    Arabic,
    #[serde(rename = "en", alias = "english")]
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Arabic),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Arabic => f.write_str("ar"),
            Locale::English => f.write_str("en"),
        }
    }
}

/// Message shown when a login is refused because every slot is taken.
pub fn device_limit_message(locale: Locale, max_devices: usize) -> String {
    match locale {
        Locale::Arabic => format!(
            "لقد وصلت إلى الحد الأقصى لعدد الأجهزة المسموح بها ({max_devices}). \
             يرجى تسجيل الخروج من جهاز آخر ثم المحاولة مرة أخرى."
        ),
        Locale::English => format!(
            "You have reached the maximum number of devices ({max_devices}). \
             Please sign out from another device and try again."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_locale_names() {
        assert_eq!("ar".parse::<Locale>(), Ok(Locale::Arabic));
        assert_eq!("English".parse::<Locale>(), Ok(Locale::English));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn serialized_form_matches_display() {
        for locale in [Locale::Arabic, Locale::English] {
            let json = serde_json::to_value(locale).unwrap();
            assert_eq!(json, serde_json::json!(locale.to_string()));
        }
        let long: Locale = serde_json::from_str("\"arabic\"").unwrap();
        assert_eq!(long, Locale::Arabic);
    }

    #[test]
    fn message_mentions_the_cap() {
        assert!(device_limit_message(Locale::Arabic, 2).contains("(2)"));
        assert!(device_limit_message(Locale::English, 3).contains("(3)"));
    }
}
