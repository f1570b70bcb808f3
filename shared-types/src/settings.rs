use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseSettingError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseSettingError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    #[default]
    Usd,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Gbp => "British Pound",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSettingError::new("currency", s))
    }
}

/// Number-format locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[serde(rename = "de-DE")]
    DeDe,
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::DeDe, Locale::EnUs, Locale::EnGb];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::DeDe => "de-DE",
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locale::DeDe => "German",
            Locale::EnUs => "English (US)",
            Locale::EnGb => "English (UK)",
        }
    }

    /// Grouping and decimal separators
    pub fn separators(&self) -> (char, char) {
        match self {
            Locale::DeDe => ('.', ','),
            Locale::EnUs | Locale::EnGb => (',', '.'),
        }
    }

    /// Whether the currency symbol follows the amount
    pub fn symbol_after(&self) -> bool {
        matches!(self, Locale::DeDe)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSettingError::new("locale", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DateFormat {
    #[serde(rename = "dd/MM/yyyy")]
    DayMonthYear,
    #[default]
    #[serde(rename = "MM/dd/yyyy")]
    MonthDayYear,
    #[serde(rename = "yyyy-MM-dd")]
    Iso,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [
        DateFormat::DayMonthYear,
        DateFormat::MonthDayYear,
        DateFormat::Iso,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "dd/MM/yyyy",
            DateFormat::MonthDayYear => "MM/dd/yyyy",
            DateFormat::Iso => "yyyy-MM-dd",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
        }
    }

    /// chrono format string
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DateFormat {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DateFormat::ALL
            .into_iter()
            .find(|f| f.code() == wanted || f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSettingError::new("date format", s))
    }
}

/// Display preferences shared by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub currency: Currency,
    pub locale: Locale,
    pub date_format: DateFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_wire_format() {
        let settings = DisplaySettings {
            currency: Currency::Eur,
            locale: Locale::DeDe,
            date_format: DateFormat::DayMonthYear,
        };
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currency": "EUR",
                "locale": "de-DE",
                "dateFormat": "dd/MM/yyyy"
            })
        );
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: DisplaySettings = serde_json::from_str(r#"{"currency": "GBP"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Gbp);
        assert_eq!(settings.locale, Locale::EnUs);
        assert_eq!(settings.date_format, DateFormat::MonthDayYear);
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("en-GB".parse::<Locale>().unwrap(), Locale::EnGb);
        assert_eq!("YYYY-MM-DD".parse::<DateFormat>().unwrap(), DateFormat::Iso);
        let err = "JPY".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "unknown currency: \"JPY\"");
    }
}
