use chrono::NaiveDate;
use shared_types::{Currency, DateFormat, DisplaySettings, Locale};

/// Formats a money amount with two fraction digits, grouped and placed
/// according to the display locale.
///
/// ```
/// use crm_client::format::format_currency;
/// use shared_types::DisplaySettings;
///
/// assert_eq!(format_currency(1234.5, &DisplaySettings::default()), "$1,234.50");
/// ```
pub fn format_currency(value: f64, settings: &DisplaySettings) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    // Exact decimal expansion, so amounts beyond the integer range keep every digit
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (group, decimal) = settings.locale.separators();
    let number = format!("{}{}{}", group_digits(whole, group), decimal, fraction);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    let symbol = currency_symbol(settings.currency, settings.locale);

    if settings.locale.symbol_after() {
        format!("{}{}\u{a0}{}", sign, number, symbol)
    } else {
        format!("{}{}{}", sign, symbol, number)
    }
}

fn currency_symbol(currency: Currency, locale: Locale) -> &'static str {
    match (currency, locale) {
        // en-GB disambiguates the dollar
        (Currency::Usd, Locale::EnGb) => "US$",
        _ => currency.symbol(),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Date under the user's `dateFormat` preference. Task due dates keep the
/// medium US style of [`format_due_date`]; the preference only drives this
/// function, which the settings screen uses for its preview.
pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    date.format(format.pattern()).to_string()
}

/// Medium US date, e.g. `Oct 15, 2026`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
