use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Symbol-prefixed amounts, e.g. `$1,500` or `-$12.50` for `en-US`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardFormatter {
    currency: String,
    show_cents: bool,
    decimal_separator: char,
    grouping_separator: char,
}

impl StandardFormatter {
    pub fn new(currency: impl Into<String>, show_cents: bool) -> Self {
        Self {
            currency: currency.into().trim().to_uppercase(),
            show_cents,
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }

    /// Uses the digit separators of a BCP 47 tag such as `de-DE`.
    pub fn with_locale(mut self, locale: &str) -> Self {
        let (decimal, grouping) = separators_for(locale);
        self.decimal_separator = decimal;
        self.grouping_separator = grouping;
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl Default for StandardFormatter {
    fn default() -> Self {
        Self::new("USD", false)
    }
}

impl CurrencyFormatter for StandardFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let precision = if self.show_cents { 2 } else { 0 };
        let body = format!("{:.*}", precision, amount.abs());
        let (int_part, fraction) = match body.find('.') {
            Some(pos) => body.split_at(pos),
            None => (body.as_str(), ""),
        };
        let is_zero = int_part.chars().chain(fraction.chars().skip(1)).all(|ch| ch == '0');
        let grouped = group_digits(int_part, self.grouping_separator);
        let fraction = fraction.replacen('.', &self.decimal_separator.to_string(), 1);
        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
        format!("{sign}{}{grouped}{fraction}", symbol_for(&self.currency))
    }
}

/// Decimal and grouping separators for a locale tag; unknown tags use `.` and `,`.
pub fn separators_for(locale: &str) -> (char, char) {
    let tag = locale.trim().replace('_', "-").to_lowercase();
    let language = tag.split('-').next().unwrap_or_default();
    match (language, tag.as_str()) {
        (_, "es-mx" | "es-us") => ('.', ','),
        ("de" | "es" | "it" | "pt" | "nl" | "id" | "tr" | "da", _) => (',', '.'),
        ("fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk", _) => (',', ' '),
        _ => ('.', ','),
    }
}

/// Renders dates as `Feb 6, 2026`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumDateFormatter;

impl DateFormatter for MediumDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Currency symbol for well-known codes; other codes render as `CODE `.
pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" | "MXN" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => format!("{code} "),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
