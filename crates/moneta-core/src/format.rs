use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Plain formatter: two decimals, comma-grouped thousands, currency code
/// suffix (`1,234.56 USD`).
#[derive(Debug, Clone)]
pub struct PlainFormatter {
    currency: String,
}

impl PlainFormatter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

impl CurrencyFormatter for PlainFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = cents / 100;
        let fraction = cents % 100;
        let mut grouped = String::new();
        for (index, digit) in whole.to_string().chars().rev().enumerate() {
            if index > 0 && index % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        let grouped: String = grouped.chars().rev().collect();
        let sign = if negative { "-" } else { "" };
        format!("{sign}{grouped}.{fraction:02} {}", self.currency)
    }
}

impl DateFormatter for PlainFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}
