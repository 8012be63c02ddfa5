use serde::{Deserialize, Deserializer};

/// Falls back to the field's default instead of failing the whole document.
pub fn ok_or_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// `1234.5` -> `"$1,234.50"`
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;

    format!(
        "{sign}${}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Whole-dollar axis label, `10050.0` -> `"$10,050"`
pub fn format_usd_whole(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(amount.abs().round() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cents_and_thousands() {
        assert_eq!(format_usd(500.0), "$500.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_usd(-42.125), "-$42.13");
    }

    #[test]
    fn formats_whole_dollar_ticks() {
        assert_eq!(format_usd_whole(10050.0), "$10,050");
        assert_eq!(format_usd_whole(950.4), "$950");
        assert_eq!(format_usd_whole(0.0), "$0");
    }
}
