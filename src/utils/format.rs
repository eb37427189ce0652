/// Two decimals with thousands separators: `1234.5` -> `"1,234.50"`.
pub fn format_amount(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = group_thousands(&(cents / 100).to_string());
    format!("{}{}.{:02}", sign, whole, cents % 100)
}

/// Whole units with thousands separators.
pub fn format_quantity(value: u32) -> String {
    group_thousands(&value.to_string())
}

/// Item counts, grouped like quantities.
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
