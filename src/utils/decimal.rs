/// Parse a spreadsheet cell that may use a comma as decimal separator.
///
/// Returns `None` for empty cells and for anything that does not parse to a
/// finite number. Callers treat `None` as "no reading", never as zero.
///
/// # Examples
/// ```
/// use rios_online::utils::normalize_decimal;
///
/// assert_eq!(normalize_decimal("12,5"), Some(12.5));
/// assert_eq!(normalize_decimal("abc"), None);
/// ```
pub fn normalize_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse an integral cell such as a year written as `2021` or `2021,0`.
pub fn normalize_integer(raw: &str) -> Option<i64> {
    let value = normalize_decimal(raw)?;
    if value.fract() != 0.0 || value.abs() > i32::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Month names and abbreviations, Portuguese and English, indexed by month - 1
const MONTH_NAMES: [&[&str]; 12] = [
    &["jan", "janeiro", "january"],
    &["fev", "fevereiro", "feb", "february"],
    &["mar", "março", "marco", "march"],
    &["abr", "abril", "apr", "april"],
    &["mai", "maio", "may"],
    &["jun", "junho", "june"],
    &["jul", "julho", "july"],
    &["ago", "agosto", "aug", "august"],
    &["set", "setembro", "sep", "sept", "september"],
    &["out", "outubro", "oct", "october"],
    &["nov", "novembro", "november"],
    &["dez", "dezembro", "dec", "december"],
];

/// Parse a calendar month: a number in `1..=12` or a month name such as
/// `Fev`, `janeiro` or `dec.` (case-insensitive).
pub fn normalize_month(raw: &str) -> Option<u32> {
    if let Some(month) = normalize_integer(raw) {
        return (1..=12).contains(&month).then_some(month as u32);
    }

    let name = raw.trim().trim_end_matches('.').to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|names| names.contains(&name.as_str()))
        .map(|index| index as u32 + 1)
}
