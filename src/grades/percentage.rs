/// Derives the percentage for a points / max-points pair.
///
/// Blank, missing or non-numeric operands, a zero maximum and non-finite
/// results all yield `None`; the value is advisory and never fails a row.
/// The result is rounded to two decimals, exact ties going to the even
/// digit, and always carries a fractional part, so 18 of 20 reads `"90.0"`
/// and 1 of 32 reads `"3.12"`.
pub fn compute(points: Option<&str>, max_points: Option<&str>) -> Option<String> {
    let points = parse_operand(points)?;
    let max_points = parse_operand(max_points)?;
    if max_points == 0.0 {
        return None;
    }

    let ratio = points / max_points * 100.0;
    if !ratio.is_finite() {
        return None;
    }
    Some(format_decimal(ratio))
}

fn parse_operand(text: Option<&str>) -> Option<f64> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

// Past 1e16 the two decimals are below float precision; use exponent form like "1e+17".
const EXPONENT_FROM: f64 = 1e16;

fn format_decimal(value: f64) -> String {
    if value.abs() >= EXPONENT_FROM {
        return format!("{:e}", value).replacen('e', "e+", 1);
    }

    // `{:.2}` rounds the exact binary value, ties to even.
    let text = format!("{:.2}", value);
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') { format!("{trimmed}0") } else { trimmed.to_string() }
}
