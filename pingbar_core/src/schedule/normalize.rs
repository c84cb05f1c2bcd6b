/// Canonicalize a textual clock token into `HH:MM`.
///
/// Accepts `10:30`, `10.30`, `10h`, `10` and single-digit fields such as
/// `9:5`. Fields are zero-padded and a missing minute becomes `00`. No range
/// check happens here, so `27:75` comes back as-is. Input without any digit
/// is returned unchanged.
#[must_use]
pub fn normalize_time(token: &str) -> String {
    if !token.chars().any(|c| c.is_ascii_digit()) {
        return token.to_string();
    }

    let token = token
        .trim()
        .trim_end_matches(['h', 'H'])
        .trim_end()
        .replace('.', ":");
    let (hour, minute) = token.split_once(':').unwrap_or((token.as_str(), ""));

    format!("{}:{}", pad(hour), pad(minute))
}

fn pad(field: &str) -> String {
    match field.len() {
        0 => "00".to_string(),
        1 => format!("0{field}"),
        _ => field.to_string(),
    }
}
