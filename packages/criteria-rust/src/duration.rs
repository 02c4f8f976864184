//! `[[h:]m:]s` text form of duration values.

/// Parses `"90"`, `"1:30"` or `"1:01:30"` into seconds.
///
/// Returns `None` for anything else, including negative components and
/// minute/second components of 60 or more after the first position.
#[must_use]
pub fn parse_seconds(text: &str) -> Option<i64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut total: i64 = 0;
    for (idx, part) in parts.iter().enumerate() {
        let n: i64 = part.trim().parse().ok()?;
        if n < 0 || (idx > 0 && n >= 60) {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(n)?;
    }
    Some(total)
}

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
#[must_use]
pub fn format_seconds(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.unsigned_abs();
    let (h, m, s) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{sign}{h}:{m:02}:{s:02}")
    } else {
        format!("{sign}{m}:{s:02}")
    }
}
