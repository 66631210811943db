//! Minimal ISO-8601 date-string parsing, the subset `Date`/`ISODate`
//! string arguments actually use: `YYYY-MM-DD`, optionally followed by
//! `THH:mm:ss(.sss)?` and a trailing `Z` or `+HH:MM`/`-HH:MM` offset.

use crate::civil_date::{millis_from_components, UtcComponents};

pub fn parse_iso8601(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    if bytes.len() < 10 {
        return None;
    }
    let year: i64 = text.get(0..4)?.parse().ok()?;
    if bytes[4] != b'-' {
        return None;
    }
    let month: i64 = text.get(5..7)?.parse().ok()?;
    if bytes[7] != b'-' {
        return None;
    }
    let day: i64 = text.get(8..10)?.parse().ok()?;

    let mut c = UtcComponents {
        year,
        month,
        day,
        hour: 0,
        minute: 0,
        second: 0,
        millis: 0,
    };

    let rest = &text[10..];
    if rest.is_empty() {
        return Some(millis_from_components(&c));
    }
    let rest = rest.strip_prefix('T').or_else(|| rest.strip_prefix(' '))?;

    let (time_part, offset_minutes) = split_offset(rest)?;
    let fields: Vec<&str> = time_part.split(':').collect();
    if fields.is_empty() || fields.len() > 3 {
        return None;
    }
    c.hour = fields[0].parse().ok()?;
    if let Some(m) = fields.get(1) {
        c.minute = m.parse().ok()?;
    }
    if let Some(s) = fields.get(2) {
        let (sec, ms) = match s.split_once('.') {
            Some((sec, frac)) => {
                let mut frac = frac.to_string();
                frac.truncate(3);
                while frac.len() < 3 {
                    frac.push('0');
                }
                (sec, frac.parse().ok()?)
            }
            None => (*s, 0),
        };
        c.second = sec.parse().ok()?;
        c.millis = ms;
    }

    let millis = millis_from_components(&c);
    Some(millis - offset_minutes * 60_000)
}

/// Splits a trailing `Z` or `+HH:MM`/`-HH:MM` offset off the time part,
/// returning the bare time string and the offset in minutes (east of UTC).
fn split_offset(s: &str) -> Option<(&str, i64)> {
    if let Some(stripped) = s.strip_suffix('Z') {
        return Some((stripped, 0));
    }
    for (idx, ch) in s.char_indices().rev() {
        if ch == '+' || ch == '-' {
            let sign = if ch == '-' { -1 } else { 1 };
            let offset = &s[idx + 1..];
            let (h, m) = offset.split_once(':').unwrap_or((offset, "0"));
            let minutes = h.parse::<i64>().ok()? * 60 + m.parse::<i64>().ok()?;
            return Some((&s[..idx], sign * minutes));
        }
    }
    Some((s, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_only() {
        assert_eq!(parse_iso8601("1970-01-01"), Some(0));
    }

    #[test]
    fn parses_full_datetime_with_z() {
        let millis = parse_iso8601("2018-03-27T18:42:05.123Z").unwrap();
        assert_eq!(millis % 1000, 123);
    }

    #[test]
    fn applies_timezone_offset() {
        let utc = parse_iso8601("2020-01-01T00:00:00Z").unwrap();
        let plus_one = parse_iso8601("2020-01-01T01:00:00+01:00").unwrap();
        assert_eq!(utc, plus_one);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso8601("not a date").is_none());
    }
}
