//! Utilities for classifying numeric literal text.

/// The syntactic form of an integer/decimal numeric literal, matching the
/// leaf types the walker tags a `Literal` node with (`_integer`, `_decimal`,
/// `_hex`, `_octal`) before `_numeric` slot matching collapses them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericForm {
    Integer,
    Decimal,
    Hex,
    Octal,
}

/// Classify a numeric literal's surface text into the form the walker uses
/// for its leaf type. Legacy octal (a leading `0` followed only by octal
/// digits, no `x`/`o`/`.`/`e`) is recognized alongside the `0o`/`0O` form,
/// since the surface grammar (and the shell dialect it imitates) accepts
/// both spellings.
pub fn classify_numeric_literal(text: &str) -> NumericForm {
    let lower = text.to_ascii_lowercase();
    if lower.starts_with("0x") {
        return NumericForm::Hex;
    }
    if lower.starts_with("0o") {
        return NumericForm::Octal;
    }
    if lower.len() > 1
        && lower.starts_with('0')
        && lower.as_bytes()[1..].iter().all(|b| (b'0'..=b'7').contains(b))
    {
        return NumericForm::Octal;
    }
    if lower.contains('.') || lower.contains('e') {
        return NumericForm::Decimal;
    }
    NumericForm::Integer
}

/// Strip the `0x`/`0o`/`0O`/legacy-leading-zero prefix from an octal or hex
/// literal, returning the bare digit string.
pub fn strip_numeric_prefix(text: &str, form: NumericForm) -> &str {
    match form {
        NumericForm::Hex => &text[2.min(text.len())..],
        NumericForm::Octal => {
            let lower_prefix = text.get(0..2).map(|s| s.to_ascii_lowercase());
            if lower_prefix.as_deref() == Some("0o") {
                &text[2..]
            } else {
                text.trim_start_matches('0')
            }
        }
        NumericForm::Integer | NumericForm::Decimal => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_numeric_literal() {
        assert_eq!(classify_numeric_literal("123"), NumericForm::Integer);
        assert_eq!(classify_numeric_literal("123.5"), NumericForm::Decimal);
        assert_eq!(classify_numeric_literal("1e10"), NumericForm::Decimal);
        assert_eq!(classify_numeric_literal("0x1F"), NumericForm::Hex);
        assert_eq!(classify_numeric_literal("0o17"), NumericForm::Octal);
        assert_eq!(classify_numeric_literal("0O17"), NumericForm::Octal);
        assert_eq!(classify_numeric_literal("0755"), NumericForm::Octal);
        assert_eq!(classify_numeric_literal("0"), NumericForm::Integer);
        assert_eq!(classify_numeric_literal("089"), NumericForm::Integer);
    }

    #[test]
    fn test_strip_numeric_prefix() {
        assert_eq!(strip_numeric_prefix("0x1F", NumericForm::Hex), "1F");
        assert_eq!(strip_numeric_prefix("0o17", NumericForm::Octal), "17");
        assert_eq!(strip_numeric_prefix("0O17", NumericForm::Octal), "17");
        assert_eq!(strip_numeric_prefix("0755", NumericForm::Octal), "755");
    }
}
