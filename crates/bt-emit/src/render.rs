//! Target-specific rendering of primitive values: string quoting, numeric
//! literal spelling, and the boolean/null keywords. Containers and host
//! calls build on top of these.

use crate::target::Target;
use bt_common::numeric::{classify_numeric_literal, strip_numeric_prefix, NumericForm};

/// Quotes and escapes a string the way the target language's literal
/// grammar expects: single quotes for Python, double quotes for Java.
/// Both escape `\\`, `\n`, `\r`, `\t`, and whichever quote character they
/// themselves use.
pub fn quote_string(target: Target, value: &str) -> String {
    let quote = match target {
        Target::Python => '\'',
        Target::Java => '"',
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(ch),
        }
    }
    out.push(quote);
    out
}

pub fn render_bool(target: Target, value: bool) -> &'static str {
    match (target, value) {
        (Target::Python, true) => "True",
        (Target::Python, false) => "False",
        (Target::Java, true) => "true",
        (Target::Java, false) => "false",
    }
}

pub fn render_null(target: Target) -> &'static str {
    match target {
        Target::Python => "None",
        Target::Java => "null",
    }
}

/// Re-spells a numeric literal's raw source text for the target: mostly
/// pass-through, except Python has no bare leading-zero octal syntax
/// (`0755` is a `SyntaxError`) so it is normalized to `0o755`.
pub fn render_numeric_literal(target: Target, text: &str) -> String {
    let form = classify_numeric_literal(text);
    if form == NumericForm::Octal && target == Target::Python {
        let digits = strip_numeric_prefix(text, form);
        return format!("0o{digits}");
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_uses_single_quotes_and_escapes_embedded_ones() {
        assert_eq!(quote_string(Target::Python, "a'b\\c"), "'a\\'b\\\\c'");
    }

    #[test]
    fn java_uses_double_quotes_and_escapes_embedded_ones() {
        assert_eq!(quote_string(Target::Java, "a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn normalizes_legacy_octal_for_python_only() {
        assert_eq!(render_numeric_literal(Target::Python, "0755"), "0o755");
        assert_eq!(render_numeric_literal(Target::Java, "0755"), "0755");
    }

    #[test]
    fn passes_through_hex_and_decimal() {
        assert_eq!(render_numeric_literal(Target::Python, "0x1F"), "0x1F");
        assert_eq!(render_numeric_literal(Target::Java, "3.14"), "3.14");
    }
}
