//! The constant folder: a minimal hand-written evaluator over a narrow
//! slice of the surface grammar, not a general JS engine. It only ever
//! sees the argument fragments of calls the symbol table already
//! recognizes, so it only needs to fold literals, literal containers,
//! and the handful of constructors whose value depends on evaluating
//! their arguments (`ObjectId`, `Binary`, `Long`/`NumberLong`, `Date`/
//! `ISODate`, `Decimal128`/`NumberDecimal`, `RegExp`, `BSONRegExp`).

use crate::civil_date::{millis_from_components, UtcComponents};
use crate::host_value::HostValue;
use crate::iso8601::parse_iso8601;
use bt_common::numeric::{classify_numeric_literal, NumericForm};
use bt_common::{Span, TranslateError, TranslateResult};
use bt_syntax::{Ast, NodeId, NodeKind};

/// Parses `fragment` as a standalone expression and folds it to a value.
pub fn evaluate(fragment: &str) -> TranslateResult<HostValue> {
    tracing::debug!(fragment, "folding constructor argument fragment");
    let ast = bt_syntax::parse(fragment)?;
    fold(&ast, ast.root)
}

fn fold(ast: &Ast, id: NodeId) -> TranslateResult<HostValue> {
    let node = ast.node(id);
    match &node.kind {
        NodeKind::StringLiteral { value } => Ok(HostValue::Str(value.clone())),
        NodeKind::IntegerLiteral | NodeKind::DecimalLiteral | NodeKind::HexLiteral | NodeKind::OctalLiteral => {
            literal_numeric_value(node.get_text())
                .map(HostValue::Num)
                .ok_or_else(|| TranslateError::type_error(format!("not a number: {}", node.get_text())).at(node.span))
        }
        NodeKind::BooleanLiteral(b) => Ok(HostValue::Bool(*b)),
        NodeKind::NullLiteral => Ok(HostValue::Null),
        NodeKind::UndefinedLiteral => Ok(HostValue::Undefined),
        NodeKind::RegexLiteral { pattern, flags } => Ok(HostValue::Regex {
            source: pattern.clone(),
            flags: flags.clone(),
        }),
        NodeKind::ArrayLiteral => {
            let mut values = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                if matches!(ast.node(child).kind, NodeKind::Elision) {
                    values.push(HostValue::Null);
                } else {
                    values.push(fold(ast, child)?);
                }
            }
            Ok(HostValue::Array(values))
        }
        NodeKind::ObjectLiteral => {
            let mut entries = Vec::with_capacity(node.children.len());
            for &prop in &node.children {
                let prop_node = ast.node(prop);
                let key_id = prop_node.children[0];
                let value_id = prop_node.children[1];
                let key = match &ast.node(key_id).kind {
                    NodeKind::Identifier => ast.node(key_id).get_text().to_string(),
                    NodeKind::StringLiteral { value } => value.clone(),
                    other => {
                        return Err(TranslateError::generic(format!("unsupported property key {other:?}"))
                            .at(ast.node(key_id).span))
                    }
                };
                entries.push((key, fold(ast, value_id)?));
            }
            Ok(HostValue::Object(entries))
        }
        NodeKind::NewExpression => {
            let target = node.children[0];
            if matches!(ast.node(target).kind, NodeKind::CallExpression) {
                fold(ast, target)
            } else {
                let name = callee_path(ast, target)
                    .ok_or_else(|| TranslateError::reference("unrecognized constructor target").at(node.span))?;
                call_shim(&name, Vec::new(), node.span)
            }
        }
        NodeKind::CallExpression => {
            let callee = node.children[0];
            let name = callee_path(ast, callee)
                .ok_or_else(|| TranslateError::reference("unrecognized call target").at(node.span))?;
            let mut args = Vec::with_capacity(node.children.len() - 1);
            for &arg in &node.children[1..] {
                args.push(fold(ast, arg)?);
            }
            call_shim(&name, args, node.span)
        }
        NodeKind::Identifier => {
            Err(TranslateError::reference(format!("cannot fold bare identifier `{}`", node.get_text())).at(node.span))
        }
        other => Err(TranslateError::generic(format!("cannot fold {other:?} outside its parent")).at(node.span)),
    }
}

fn callee_path(ast: &Ast, id: NodeId) -> Option<String> {
    match &ast.node(id).kind {
        NodeKind::Identifier => Some(ast.node(id).get_text().to_string()),
        NodeKind::MemberAccess { name } => {
            let base = callee_path(ast, ast.node(id).children[0])?;
            Some(format!("{base}.{name}"))
        }
        _ => None,
    }
}

/// Parses an integer/decimal/hex/octal literal's raw source text into a
/// value, normalizing legacy (prefix-less) octal the way `089` vs `0755`
/// diverge: only the latter is valid octal digits, so it is reinterpreted
/// base-8; the former is left as decimal by `classify_numeric_literal`.
fn literal_numeric_value(text: &str) -> Option<f64> {
    let form = classify_numeric_literal(text);
    match form {
        NumericForm::Integer | NumericForm::Decimal => text.parse::<f64>().ok(),
        NumericForm::Hex => i64::from_str_radix(bt_common::numeric::strip_numeric_prefix(text, form), 16)
            .ok()
            .map(|v| v as f64),
        NumericForm::Octal => {
            let digits = bt_common::numeric::strip_numeric_prefix(text, form);
            let digits = if digits.is_empty() { "0" } else { digits };
            i64::from_str_radix(digits, 8).ok().map(|v| v as f64)
        }
    }
}

fn call_shim(name: &str, args: Vec<HostValue>, span: Span) -> TranslateResult<HostValue> {
    match name {
        "ObjectId" => {
            let hex = single_string_arg(name, &args, span)?;
            if hex.len() != 24 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(TranslateError::type_error(format!("`{hex}` is not a 24-character hex ObjectId")).at(span));
            }
            Ok(HostValue::ObjectId(hex.to_lowercase()))
        }
        "Binary" => {
            if args.is_empty() || args.len() > 2 {
                return Err(TranslateError::arity("Binary takes one or two arguments").at(span));
            }
            let data = args[0]
                .as_str()
                .ok_or_else(|| TranslateError::type_error("Binary data must be a string").at(span))?
                .to_string();
            let subtype = match args.get(1) {
                Some(v) => Some(
                    v.as_num()
                        .ok_or_else(|| TranslateError::type_error("Binary subtype must be numeric").at(span))?
                        as u8,
                ),
                None => None,
            };
            Ok(HostValue::Binary { data, subtype })
        }
        "Long" | "NumberLong" => long_from_args(&args, span),
        "Long.fromBits" => {
            if args.len() != 2 {
                return Err(TranslateError::arity("Long.fromBits takes exactly two arguments").at(span));
            }
            let low = require_num(&args[0], span)? as i64 as u32;
            let high = require_num(&args[1], span)? as i64 as i32;
            Ok(HostValue::Long(((high as i64) << 32) | (low as i64)))
        }
        "Decimal128" | "NumberDecimal" => {
            let text = single_value_as_text(name, &args, span)?;
            Ok(HostValue::Decimal128(text))
        }
        "RegExp" => {
            let (source, flags) = regex_source_and_flags(name, &args, span)?;
            Ok(HostValue::Regex { source, flags })
        }
        "BSONRegExp" => {
            let (source, flags) = regex_source_and_flags(name, &args, span)?;
            let invalid: String = flags.chars().filter(|f| !BSON_REGEX_FLAGS.contains(f)).collect();
            if !invalid.is_empty() {
                return Err(TranslateError::generic(format!("unknown BSONRegExp flag(s): {invalid}")).at(span));
            }
            Ok(HostValue::Regex { source, flags })
        }
        "Date" | "ISODate" => date_from_args(&args, span),
        other => Err(TranslateError::reference(format!("`{other}` cannot be constant-folded")).at(span)),
    }
}

const BSON_REGEX_FLAGS: [char; 6] = ['i', 'm', 'x', 's', 'l', 'u'];

fn regex_source_and_flags(name: &str, args: &[HostValue], span: Span) -> TranslateResult<(String, String)> {
    if args.is_empty() || args.len() > 2 {
        return Err(TranslateError::arity(format!("{name} takes one or two arguments")).at(span));
    }
    let source = args[0]
        .as_str()
        .ok_or_else(|| TranslateError::type_error(format!("{name} pattern must be a string")).at(span))?
        .to_string();
    let flags = match args.get(1) {
        Some(v) => v
            .as_str()
            .ok_or_else(|| TranslateError::type_error(format!("{name} flags must be a string")).at(span))?
            .to_string(),
        None => String::new(),
    };
    Ok((source, flags))
}

fn single_string_arg<'a>(name: &str, args: &'a [HostValue], span: Span) -> TranslateResult<&'a str> {
    if args.len() != 1 {
        return Err(TranslateError::arity(format!("{name} takes exactly one argument")).at(span));
    }
    args[0]
        .as_str()
        .ok_or_else(|| TranslateError::type_error(format!("{name} argument must be a string")).at(span))
}

fn single_value_as_text(name: &str, args: &[HostValue], span: Span) -> TranslateResult<String> {
    if args.len() != 1 {
        return Err(TranslateError::arity(format!("{name} takes exactly one argument")).at(span));
    }
    match &args[0] {
        HostValue::Str(s) => Ok(s.clone()),
        HostValue::Num(n) => Ok(format_number(*n)),
        _ => Err(TranslateError::type_error(format!("{name} argument must be a string or number")).at(span)),
    }
}

fn require_num(v: &HostValue, span: Span) -> TranslateResult<f64> {
    v.as_num()
        .ok_or_else(|| TranslateError::type_error("expected a numeric argument").at(span))
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn long_from_args(args: &[HostValue], span: Span) -> TranslateResult<HostValue> {
    match args {
        [HostValue::Str(s)] => s
            .parse::<i64>()
            .map(HostValue::Long)
            .map_err(|_| TranslateError::type_error(format!("`{s}` is not a valid Long")).at(span)),
        [HostValue::Num(n)] => Ok(HostValue::Long(*n as i64)),
        [low, high] => {
            let low = require_num(low, span)? as i64 as u32;
            let high = require_num(high, span)? as i64 as i32;
            Ok(HostValue::Long(((high as i64) << 32) | (low as i64)))
        }
        _ => Err(TranslateError::arity("Long takes one or two arguments").at(span)),
    }
}

fn date_from_args(args: &[HostValue], span: Span) -> TranslateResult<HostValue> {
    match args {
        [] => Ok(HostValue::DateMillis(0)),
        [HostValue::Str(s)] => parse_iso8601(s)
            .map(HostValue::DateMillis)
            .ok_or_else(|| TranslateError::type_error(format!("`{s}` is not a valid ISO-8601 date")).at(span)),
        [HostValue::Num(millis)] => Ok(HostValue::DateMillis(*millis as i64)),
        _ => {
            let mut fields = [0i64; 7];
            fields[2] = 1; // day defaults to 1, everything else to 0
            if args.len() > 7 {
                return Err(TranslateError::arity("Date takes at most 7 numeric arguments").at(span));
            }
            for (i, arg) in args.iter().enumerate() {
                fields[i] = require_num(arg, span)? as i64;
            }
            let components = UtcComponents {
                year: fields[0],
                month: fields[1] + 1,
                day: fields[2],
                hour: fields[3],
                minute: fields[4],
                second: fields[5],
                millis: fields[6],
            };
            Ok(HostValue::DateMillis(millis_from_components(&components)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_object_id_from_hex_string() {
        let v = evaluate(r#"ObjectId("507f1f77bcf86cd799439011")"#).unwrap();
        assert_eq!(v, HostValue::ObjectId("507f1f77bcf86cd799439011".to_string()));
    }

    #[test]
    fn rejects_malformed_object_id() {
        assert!(evaluate(r#"ObjectId("not-hex")"#).is_err());
    }

    #[test]
    fn folds_new_object_id() {
        let v = evaluate(r#"new ObjectId("507f1f77bcf86cd799439011")"#).unwrap();
        assert_eq!(v, HostValue::ObjectId("507f1f77bcf86cd799439011".to_string()));
    }

    #[test]
    fn folds_number_long_from_string() {
        assert_eq!(evaluate(r#"NumberLong("123456789012")"#).unwrap(), HostValue::Long(123456789012));
    }

    #[test]
    fn folds_long_from_bits() {
        let v = evaluate("Long.fromBits(0, 1)").unwrap();
        assert_eq!(v, HostValue::Long(1i64 << 32));
    }

    #[test]
    fn folds_iso_date_string() {
        let v = evaluate(r#"ISODate("1970-01-01T00:00:00.000Z")"#).unwrap();
        assert_eq!(v, HostValue::DateMillis(0));
    }

    #[test]
    fn folds_date_with_numeric_components() {
        let v = evaluate("Date(1970, 0, 2)").unwrap();
        assert_eq!(v, HostValue::DateMillis(86_400_000));
    }

    #[test]
    fn folds_array_with_elision() {
        let v = evaluate("[1, , 3]").unwrap();
        assert_eq!(v, HostValue::Array(vec![HostValue::Num(1.0), HostValue::Null, HostValue::Num(3.0)]));
    }

    #[test]
    fn folds_nested_object_literal() {
        let v = evaluate(r#"{a: 1, "b": "two"}"#).unwrap();
        assert_eq!(
            v,
            HostValue::Object(vec![("a".to_string(), HostValue::Num(1.0)), ("b".to_string(), HostValue::Str("two".to_string()))])
        );
    }

    #[test]
    fn legacy_octal_literal_is_reinterpreted_base_eight() {
        let v = evaluate("0755").unwrap();
        assert_eq!(v, HostValue::Num(493.0));
    }

    #[test]
    fn unrecognized_call_is_a_reference_error() {
        let err = evaluate("Frobnicate(1)").unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::ReferenceError);
    }

    #[test]
    fn bson_regexp_accepts_its_full_flag_set() {
        let v = evaluate(r#"BSONRegExp("a", "ixu")"#).unwrap();
        assert_eq!(
            v,
            HostValue::Regex {
                source: "a".to_string(),
                flags: "ixu".to_string()
            }
        );
    }

    #[test]
    fn bson_regexp_rejects_unknown_flags() {
        let err = evaluate(r#"BSONRegExp("a", "q")"#).unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::Generic);
    }

    #[test]
    fn plain_regexp_does_not_validate_against_the_bson_flag_set() {
        let v = evaluate(r#"RegExp("a", "gi")"#).unwrap();
        assert_eq!(
            v,
            HostValue::Regex {
                source: "a".to_string(),
                flags: "gi".to_string()
            }
        );
    }
}
