//! Per-target-id emission hooks for recognized host calls.
//!
//! Dispatch happens by the resolved `Type::id` of a `CallExpression`/
//! `NewExpression` node through a lookup map, not a big `match` over
//! class names: the hook map is what a new recognized class plugs into
//! without touching the walker's dispatch site.

use crate::render::quote_string;
use crate::target::Target;
use crate::EmitCtx;
use bt_common::{TranslateError, TranslateResult};
use bt_sandbox::HostValue;
use bt_syntax::NodeId;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

pub type Hook = fn(&EmitCtx, NodeId) -> TranslateResult<String>;

static HOOKS: OnceLock<FxHashMap<&'static str, Hook>> = OnceLock::new();

pub fn hook_for(type_id: &str) -> Option<Hook> {
    HOOKS.get_or_init(build_hooks).get(type_id).copied()
}

fn build_hooks() -> FxHashMap<&'static str, Hook> {
    let mut hooks: FxHashMap<&'static str, Hook> = FxHashMap::default();
    hooks.insert("ObjectId", emit_object_id);
    hooks.insert("Binary", emit_binary);
    hooks.insert("Long", emit_long);
    hooks.insert("Date", emit_date);
    hooks.insert("Decimal128", emit_decimal128);
    hooks.insert("_regex", emit_regex_value);
    hooks.insert("Code", emit_code);
    hooks.insert("Double", emit_double);
    hooks.insert("Int32", emit_int32);
    hooks.insert("MaxKey", emit_max_key);
    hooks.insert("MinKey", emit_min_key);
    hooks.insert("Symbol", emit_symbol);
    hooks.insert("Timestamp", emit_timestamp);
    hooks.insert("DBRef", emit_dbref);
    hooks.insert("BSONRegExp", emit_bson_regexp);
    // `Object.create`'s instance type is a plain object (`_object`), the
    // same id a literal `{}` resolves to; this hook only ever fires via
    // `emit_call`, since object literals are rendered directly.
    hooks.insert("_object", emit_object_create);
    hooks
}

fn args_text(ctx: &EmitCtx, id: NodeId) -> TranslateResult<Vec<String>> {
    let node = ctx.ast.node(id);
    let arg_ids: &[NodeId] = match &node.kind {
        bt_syntax::NodeKind::CallExpression => &node.children[1..],
        bt_syntax::NodeKind::NewExpression => {
            let target = ctx.ast.node(node.children[0]);
            if matches!(target.kind, bt_syntax::NodeKind::CallExpression) {
                return args_text(ctx, node.children[0]);
            }
            &[]
        }
        _ => &[],
    };
    arg_ids.iter().map(|&a| ctx.emit(a)).collect()
}

fn fold(ctx: &EmitCtx, id: NodeId) -> TranslateResult<HostValue> {
    let text = ctx.ast.node(id).get_text();
    tracing::debug!(text, "invoking sandbox to fold a constructor call");
    bt_sandbox::evaluate(text)
}

fn emit_object_id(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let hex = match fold(ctx, id)? {
        HostValue::ObjectId(hex) => hex,
        _ => unreachable!("ObjectId always folds to HostValue::ObjectId"),
    };
    Ok(match ctx.target {
        Target::Python => format!("ObjectId({})", quote_string(ctx.target, &hex)),
        Target::Java => format!("new ObjectId({})", quote_string(ctx.target, &hex)),
    })
}

fn emit_binary(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let (data, subtype) = match fold(ctx, id)? {
        HostValue::Binary { data, subtype } => (data, subtype),
        _ => unreachable!("Binary always folds to HostValue::Binary"),
    };
    let quoted = quote_string(ctx.target, &data);
    Ok(match (ctx.target, subtype) {
        (Target::Python, Some(subtype)) => format!("Binary(bytes({quoted}, 'utf-8'), {})", python_subtype(subtype)),
        (Target::Python, None) => format!("Binary(bytes({quoted}, 'utf-8'))"),
        (Target::Java, Some(subtype)) => format!("new Binary({}, {quoted}.getBytes())", java_subtype(subtype)),
        (Target::Java, None) => format!("new Binary({quoted}.getBytes())"),
    })
}

/// `bson.binary.*` subtype constants (Python driver).
fn python_subtype(subtype: u8) -> &'static str {
    match subtype {
        0 => "bson.binary.BINARY_SUBTYPE",
        1 => "bson.binary.FUNCTION_SUBTYPE",
        2 => "bson.binary.OLD_BINARY_SUBTYPE",
        3 => "bson.binary.OLD_UUID_SUBTYPE",
        4 => "bson.binary.UUID_SUBTYPE",
        5 => "bson.binary.MD5_SUBTYPE",
        6 => "bson.binary.CSHARP_LEGACY",
        7 => "bson.binary.COLUMN_SUBTYPE",
        128 => "bson.binary.USER_DEFINED_SUBTYPE",
        _ => "bson.binary.BINARY_SUBTYPE",
    }
}

/// `org.bson.BsonBinarySubType` constants (Java driver).
fn java_subtype(subtype: u8) -> &'static str {
    match subtype {
        0 => "BsonBinarySubType.BINARY.getValue()",
        1 => "BsonBinarySubType.FUNCTION.getValue()",
        2 => "BsonBinarySubType.OLD_BINARY.getValue()",
        3 => "BsonBinarySubType.UUID_LEGACY.getValue()",
        4 => "BsonBinarySubType.UUID_STANDARD.getValue()",
        5 => "BsonBinarySubType.MD5.getValue()",
        6 => "BsonBinarySubType.ENCRYPTED.getValue()",
        7 => "BsonBinarySubType.COLUMN.getValue()",
        128 => "BsonBinarySubType.USER_DEFINED.getValue()",
        _ => "BsonBinarySubType.BINARY.getValue()",
    }
}

fn emit_long(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let value = match fold(ctx, id)? {
        HostValue::Long(v) => v,
        _ => unreachable!("Long always folds to HostValue::Long"),
    };
    Ok(match ctx.target {
        Target::Python => format!("Int64({value})"),
        Target::Java => format!("new Long({value})"),
    })
}

fn emit_date(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let millis = match fold(ctx, id)? {
        HostValue::DateMillis(m) => m,
        _ => unreachable!("Date always folds to HostValue::DateMillis"),
    };
    let c = bt_sandbox::utc_components(millis);
    Ok(match ctx.target {
        Target::Python => format!(
            "datetime.datetime({}, {}, {}, {}, {}, {}, {}, tzinfo=datetime.timezone.utc)",
            c.year,
            c.month,
            c.day,
            c.hour,
            c.minute,
            c.second,
            c.millis * 1000
        ),
        Target::Java => format!("new java.util.Date({millis}L)"),
    })
}

fn emit_decimal128(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let text = match fold(ctx, id)? {
        HostValue::Decimal128(s) => s,
        _ => unreachable!("Decimal128 always folds to HostValue::Decimal128"),
    };
    let quoted = quote_string(ctx.target, &text);
    Ok(match ctx.target {
        Target::Python => format!("Decimal128({quoted})"),
        Target::Java => format!("new Decimal128({quoted})"),
    })
}

fn emit_regex_value(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let (source, flags) = match fold(ctx, id)? {
        HostValue::Regex { source, flags } => (source, flags),
        _ => unreachable!("RegExp/BSONRegExp/regex literals always fold to HostValue::Regex"),
    };
    render_regex(ctx, &source, &flags)
}

/// Translates each JS regex flag to its target letter and splices the
/// result as an inline `(?letters)` group rather than a second argument:
/// `i -> i/i`, `m -> m/m`, `u -> a/u`, `y` always drops, `g -> s` for
/// Python and drops for Java. Letters outside this table are dropped.
pub(crate) fn render_regex(ctx: &EmitCtx, source: &str, flags: &str) -> TranslateResult<String> {
    let letters = translated_flag_letters(ctx.target, flags);
    let pattern = if letters.is_empty() {
        source.to_string()
    } else {
        format!("{source}(?{letters})")
    };
    Ok(match ctx.target {
        Target::Python => format!("re.compile({})", quote_string(ctx.target, &pattern)),
        Target::Java => format!("Pattern.compile({})", quote_string(ctx.target, &pattern)),
    })
}

fn translated_flag_letters(target: Target, flags: &str) -> String {
    let mut letters: Vec<char> = flags
        .chars()
        .filter_map(|flag| match (flag, target) {
            ('i', _) => Some('i'),
            ('m', _) => Some('m'),
            ('u', Target::Python) => Some('a'),
            ('u', Target::Java) => Some('u'),
            ('g', Target::Python) => Some('s'),
            ('g', Target::Java) => None,
            ('y', _) => None,
            _ => None,
        })
        .collect();
    letters.sort_unstable();
    letters.dedup();
    letters.into_iter().collect()
}

fn emit_bson_regexp(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let (source, flags) = match fold(ctx, id)? {
        HostValue::Regex { source, flags } => (source, flags),
        _ => unreachable!("BSONRegExp always folds to HostValue::Regex"),
    };
    Ok(match ctx.target {
        Target::Python => format!(
            "Regex({}, {})",
            quote_string(ctx.target, &source),
            quote_string(ctx.target, &flags)
        ),
        Target::Java => format!(
            "new BsonRegularExpression({}, {})",
            quote_string(ctx.target, &source),
            quote_string(ctx.target, &flags)
        ),
    })
}

/// `Code`, `Symbol`, `Timestamp`, `DBRef`, `Double`, `Int32`, `MaxKey`,
/// `MinKey`, and `Object.create` never need the sandbox: their arguments
/// are re-emitted straight from the AST.
fn emit_code(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("Code({})", args.join(", ")),
        Target::Java => format!("new Code({})", args.join(", ")),
    })
}

fn emit_double(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("float({})", args[0]),
        Target::Java => format!("new Double({})", args[0]),
    })
}

fn emit_int32(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("int({})", args[0]),
        Target::Java => format!("new Integer({})", args[0]),
    })
}

fn emit_max_key(ctx: &EmitCtx, _id: NodeId) -> TranslateResult<String> {
    Ok(match ctx.target {
        Target::Python => "MaxKey()".to_string(),
        Target::Java => "new MaxKey()".to_string(),
    })
}

fn emit_min_key(ctx: &EmitCtx, _id: NodeId) -> TranslateResult<String> {
    Ok(match ctx.target {
        Target::Python => "MinKey()".to_string(),
        Target::Java => "new MinKey()".to_string(),
    })
}

fn emit_symbol(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("Symbol({})", args[0]),
        Target::Java => format!("new Symbol({})", args[0]),
    })
}

fn emit_timestamp(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("Timestamp({}, {})", args[0], args[1]),
        Target::Java => format!("new BSONTimestamp({}, {})", args[0], args[1]),
    })
}

fn emit_dbref(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    Ok(match ctx.target {
        Target::Python => format!("DBRef({})", args.join(", ")),
        Target::Java => format!("new DBRef({})", args.join(", ")),
    })
}

fn emit_object_create(ctx: &EmitCtx, id: NodeId) -> TranslateResult<String> {
    let args = args_text(ctx, id)?;
    args.into_iter()
        .next()
        .ok_or_else(|| TranslateError::arity("Object.create takes exactly one argument").at(ctx.ast.node(id).span))
}
