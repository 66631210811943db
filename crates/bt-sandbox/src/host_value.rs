//! The constrained value domain the evaluator folds expressions into.
//!
//! This is deliberately narrower than a general JS value: there is no
//! function, no `this`, no prototype chain. Only what a recognized
//! constructor call can ever produce or consume.

#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    Null,
    Undefined,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<HostValue>),
    Object(Vec<(String, HostValue)>),
    Regex { source: String, flags: String },
    ObjectId(String),
    Binary { data: String, subtype: Option<u8> },
    Long(i64),
    Decimal128(String),
    /// Milliseconds since the Unix epoch, UTC.
    DateMillis(i64),
}

impl HostValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            HostValue::Num(n) => Some(*n),
            _ => None,
        }
    }
}
