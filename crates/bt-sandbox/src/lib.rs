//! Constrained compile-time evaluator.
//!
//! Folds the argument fragments of the handful of recognized constructors
//! whose emitted form depends on evaluating their arguments (`ObjectId`,
//! `Binary`, `Long`/`NumberLong`(`.fromBits`), `Date`/`ISODate`,
//! `Decimal128`/`NumberDecimal`, `RegExp`, `BSONRegExp`). This is a
//! minimal hand-written folder, not an embedded JS engine: it never sees
//! anything outside a single constructor-argument expression.

mod civil_date;
mod evaluator;
mod host_value;
mod iso8601;

pub use civil_date::{components_from_millis as utc_components, UtcComponents};
pub use evaluator::evaluate;
pub use host_value::HostValue;
