//! The `Type` data model.
//!
//! A `Type` is a tagged value: a stable `id`, whether (and how) it is
//! callable, its argument schema, its attribute map, the type it yields
//! when called, and whether the emitter has a dedicated template for bare
//! references to it. Dynamic dispatch to per-target emission hooks happens
//! by `id` in `bt-emit`, not through a function pointer stored here: a new
//! recognized class only needs a new map entry, not a new variant here.

use rustc_hash::FxHashMap;

/// How a `Type`'s value may be invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Callable {
    NotCallable,
    Function,
    Constructor,
}

/// The sentinel `_numeric` union matches any of these four leaf type ids:
/// `_integer`, `_decimal`, `_hex`, `_octal`. It is never a first-class
/// `Type` value, only a slot-level acceptance set.
pub const NUMERIC_SENTINEL: &str = "_numeric";
pub const NUMERIC_LEAVES: [&str; 4] = ["_integer", "_decimal", "_hex", "_octal"];

/// One position in a constructor/function's argument schema: a non-empty
/// set of acceptable type ids, plus whether the argument may be omitted.
#[derive(Clone, Debug)]
pub struct Slot {
    pub accepted: Vec<&'static str>,
    pub optional: bool,
}

impl Slot {
    pub fn required(accepted: &[&'static str]) -> Self {
        assert!(!accepted.is_empty(), "a slot must accept at least one type");
        Self {
            accepted: accepted.to_vec(),
            optional: false,
        }
    }

    pub fn optional(accepted: &[&'static str]) -> Self {
        assert!(!accepted.is_empty(), "a slot must accept at least one type");
        Self {
            accepted: accepted.to_vec(),
            optional: true,
        }
    }

    /// Whether `type_id` satisfies this slot, expanding `_numeric` to its
    /// four leaf forms.
    pub fn accepts(&self, type_id: &str) -> bool {
        self.accepted.iter().any(|&candidate| {
            if candidate == NUMERIC_SENTINEL {
                NUMERIC_LEAVES.contains(&type_id)
            } else {
                candidate == type_id
            }
        })
    }

    /// Human-readable rendering of the accepted set, used in type-error
    /// messages ("expected string or _numeric, got _boolean").
    pub fn describe(&self) -> String {
        self.accepted.join(" or ")
    }
}

/// A tagged type value.
#[derive(Clone, Debug)]
pub struct Type {
    pub id: &'static str,
    pub callable: Callable,
    pub args: Vec<Slot>,
    pub attr: FxHashMap<&'static str, Type>,
    /// The `Type` yielded when this value is called (for constructors and
    /// functions), boxed since `Type` is self-referential.
    pub instance: Option<Box<Type>>,
    /// Whether the emitter registers a dedicated emission hook for bare
    /// references to this id (e.g. `MinKey`, `MaxKey` singletons) as
    /// opposed to falling back to the identifier's raw name.
    pub has_template: bool,
}

impl Type {
    /// A non-callable leaf type with no attributes (the primitive literal
    /// types: `_string`, `_object`, ...).
    pub fn leaf(id: &'static str) -> Self {
        Self {
            id,
            callable: Callable::NotCallable,
            args: Vec::new(),
            attr: FxHashMap::default(),
            instance: None,
            has_template: false,
        }
    }

    pub fn with_attr(mut self, name: &'static str, ty: Type) -> Self {
        self.attr.insert(name, ty);
        self
    }

    pub fn with_template(mut self) -> Self {
        self.has_template = true;
        self
    }

    /// Resolve `name` against `self`'s attribute map. Attribute maps are
    /// not chained through a prototype in this data model; the only
    /// multi-hop lookup is the walker resolving a constructor's type to
    /// its instance type between two successive calls.
    pub fn lookup_attr(&self, name: &str) -> Option<&Type> {
        self.attr.get(name)
    }
}
