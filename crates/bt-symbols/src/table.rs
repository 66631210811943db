//! The symbol table: every recognized top-level identifier and its `Type`.
//! Built once, read-only for the remainder of the process; multiple
//! translations may share one table and run in parallel.

use crate::types::{Callable, Slot, Type};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

pub struct SymbolTable {
    entries: FxHashMap<&'static str, Type>,
}

impl SymbolTable {
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.entries.get(name)
    }
}

static TABLE: OnceLock<SymbolTable> = OnceLock::new();

/// The process-wide, read-only symbol table (built lazily on first use).
pub fn symbol_table() -> &'static SymbolTable {
    TABLE.get_or_init(build_table)
}

const STRING: &str = "_string";
const OBJECT: &str = "_object";
const NUMERIC: &str = "_numeric";
const REGEX: &str = "_regex";

fn function(args: Vec<Slot>, instance: Type) -> Type {
    Type {
        id: instance.id,
        callable: Callable::Function,
        args,
        attr: FxHashMap::default(),
        instance: Some(Box::new(instance)),
        has_template: false,
    }
}

fn constructor(id: &'static str, args: Vec<Slot>, instance: Type) -> Type {
    Type {
        id,
        callable: Callable::Constructor,
        args,
        attr: FxHashMap::default(),
        instance: Some(Box::new(instance)),
        has_template: false,
    }
}

fn nullary_singleton(id: &'static str) -> Type {
    let instance = Type::leaf(id);
    constructor(id, Vec::new(), instance).with_template()
}

fn build_table() -> SymbolTable {
    let mut entries = FxHashMap::default();

    // -- JavaScript builtins -------------------------------------------------
    entries.insert(
        "RegExp",
        constructor(
            "RegExp",
            vec![Slot::required(&[STRING]), Slot::optional(&[STRING])],
            Type::leaf(REGEX),
        ),
    );

    let date_instance = Type::leaf("Date");
    entries.insert(
        "Date",
        constructor(
            "Date",
            vec![
                Slot::optional(&[STRING, NUMERIC]),
                Slot::optional(&[NUMERIC]),
                Slot::optional(&[NUMERIC]),
                Slot::optional(&[NUMERIC]),
                Slot::optional(&[NUMERIC]),
                Slot::optional(&[NUMERIC]),
                Slot::optional(&[NUMERIC]),
            ],
            date_instance,
        ),
    );
    let date_ty = entries["Date"].clone();
    entries.insert("ISODate", date_ty);

    let mut object_ty = Type::leaf("Object");
    object_ty.attr.insert(
        "create",
        function(vec![Slot::required(&[OBJECT])], Type::leaf(OBJECT)).with_id("ObjectCreate"),
    );
    entries.insert("Object", object_ty);

    // -- BSON classes ---------------------------------------------------------
    entries.insert(
        "Code",
        constructor(
            "Code",
            vec![Slot::required(&[STRING]), Slot::optional(&[OBJECT])],
            Type::leaf("Code"),
        ),
    );

    entries.insert(
        "ObjectId",
        constructor(
            "ObjectId",
            vec![Slot::optional(&[STRING])],
            Type::leaf("ObjectId"),
        ),
    );

    entries.insert(
        "Binary",
        constructor(
            "Binary",
            vec![Slot::required(&[STRING]), Slot::optional(&[NUMERIC])],
            Type::leaf("Binary"),
        ),
    );

    entries.insert(
        "Double",
        constructor(
            "Double",
            vec![Slot::required(&[STRING, NUMERIC])],
            Type::leaf("Double"),
        ),
    );

    let long_instance = Type::leaf("Long").with_attr(
        "toString",
        function(vec![Slot::optional(&[NUMERIC])], Type::leaf(STRING)),
    );
    let mut long_ctor = constructor(
        "Long",
        vec![Slot::required(&[STRING, NUMERIC]), Slot::optional(&[NUMERIC])],
        long_instance.clone(),
    );
    long_ctor.attr.insert(
        "fromBits",
        function(vec![Slot::required(&[NUMERIC]), Slot::required(&[NUMERIC])], long_instance),
    );
    entries.insert("Long", long_ctor.clone());
    let mut number_long = long_ctor;
    number_long.id = "Long";
    entries.insert("NumberLong", number_long);

    let int32_ctor = constructor(
        "Int32",
        vec![Slot::required(&[STRING, NUMERIC])],
        Type::leaf("Int32"),
    );
    entries.insert("Int32", int32_ctor.clone());
    entries.insert("NumberInt", int32_ctor);

    entries.insert("MaxKey", nullary_singleton("MaxKey"));
    entries.insert("MinKey", nullary_singleton("MinKey"));

    entries.insert(
        "Symbol",
        constructor("Symbol", vec![Slot::required(&[STRING])], Type::leaf("Symbol")),
    );

    entries.insert(
        "Timestamp",
        constructor(
            "Timestamp",
            vec![Slot::required(&["_integer"]), Slot::required(&["_integer"])],
            Type::leaf("Timestamp"),
        ),
    );

    entries.insert(
        "DBRef",
        constructor(
            "DBRef",
            vec![
                Slot::required(&[STRING]),
                Slot::required(&[OBJECT]),
                Slot::optional(&[STRING]),
            ],
            Type::leaf("DBRef"),
        ),
    );

    entries.insert(
        "BSONRegExp",
        constructor(
            "BSONRegExp",
            vec![Slot::required(&[STRING]), Slot::optional(&[STRING])],
            Type::leaf("BSONRegExp"),
        ),
    );

    let decimal128_ctor = constructor(
        "Decimal128",
        vec![Slot::required(&[STRING])],
        Type::leaf("Decimal128"),
    );
    entries.insert("Decimal128", decimal128_ctor.clone());
    entries.insert("NumberDecimal", decimal128_ctor);

    SymbolTable { entries }
}

trait WithId {
    fn with_id(self, id: &'static str) -> Self;
}

impl WithId for Type {
    fn with_id(mut self, id: &'static str) -> Self {
        self.id = id;
        self
    }
}
