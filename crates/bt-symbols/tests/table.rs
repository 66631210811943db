use bt_symbols::{symbol_table, Callable};

#[test]
fn recognizes_every_class_named_in_the_spec() {
    let table = symbol_table();
    for name in [
        "Date",
        "RegExp",
        "Object",
        "Code",
        "ObjectId",
        "Binary",
        "Double",
        "Long",
        "Int32",
        "MaxKey",
        "MinKey",
        "Symbol",
        "Timestamp",
        "DBRef",
        "BSONRegExp",
        "Decimal128",
        "NumberInt",
        "NumberLong",
        "NumberDecimal",
        "ISODate",
    ] {
        assert!(table.lookup(name).is_some(), "missing symbol: {name}");
    }
}

#[test]
fn unknown_identifier_is_absent() {
    assert!(symbol_table().lookup("Frobnicate").is_none());
}

#[test]
fn timestamp_requires_exactly_two_integer_args() {
    let ty = symbol_table().lookup("Timestamp").unwrap();
    assert_eq!(ty.callable, Callable::Constructor);
    assert_eq!(ty.args.len(), 2);
    assert!(ty.args.iter().all(|s| !s.optional));
}

#[test]
fn code_accepts_one_or_two_args() {
    let ty = symbol_table().lookup("Code").unwrap();
    assert_eq!(ty.args.len(), 2);
    assert!(!ty.args[0].optional);
    assert!(ty.args[1].optional);
}

#[test]
fn long_from_bits_chains_to_a_string_returning_to_string() {
    let long = symbol_table().lookup("Long").unwrap();
    let from_bits = long.lookup_attr("fromBits").expect("fromBits");
    assert_eq!(from_bits.callable, Callable::Function);
    let instance = from_bits.instance.as_ref().unwrap();
    let to_string = instance.lookup_attr("toString").expect("toString");
    assert_eq!(to_string.callable, Callable::Function);
}

#[test]
fn number_long_shares_longs_schema() {
    let long = symbol_table().lookup("Long").unwrap();
    let number_long = symbol_table().lookup("NumberLong").unwrap();
    assert_eq!(long.args.len(), number_long.args.len());
    assert_eq!(number_long.id, "Long");
}
