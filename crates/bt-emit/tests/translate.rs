use bt_emit::{translate, Target};

#[test]
fn object_id_translates_to_both_targets() {
    let src = r#"new ObjectId("507f1f77bcf86cd799439011")"#;
    assert_eq!(
        translate(Target::Python, src).unwrap(),
        "ObjectId('507f1f77bcf86cd799439011')"
    );
    assert_eq!(
        translate(Target::Java, src).unwrap(),
        r#"new ObjectId("507f1f77bcf86cd799439011")"#
    );
}

#[test]
fn number_long_becomes_int64_in_python_and_long_in_java() {
    let src = r#"NumberLong("42")"#;
    assert_eq!(translate(Target::Python, src).unwrap(), "Int64(42)");
    assert_eq!(translate(Target::Java, src).unwrap(), "new Long(42)");
}

#[test]
fn date_decomposes_into_utc_components_for_python() {
    let out = translate(Target::Python, "ISODate(\"2018-03-27T18:42:05.123Z\")").unwrap();
    assert_eq!(out, "datetime.datetime(2018, 3, 27, 18, 42, 5, 123000, tzinfo=datetime.timezone.utc)");
}

#[test]
fn date_keeps_epoch_millis_for_java() {
    let out = translate(Target::Java, "ISODate(\"1970-01-01T00:00:00.000Z\")").unwrap();
    assert_eq!(out, "new java.util.Date(0L)");
}

#[test]
fn regexp_compiles_with_translated_flags() {
    assert_eq!(translate(Target::Python, r#"RegExp("^a", "i")"#).unwrap(), "re.compile('^a(?i)')");
    assert_eq!(
        translate(Target::Java, r#"RegExp("^a", "i")"#).unwrap(),
        r#"Pattern.compile("^a(?i)")"#
    );
}

#[test]
fn regexp_flag_letters_translate_and_sort_ascending() {
    assert_eq!(translate(Target::Python, "/foo/gi").unwrap(), "re.compile('foo(?is)')");
    assert_eq!(translate(Target::Java, "/foo/gi").unwrap(), r#"Pattern.compile("foo(?i)")"#);
}

#[test]
fn regexp_u_flag_maps_to_a_in_python_and_stays_u_in_java() {
    assert_eq!(translate(Target::Python, "/foo/u").unwrap(), "re.compile('foo(?a)')");
    assert_eq!(translate(Target::Java, "/foo/u").unwrap(), r#"Pattern.compile("foo(?u)")"#);
}

#[test]
fn regexp_y_flag_always_drops() {
    assert_eq!(translate(Target::Python, "/foo/y").unwrap(), "re.compile('foo')");
    assert_eq!(translate(Target::Java, "/foo/y").unwrap(), r#"Pattern.compile("foo")"#);
}

#[test]
fn bare_regex_literal_compiles_the_same_way_as_the_constructor() {
    assert_eq!(
        translate(Target::Python, "/^a/i").unwrap(),
        translate(Target::Python, r#"RegExp("^a", "i")"#).unwrap()
    );
}

#[test]
fn timestamp_is_emitted_straight_from_its_arguments() {
    assert_eq!(translate(Target::Python, "Timestamp(1, 2)").unwrap(), "Timestamp(1, 2)");
    assert_eq!(translate(Target::Java, "Timestamp(1, 2)").unwrap(), "new BSONTimestamp(1, 2)");
}

#[test]
fn array_and_object_containers_translate_per_target() {
    assert_eq!(translate(Target::Python, "[1, 2]").unwrap(), "[1, 2]");
    assert_eq!(translate(Target::Java, "[1, 2]").unwrap(), "Arrays.asList(1, 2)");
    assert_eq!(translate(Target::Python, r#"{a: 1}"#).unwrap(), "{'a': 1}");
    assert_eq!(translate(Target::Java, r#"{a: 1, b: 2}"#).unwrap(), r#"new Document("a", 1).append("b", 2)"#);
}

#[test]
fn binary_subtype_maps_through_the_per_target_table() {
    assert_eq!(
        translate(Target::Python, r#"Binary("abc", 4)"#).unwrap(),
        "Binary(bytes('abc', 'utf-8'), bson.binary.UUID_SUBTYPE)"
    );
    assert_eq!(
        translate(Target::Java, r#"Binary("abc", 4)"#).unwrap(),
        "new Binary(BsonBinarySubType.UUID_STANDARD.getValue(), \"abc\".getBytes())"
    );
}

#[test]
fn binary_without_a_subtype_omits_the_second_argument() {
    assert_eq!(translate(Target::Python, r#"Binary("abc")"#).unwrap(), "Binary(bytes('abc', 'utf-8'))");
}

#[test]
fn bare_nullary_singleton_reference_renders_through_its_template() {
    assert_eq!(translate(Target::Python, "MaxKey").unwrap(), "MaxKey()");
    assert_eq!(translate(Target::Java, "MinKey").unwrap(), "new MinKey()");
}

#[test]
fn object_create_is_a_verbatim_passthrough() {
    assert_eq!(
        translate(Target::Python, "Object.create({a: 1})").unwrap(),
        translate(Target::Python, "{a: 1}").unwrap()
    );
}

#[test]
fn legacy_octal_is_reformatted_only_for_python() {
    assert_eq!(translate(Target::Python, "0755").unwrap(), "0o755");
    assert_eq!(translate(Target::Java, "0755").unwrap(), "0755");
}

#[test]
fn unknown_identifier_is_a_reference_error() {
    let err = translate(Target::Python, "Frobnicate()").unwrap_err();
    assert_eq!(err.kind, bt_common::ErrorKind::ReferenceError);
}

#[test]
fn malformed_object_id_is_a_type_error() {
    let err = translate(Target::Python, r#"ObjectId("not-hex")"#).unwrap_err();
    assert_eq!(err.kind, bt_common::ErrorKind::TypeError);
}
