use bt_syntax::ast::NodeKind;
use bt_syntax::parse;

#[test]
fn parses_object_id_call() {
    let ast = parse("ObjectId('5ab901c29ee65f5c8550c5b9')").unwrap();
    let root = ast.node(ast.root);
    assert_eq!(root.kind, NodeKind::CallExpression);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn parses_new_code_with_scope() {
    let ast = parse(r#"new Code("return 1", { x: 1 })"#).unwrap();
    let root = ast.node(ast.root);
    assert_eq!(root.kind, NodeKind::NewExpression);
    let call = ast.node(root.children[0]);
    assert_eq!(call.kind, NodeKind::CallExpression);
    assert_eq!(call.children.len(), 3);
}

#[test]
fn parses_array_with_elision() {
    let ast = parse("[1, , 3]").unwrap();
    let root = ast.node(ast.root);
    assert_eq!(root.kind, NodeKind::ArrayLiteral);
    assert_eq!(root.children.len(), 3);
    assert_eq!(ast.node(root.children[1]).kind, NodeKind::Elision);
}

#[test]
fn parses_regex_literal_with_flags() {
    let ast = parse("/foo/gi").unwrap();
    let root = ast.node(ast.root);
    match &root.kind {
        NodeKind::RegexLiteral { pattern, flags } => {
            assert_eq!(pattern, "foo");
            assert_eq!(flags, "gi");
        }
        other => panic!("expected regex literal, got {other:?}"),
    }
}

#[test]
fn parses_member_access_chain() {
    let ast = parse("Long.fromBits(1, 2)").unwrap();
    let root = ast.node(ast.root);
    assert_eq!(root.kind, NodeKind::CallExpression);
    let callee = ast.node(root.children[0]);
    match &callee.kind {
        NodeKind::MemberAccess { name } => assert_eq!(name, "fromBits"),
        other => panic!("expected member access, got {other:?}"),
    }
}

#[test]
fn rejects_trailing_garbage() {
    assert!(parse("1 2").is_err());
}
