//! Resolves every node in a parse tree against the symbol table, checking
//! arity and argument types along the way, without mutating the tree: the
//! result is a side table (`NodeId` -> `Type`) keyed the same way the
//! teacher's checker keys its own node-to-type maps off `NodeIndex`.
//!
//! Errors stop the walk at the first failure: there is no accumulation,
//! per the reporter's single-diagnostic contract.

use bt_common::{TranslateError, TranslateResult};
use bt_symbols::{symbol_table, Callable, Type};
use bt_syntax::{Ast, NodeId, NodeKind};
use rustc_hash::FxHashMap;

/// A parse tree annotated with the resolved `Type` of every node.
pub struct TypedTree<'a> {
    ast: &'a Ast,
    types: FxHashMap<NodeId, Type>,
}

impl<'a> TypedTree<'a> {
    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn type_of(&self, id: NodeId) -> Option<&Type> {
        self.types.get(&id)
    }

    pub fn root_type(&self) -> &Type {
        self.types
            .get(&self.ast.root)
            .expect("the root node is always typed by check()")
    }
}

/// Walks `ast` from its root, resolving every node's `Type`. This is the
/// whole of the tree-walker stage: the caller hands the result straight
/// to an emitter.
pub fn check(ast: &Ast) -> TranslateResult<TypedTree<'_>> {
    tracing::debug!("walking parse tree from root");
    let mut types = FxHashMap::default();
    check_node(ast, ast.root, &mut types)?;
    Ok(TypedTree { ast, types })
}

fn check_node(ast: &Ast, id: NodeId, types: &mut FxHashMap<NodeId, Type>) -> TranslateResult<Type> {
    let node = ast.node(id);
    tracing::trace!(node = ?node.kind, "visiting node");
    let ty = match &node.kind {
        NodeKind::StringLiteral { .. } => Type::leaf("_string"),
        NodeKind::IntegerLiteral => Type::leaf("_integer"),
        NodeKind::DecimalLiteral => Type::leaf("_decimal"),
        NodeKind::HexLiteral => Type::leaf("_hex"),
        NodeKind::OctalLiteral => Type::leaf("_octal"),
        NodeKind::BooleanLiteral(_) => Type::leaf("_boolean"),
        NodeKind::NullLiteral => Type::leaf("_null"),
        NodeKind::UndefinedLiteral => Type::leaf("_undefined"),
        NodeKind::RegexLiteral { .. } => Type::leaf("_regex"),
        NodeKind::ArrayLiteral => {
            for &child in &node.children {
                if !matches!(ast.node(child).kind, NodeKind::Elision) {
                    check_node(ast, child, types)?;
                }
            }
            Type::leaf("_array")
        }
        NodeKind::ObjectLiteral => {
            for &prop in &node.children {
                let prop_node = ast.node(prop);
                check_node(ast, prop_node.children[1], types)?;
            }
            Type::leaf("_object")
        }
        NodeKind::Identifier => {
            let name = node.get_text();
            symbol_table()
                .lookup(name)
                .cloned()
                .ok_or_else(|| TranslateError::reference(format!("unknown identifier `{name}`")).at(node.span))?
        }
        NodeKind::MemberAccess { name } => {
            let base = check_node(ast, node.children[0], types)?;
            base.lookup_attr(name)
                .cloned()
                .ok_or_else(|| TranslateError::attribute(format!("`{}` has no attribute `{name}`", base.id)).at(node.span))?
        }
        NodeKind::CallExpression => {
            let callee = node.children[0];
            check_call(ast, id, callee, &node.children[1..], types)?
        }
        NodeKind::NewExpression => {
            let target = node.children[0];
            if matches!(ast.node(target).kind, NodeKind::CallExpression) {
                let target_node = ast.node(target);
                check_call(ast, id, target_node.children[0], &target_node.children[1..], types)?
            } else {
                check_call(ast, id, target, &[], types)?
            }
        }
        other => {
            return Err(TranslateError::generic(format!("{other:?} cannot appear outside its parent")).at(node.span));
        }
    };
    types.insert(id, ty.clone());
    Ok(ty)
}

/// Shared by `CallExpression` and `NewExpression`: resolve the callee,
/// check it is actually callable, validate arity and argument types
/// against its `Slot` schema, and return the type the call yields.
fn check_call(
    ast: &Ast,
    call_id: NodeId,
    callee_id: NodeId,
    arg_ids: &[NodeId],
    types: &mut FxHashMap<NodeId, Type>,
) -> TranslateResult<Type> {
    let call_span = ast.node(call_id).span;
    let callee_name = ast.node(callee_id).get_text().to_string();
    let callee_ty = check_node(ast, callee_id, types)?;

    if callee_ty.callable == Callable::NotCallable {
        return Err(TranslateError::type_error(format!("`{callee_name}` is not callable")).at(call_span));
    }

    let required = callee_ty.args.iter().filter(|slot| !slot.optional).count();
    let max = callee_ty.args.len();
    if arg_ids.len() < required || arg_ids.len() > max {
        return Err(TranslateError::arity(format!(
            "`{callee_name}` expects {} argument(s), got {}",
            arity_description(required, max),
            arg_ids.len()
        ))
        .at(call_span));
    }

    for (slot, &arg_id) in callee_ty.args.iter().zip(arg_ids.iter()) {
        let arg_ty = check_node(ast, arg_id, types)?;
        if !slot.accepts(arg_ty.id) {
            return Err(TranslateError::type_error(format!(
                "`{callee_name}` argument expected {}, got {}",
                slot.describe(),
                arg_ty.id
            ))
            .at(ast.node(arg_id).span));
        }
    }

    Ok(callee_ty
        .instance
        .as_deref()
        .cloned()
        .unwrap_or_else(|| callee_ty.clone()))
}

fn arity_description(required: usize, max: usize) -> String {
    if required == max {
        required.to_string()
    } else {
        format!("{required}-{max}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(src: &str) -> TranslateResult<String> {
        let ast = bt_syntax::parse(src).map_err(TranslateError::from)?;
        let tree = check(&ast)?;
        Ok(tree.root_type().id.to_string())
    }

    #[test]
    fn resolves_object_id_constructor_call() {
        assert_eq!(typed(r#"new ObjectId("507f1f77bcf86cd799439011")"#).unwrap(), "ObjectId");
    }

    #[test]
    fn resolves_bare_nullary_singleton() {
        assert_eq!(typed("MinKey()").unwrap(), "MinKey");
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = typed("Frobnicate()").unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::ReferenceError);
    }

    #[test]
    fn rejects_arity_mismatch() {
        let err = typed("Timestamp(1)").unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::ArityMismatch);
    }

    #[test]
    fn rejects_wrong_argument_type() {
        let err = typed(r#"Timestamp("a", "b")"#).unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::TypeError);
    }

    #[test]
    fn resolves_member_access_chain() {
        assert_eq!(typed("Long.fromBits(0, 1)").unwrap(), "Long");
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = typed("Long.fromBytes(0, 1)").unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::AttributeError);
    }

    #[test]
    fn resolves_plain_literal_expression() {
        assert_eq!(typed("42").unwrap(), "_integer");
    }

    #[test]
    fn resolves_array_and_checks_its_elements() {
        let err = typed("[Timestamp(1)]").unwrap_err();
        assert_eq!(err.kind, bt_common::ErrorKind::ArityMismatch);
    }
}
