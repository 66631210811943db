use crate::hooks::hook_for;
use crate::render::{quote_string, render_bool, render_null, render_numeric_literal};
use crate::target::Target;
use bt_common::{TranslateError, TranslateResult};
use bt_core::{check, TypedTree};
use bt_sandbox::HostValue;
use bt_syntax::{Ast, NodeId, NodeKind};

/// Parses, checks, and renders `source` as a `target`-language expression.
pub fn translate(target: Target, source: &str) -> TranslateResult<String> {
    let ast = bt_syntax::parse(source)?;
    let tree = check(&ast)?;
    let ctx = EmitCtx { target, ast: &ast, tree: &tree };
    ctx.emit(ast.root)
}

/// Threaded through every emission call: which target we're rendering
/// for, the parse tree, and its resolved types.
pub struct EmitCtx<'a> {
    pub target: Target,
    pub ast: &'a Ast,
    pub tree: &'a TypedTree<'a>,
}

impl<'a> EmitCtx<'a> {
    pub fn emit(&self, id: NodeId) -> TranslateResult<String> {
        let node = self.ast.node(id);
        match &node.kind {
            NodeKind::StringLiteral { value } => Ok(quote_string(self.target, value)),
            NodeKind::IntegerLiteral | NodeKind::DecimalLiteral | NodeKind::HexLiteral | NodeKind::OctalLiteral => {
                Ok(render_numeric_literal(self.target, node.get_text()))
            }
            NodeKind::BooleanLiteral(b) => Ok(render_bool(self.target, *b).to_string()),
            NodeKind::NullLiteral | NodeKind::UndefinedLiteral => Ok(render_null(self.target).to_string()),
            NodeKind::RegexLiteral { pattern, flags } => {
                let value = HostValue::Regex {
                    source: pattern.clone(),
                    flags: flags.clone(),
                };
                self.emit_regex_value(&value)
            }
            NodeKind::ArrayLiteral => self.emit_array(&node.children),
            NodeKind::ObjectLiteral => self.emit_object(&node.children),
            NodeKind::CallExpression | NodeKind::NewExpression => self.emit_call(id),
            NodeKind::Identifier => self.emit_identifier(id),
            other => Err(TranslateError::generic(format!("{other:?} cannot be emitted directly")).at(node.span)),
        }
    }

    /// A bare identifier reference, not a call: if its Type carries an
    /// emission template (the nullary BSON singletons, `MaxKey`/`MinKey`),
    /// render through that hook; otherwise emit the name as-is.
    fn emit_identifier(&self, id: NodeId) -> TranslateResult<String> {
        let node = self.ast.node(id);
        let ty = self
            .tree
            .type_of(id)
            .unwrap_or_else(|| panic!("tree walker must type every identifier before emission"));
        if ty.has_template {
            match hook_for(ty.id) {
                Some(hook) => hook(self, id),
                None => Err(TranslateError::reference(format!("no emitter registered for `{}`", ty.id)).at(node.span)),
            }
        } else {
            Ok(node.get_text().to_string())
        }
    }

    fn emit_call(&self, id: NodeId) -> TranslateResult<String> {
        let ty = self
            .tree
            .type_of(id)
            .unwrap_or_else(|| panic!("tree walker must type every call node before emission"));
        match hook_for(ty.id) {
            Some(hook) => hook(self, id),
            None => Err(TranslateError::reference(format!("no emitter registered for `{}`", ty.id)).at(self.ast.node(id).span)),
        }
    }

    fn emit_array(&self, elements: &[NodeId]) -> TranslateResult<String> {
        let rendered: Vec<String> = elements
            .iter()
            .map(|&e| {
                if matches!(self.ast.node(e).kind, NodeKind::Elision) {
                    Ok(render_null(self.target).to_string())
                } else {
                    self.emit(e)
                }
            })
            .collect::<TranslateResult<_>>()?;
        Ok(match self.target {
            Target::Python => format!("[{}]", rendered.join(", ")),
            Target::Java => format!("Arrays.asList({})", rendered.join(", ")),
        })
    }

    fn emit_object(&self, props: &[NodeId]) -> TranslateResult<String> {
        let mut entries = Vec::with_capacity(props.len());
        for &prop in props {
            let prop_node = self.ast.node(prop);
            let key_id = prop_node.children[0];
            let value_id = prop_node.children[1];
            let key = match &self.ast.node(key_id).kind {
                NodeKind::Identifier => self.ast.node(key_id).get_text().to_string(),
                NodeKind::StringLiteral { value } => value.clone(),
                other => return Err(TranslateError::generic(format!("unsupported property key {other:?}")).at(self.ast.node(key_id).span)),
            };
            entries.push((key, self.emit(value_id)?));
        }
        Ok(match self.target {
            Target::Python => {
                let pairs: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {v}", quote_string(self.target, k)))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Target::Java => {
                if entries.is_empty() {
                    "new Document()".to_string()
                } else {
                    let mut chained = format!(
                        "new Document({}, {})",
                        quote_string(self.target, &entries[0].0),
                        entries[0].1
                    );
                    for (k, v) in &entries[1..] {
                        chained.push_str(&format!(".append({}, {v})", quote_string(self.target, k)));
                    }
                    chained
                }
            }
        })
    }

    pub(crate) fn emit_regex_value(&self, value: &HostValue) -> TranslateResult<String> {
        let (source, flags) = match value {
            HostValue::Regex { source, flags } => (source, flags),
            _ => unreachable!(),
        };
        crate::hooks::render_regex(self, source, flags)
    }
}
