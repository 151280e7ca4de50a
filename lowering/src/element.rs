use crate::classify::{classify_element, ElementKind};
use crate::keywords;
use crate::lower::{is_helper_invocation, syntax_error, LoweringContext};

use diagnostics::CompileResult as Result;
use hir::{AttrKind, Expr, ExprKind, ExpressionContext, ScopeId, Statement, StatementKind};
use log::trace;
use syntax::ast;

const XLINK: &str = "http://www.w3.org/1999/xlink";
const XML: &str = "http://www.w3.org/XML/1998/namespace";
const XMLNS: &str = "http://www.w3.org/2000/xmlns/";

/// The namespace of attributes that the DOM only accepts namespaced.
pub(crate) fn attr_namespace(name: &str) -> Option<&'static str> {
    match name {
        "xlink:actuate" | "xlink:arcrole" | "xlink:href" | "xlink:role" | "xlink:show" | "xlink:title"
        | "xlink:type" => Some(XLINK),
        "xml:base" | "xml:lang" | "xml:space" => Some(XML),
        "xmlns" | "xmlns:xlink" => Some(XMLNS),
        _ => None,
    }
}

impl LoweringContext<'_> {
    pub(crate) fn lower_element(&mut self, element: &ast::ElementNode, out: &mut Vec<Statement>) -> Result<()> {
        let kind = classify_element(element, |name| self.is_local(name));
        trace!("<{}> classified as {:?}", element.tag, kind);
        let line = element.loc.start.line;

        if kind == ElementKind::NamedBlock {
            return Err(syntax_error(
                format!(
                    "Unexpected named block <{}> outside of a component invocation (on line {})",
                    element.tag, line
                ),
                element.loc,
            ));
        }
        if element.self_closing && !element.children.is_empty() {
            return Err(syntax_error(
                format!("<{} /> is self-closing and cannot have children (on line {})", element.tag, line),
                element.loc,
            ));
        }
        if !kind.is_component_like() && !element.block_params.is_empty() {
            return Err(syntax_error(
                format!(
                    "Unexpected block params in <{}>: simple elements cannot have block params (on line {})",
                    element.tag, line
                ),
                element.loc,
            ));
        }

        let scope = if kind.is_component_like() {
            Some(self.child_scope(&element.block_params))
        } else {
            None
        };

        let open = match (&kind, scope) {
            (ElementKind::Component, Some(scope)) => {
                let name = self.customize_component_name(&element.tag);
                let context = ExpressionContext::ComponentHead;
                StatementKind::OpenComponent {
                    tag: Expr::new(ExprKind::GetVar { name, context }, element.loc),
                    self_closing: element.self_closing,
                    scope,
                }
            }
            (ElementKind::DynamicTag(path), Some(scope)) => StatementKind::OpenComponent {
                tag: self.lower_path(path, ExpressionContext::ComponentHead)?,
                self_closing: element.self_closing,
                scope,
            },
            (ElementKind::Dynamic, _) => StatementKind::OpenElementWithSplat(element.tag.clone()),
            _ => StatementKind::OpenSimpleElement(element.tag.clone()),
        };
        out.push(Statement::new(open, element.loc));

        self.lower_attributes(element, &kind, out)?;
        for modifier in &element.modifiers {
            let kind = StatementKind::Modifier {
                head: self.lower_path(&modifier.path, ExpressionContext::ModifierHead)?,
                params: self.lower_params(&modifier.params)?,
                hash: self.lower_hash(&modifier.hash)?,
            };
            out.push(Statement::new(kind, modifier.loc));
        }
        out.push(Statement::new(StatementKind::FlushElement { scope }, element.loc));

        match scope {
            Some(scope) => {
                self.enter_scope(scope);
                self.lower_component_children(element, out)?;
                self.exit_scope();
            }
            None => out.extend(self.lower_statements(&element.children)?),
        }

        let close = match kind {
            ElementKind::Component => StatementKind::CloseComponent,
            ElementKind::DynamicTag(_) => StatementKind::CloseDynamicComponent,
            _ => StatementKind::CloseElement,
        };
        out.push(Statement::new(close, element.loc));
        Ok(())
    }

    /// Attributes in source order, except that `type` goes last.
    fn lower_attributes(&self, element: &ast::ElementNode, kind: &ElementKind, out: &mut Vec<Statement>) -> Result<()> {
        let mut type_attr = None;
        for attr in &element.attributes {
            if attr.name == "type" {
                type_attr = Some(attr);
                continue;
            }
            out.push(self.lower_attr(attr, kind, element)?);
        }
        if let Some(attr) = type_attr {
            out.push(self.lower_attr(attr, kind, element)?);
        }
        Ok(())
    }

    fn lower_attr(&self, attr: &ast::AttrNode, kind: &ElementKind, element: &ast::ElementNode) -> Result<Statement> {
        if attr.name.starts_with('@') {
            if !kind.has_component_features() {
                return Err(syntax_error(
                    format!(
                        "{} is not a valid attribute name. @arguments are only allowed on components, but the tag for this element (`{}`) is a regular, non-component HTML element.",
                        attr.name, element.tag
                    ),
                    attr.loc,
                ));
            }
            let value = self.lower_attr_value(&attr.value)?;
            return Ok(Statement::new(
                StatementKind::Arg {
                    name: attr.name.clone(),
                    value,
                },
                attr.loc,
            ));
        }

        if attr.name == "...attributes" {
            return Ok(Statement::new(StatementKind::AttrSplat, attr.loc));
        }

        let value = self.lower_attr_value(&attr.value)?;
        let trusting = matches!(&attr.value, ast::AttrValue::MustacheStatement(mustache) if mustache.trusting);
        let component = kind.has_component_features();
        let attr_kind = match (value.is_literal(), trusting, component) {
            (true, _, false) => AttrKind::Static,
            (true, _, true) => AttrKind::StaticComponent,
            (false, true, false) => AttrKind::TrustingDynamic,
            (false, true, true) => AttrKind::TrustingComponent,
            (false, false, false) => AttrKind::Dynamic,
            (false, false, true) => AttrKind::Component,
        };
        let kind = StatementKind::Attr {
            kind: attr_kind,
            name: attr.name.clone(),
            namespace: attr_namespace(&attr.name),
            value,
        };
        Ok(Statement::new(kind, attr.loc))
    }

    fn lower_attr_value(&self, value: &ast::AttrValue) -> Result<Expr> {
        match value {
            ast::AttrValue::TextNode(text) => Ok(text_literal(text)),
            ast::AttrValue::MustacheStatement(mustache) => self.lower_attr_mustache(mustache),
            ast::AttrValue::ConcatStatement(concat) => {
                let list = concat
                    .parts
                    .iter()
                    .map(|part| match part {
                        ast::ConcatPart::TextNode(text) => Ok(text_literal(text)),
                        ast::ConcatPart::MustacheStatement(mustache) => self.lower_attr_mustache(mustache),
                    })
                    .collect::<Result<Vec<_>>>()?;
                let params = hir::Params { list, span: concat.loc };
                Ok(Expr::new(ExprKind::Concat(params), concat.loc))
            }
        }
    }

    fn lower_attr_mustache(&self, mustache: &ast::MustacheStatement) -> Result<Expr> {
        let path = match &mustache.path {
            ast::Expression::PathExpression(path) => path,
            other => return self.lower_expr(other, ExpressionContext::Expression),
        };
        if let Some(keyword) = keywords::expression_keyword(path) {
            return self.lower_has_block(keyword, &mustache.params, &mustache.hash, mustache.loc);
        }
        if is_helper_invocation(&mustache.params, &mustache.hash) {
            if !path.is_simple() {
                return Err(syntax_error(
                    format!(
                        "`{}` is not a valid name for a helper on line {}.",
                        path.original, mustache.loc.start.line
                    ),
                    mustache.loc,
                ));
            }
            return self.lower_call(path, &mustache.params, &mustache.hash, mustache.loc);
        }
        let context = if path.is_simple() {
            ExpressionContext::AppendSingleId
        } else {
            ExpressionContext::Expression
        };
        self.lower_path(path, context)
    }

    /// Lowers the body of a component. Direct `<:name>` children become
    /// named blocks, and once there is one nothing else may be rendered.
    fn lower_component_children(&mut self, element: &ast::ElementNode, out: &mut Vec<Statement>) -> Result<()> {
        let has_named_blocks = element
            .children
            .iter()
            .any(|child| matches!(child, ast::Statement::ElementNode(node) if node.tag.starts_with(':')));
        if !has_named_blocks {
            out.extend(self.lower_statements(&element.children)?);
            return Ok(());
        }

        for child in &element.children {
            match child {
                ast::Statement::ElementNode(node) if node.tag.starts_with(':') => {
                    self.lower_named_block(node, out)?;
                }
                ast::Statement::TextNode(text) if text.chars.trim().is_empty() => {}
                ast::Statement::CommentStatement(_) | ast::Statement::MustacheCommentStatement(_) => {}
                other => {
                    return Err(syntax_error(
                        format!(
                            "Unexpected content inside <{}> component invocation: when using named blocks, the tag cannot contain other content (on line {})",
                            element.tag,
                            other.loc().start.line
                        ),
                        other.loc(),
                    ))
                }
            }
        }
        Ok(())
    }

    fn lower_named_block(&mut self, element: &ast::ElementNode, out: &mut Vec<Statement>) -> Result<()> {
        if !element.attributes.is_empty() || !element.modifiers.is_empty() {
            return Err(syntax_error(
                format!(
                    "named block <{}> cannot have attributes, arguments, or modifiers (on line {})",
                    element.tag, element.loc.start.line
                ),
                element.loc,
            ));
        }
        let name = element.tag[1..].to_string();
        let scope: ScopeId = self.child_scope(&element.block_params);
        out.push(Statement::new(StatementKind::OpenNamedBlock { name, scope }, element.loc));
        self.enter_scope(scope);
        let body = self.lower_statements(&element.children)?;
        self.exit_scope();
        out.extend(body);
        out.push(Statement::new(StatementKind::CloseNamedBlock, element.loc));
        Ok(())
    }
}

fn text_literal(text: &ast::TextNode) -> Expr {
    Expr::new(ExprKind::Literal(ast::Literal::String(text.chars.clone())), text.loc)
}
