//! Built-in mustaches and blocks that lower to dedicated statements instead
//! of helper invocations.

use crate::lower::{syntax_error, LoweringContext};

use diagnostics::CompileResult as Result;
use hir::{ExpressionContext, Statement, StatementKind};
use syntax::ast;
use syntax::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StatementKeyword {
    Yield,
    Partial,
    Debugger,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ExpressionKeyword {
    HasBlock,
    HasBlockParams,
}

impl ExpressionKeyword {
    fn name(self) -> &'static str {
        match self {
            ExpressionKeyword::HasBlock => "has-block",
            ExpressionKeyword::HasBlockParams => "has-block-params",
        }
    }
}

pub(crate) fn statement_keyword(path: &ast::PathExpression) -> Option<StatementKeyword> {
    match path.original.as_str() {
        "yield" => Some(StatementKeyword::Yield),
        "partial" => Some(StatementKeyword::Partial),
        "debugger" => Some(StatementKeyword::Debugger),
        _ => None,
    }
}

pub(crate) fn expression_keyword(path: &ast::PathExpression) -> Option<ExpressionKeyword> {
    match path.original.as_str() {
        "has-block" => Some(ExpressionKeyword::HasBlock),
        "has-block-params" => Some(ExpressionKeyword::HasBlockParams),
        _ => None,
    }
}

pub(crate) fn is_in_element(path: &ast::PathExpression) -> bool {
    path.original == "in-element"
}

/// The block name checked by `has-block` and `has-block-params`.
pub(crate) fn has_block_target(
    keyword: ExpressionKeyword,
    params: &[ast::Expression],
    hash: &ast::Hash,
    span: SourceSpan,
) -> Result<String> {
    if !hash.pairs.is_empty() {
        return Err(syntax_error(
            format!("{} does not take any named arguments", keyword.name()),
            span,
        ));
    }
    match params {
        [] => Ok("default".to_string()),
        [ast::Expression::StringLiteral { value, .. }] => Ok(value.clone()),
        [other] => Err(syntax_error(
            format!("you can only yield to a literal value (on line {})", span.start.line),
            other.loc(),
        )),
        _ => Err(syntax_error(
            format!(
                "{} only takes a single positional argument (on line {})",
                keyword.name(),
                span.start.line
            ),
            span,
        )),
    }
}

impl LoweringContext<'_> {
    /// `{{yield a b to="inverse"}}`
    pub(crate) fn lower_yield(&mut self, mustache: &ast::MustacheStatement) -> Result<Statement> {
        let target = match mustache.hash.pairs.as_slice() {
            [] => "default".to_string(),
            [pair] if pair.key == "to" => match &pair.value {
                ast::Expression::StringLiteral { value, .. } => value.clone(),
                other => return Err(syntax_error("you can only yield to a literal value", other.loc())),
            },
            [first, ..] => {
                return Err(syntax_error(
                    "yield only takes a single named argument: 'to'",
                    first.loc,
                ))
            }
        };
        let params = self.lower_params(&mustache.params)?;
        Ok(Statement::new(StatementKind::Yield { target, params }, mustache.loc))
    }

    /// `{{partial "name"}}`
    pub(crate) fn lower_partial(&mut self, mustache: &ast::MustacheStatement) -> Result<Statement> {
        let span = mustache.loc;
        let line = span.start.line;
        let expr = match mustache.params.as_slice() {
            [] => {
                return Err(syntax_error(
                    format!(
                        "Partial found with no arguments. You must specify a template name. (on line {})",
                        line
                    ),
                    span,
                ))
            }
            [expr] => expr,
            params => {
                return Err(syntax_error(
                    format!(
                        "Partial found with {} arguments. You must specify a template name. (on line {})",
                        params.len(),
                        line
                    ),
                    span,
                ))
            }
        };
        if !mustache.hash.pairs.is_empty() {
            return Err(syntax_error(
                format!("Partial does not take any named arguments (on line {})", line),
                span,
            ));
        }
        if mustache.trusting {
            return Err(syntax_error(
                format!(
                    "{{{{{{partial ...}}}}}} is not supported, please use {{{{partial ...}}}} instead (on line {})",
                    line
                ),
                span,
            ));
        }

        let expr = self.lower_expr(expr, ExpressionContext::Expression)?;
        self.table.set_has_eval();
        Ok(Statement::new(StatementKind::Partial(expr), span))
    }

    /// `{{debugger}}`
    pub(crate) fn lower_debugger(&mut self, mustache: &ast::MustacheStatement) -> Result<Statement> {
        if !mustache.hash.pairs.is_empty() {
            return Err(syntax_error(
                "debugger does not take any named arguments",
                mustache.loc,
            ));
        }
        if !mustache.params.is_empty() {
            return Err(syntax_error(
                "debugger does not take any positional arguments",
                mustache.loc,
            ));
        }
        self.table.set_has_eval();
        Ok(Statement::new(StatementKind::Debugger, mustache.loc))
    }

    /// `{{#in-element destination insertBefore=null}}...{{/in-element}}`
    pub(crate) fn lower_in_element(&mut self, block: &ast::BlockStatement) -> Result<Statement> {
        let line = block.loc.start.line;
        let destination = match block.params.as_slice() {
            [destination] => destination,
            _ => {
                return Err(syntax_error(
                    format!(
                        "`{{{{#in-element}}}}` takes a single positional argument, the destination element (on line {})",
                        line
                    ),
                    block.loc,
                ))
            }
        };

        let mut insert_before = None;
        for pair in &block.hash.pairs {
            match pair.key.as_str() {
                "insertBefore" => {
                    insert_before = Some(self.lower_expr(&pair.value, ExpressionContext::Expression)?);
                }
                "guid" => {
                    return Err(syntax_error(
                        format!(
                            "Cannot pass `guid` to `{{{{#in-element}}}}` on line {}.",
                            pair.value.loc().start.line
                        ),
                        pair.value.loc(),
                    ))
                }
                key => {
                    return Err(syntax_error(
                        format!("Cannot pass `{}` to `{{{{#in-element}}}}` on line {}.", key, pair.loc.start.line),
                        pair.loc,
                    ))
                }
            }
        }

        if block.inverse.is_some() {
            return Err(syntax_error(
                format!(
                    "`{{{{#in-element}}}}` does not take an `{{{{else}}}}` block (on line {})",
                    line
                ),
                block.loc,
            ));
        }

        let destination = self.lower_expr(destination, ExpressionContext::Expression)?;
        let guid = self.cursor();
        let body = self.lower_block("default", &block.program)?;
        let kind = StatementKind::InElement {
            destination,
            insert_before,
            guid,
            block: body,
        };
        Ok(Statement::new(kind, block.loc))
    }
}
