use crate::keywords::{self, ExpressionKeyword, StatementKeyword};

use data_structures::NonemptyStack;
use diagnostics::{CompileResult as Result, Diagnostic, Label};
use hir::{Expr, ExprKind, ExpressionContext, ScopeId, Statement, StatementKind, SymbolTable};
use log::{debug, trace};
use syntax::ast;
use syntax::SourceSpan;

pub(crate) fn syntax_error(message: impl Into<String>, span: SourceSpan) -> Diagnostic {
    Diagnostic::error()
        .with_message(message)
        .with_labels(vec![Label::primary(span)])
}

#[derive(Default, Clone, Copy)]
pub struct LoweringOptions<'a> {
    /// Renames static component tags, e.g. `Foo` to `foo`.
    pub customize_component_name: Option<&'a (dyn Fn(&str) -> String + Send + Sync)>,
}

pub fn lower_template(template: &ast::Template, options: LoweringOptions<'_>) -> Result<hir::Template> {
    LoweringContext::new(options).lower_template(template)
}

/// Mutable state for lowering one template.
pub struct LoweringContext<'a> {
    pub(crate) table: SymbolTable,
    // The scopes of the blocks we are currently inside of
    scopes: NonemptyStack<ScopeId>,
    // Used for generating `in-element` cursor ids
    cursor_count: u32,
    options: LoweringOptions<'a>,
}

impl<'a> LoweringContext<'a> {
    pub fn new(options: LoweringOptions<'a>) -> Self {
        let table = SymbolTable::new();
        let scopes = NonemptyStack::new(table.root());
        LoweringContext {
            table,
            scopes,
            cursor_count: 0,
            options,
        }
    }

    pub fn lower_template(mut self, template: &ast::Template) -> Result<hir::Template> {
        debug!("lowering template ({} statements)", template.body.len());
        let body = self.lower_statements(&template.body)?;
        assert_eq!(self.scopes.len(), 1, "unbalanced scopes after lowering");
        Ok(hir::Template {
            body,
            table: self.table,
        })
    }

    pub(crate) fn current_scope(&self) -> ScopeId {
        *self.scopes.current()
    }

    pub(crate) fn is_local(&self, name: &str) -> bool {
        self.table.has(self.current_scope(), name)
    }

    /// Creates a scope for `locals` without making it visible yet.
    pub(crate) fn child_scope(&mut self, locals: &[String]) -> ScopeId {
        let parent = self.current_scope();
        self.table.child(parent, locals)
    }

    pub(crate) fn enter_scope(&mut self, scope: ScopeId) {
        self.scopes.push(scope);
    }

    pub(crate) fn exit_scope(&mut self) {
        self.scopes.pop().expect("there must always be a scope");
    }

    pub(crate) fn cursor(&mut self) -> String {
        let id = self.cursor_count;
        self.cursor_count += 1;
        format!("%cursor:{}%", id)
    }

    pub(crate) fn customize_component_name(&self, tag: &str) -> String {
        match self.options.customize_component_name {
            Some(customize) => customize(tag),
            None => tag.to_string(),
        }
    }

    pub(crate) fn lower_statements(&mut self, statements: &[ast::Statement]) -> Result<Vec<Statement>> {
        let mut out = vec![];
        for statement in statements {
            self.lower_statement(statement, &mut out)?;
        }
        Ok(out)
    }

    fn lower_statement(&mut self, statement: &ast::Statement, out: &mut Vec<Statement>) -> Result<()> {
        match statement {
            ast::Statement::MustacheStatement(mustache) => {
                out.push(self.lower_mustache(mustache)?);
            }
            ast::Statement::BlockStatement(block) => {
                out.push(self.lower_block_statement(block)?);
            }
            ast::Statement::ElementNode(element) => {
                self.lower_element(element, out)?;
            }
            ast::Statement::TextNode(text) => {
                let value = Expr::new(ExprKind::Literal(ast::Literal::String(text.chars.clone())), text.loc);
                out.push(Statement::new(StatementKind::Append(value), text.loc));
            }
            ast::Statement::CommentStatement(comment) => {
                out.push(Statement::new(
                    StatementKind::AppendComment(comment.value.clone()),
                    comment.loc,
                ));
            }
            ast::Statement::MustacheCommentStatement(_) => {}
        }
        Ok(())
    }

    fn lower_mustache(&mut self, mustache: &ast::MustacheStatement) -> Result<Statement> {
        let span = mustache.loc;
        let path = match &mustache.path {
            ast::Expression::PathExpression(path) => path,
            // `{{"literal"}}`
            other => {
                let value = self.lower_expr(other, ExpressionContext::Expression)?;
                return Ok(append(value, mustache.trusting, span));
            }
        };

        if let Some(keyword) = keywords::statement_keyword(path) {
            trace!("lowering keyword {:?}", keyword);
            return match keyword {
                StatementKeyword::Yield => self.lower_yield(mustache),
                StatementKeyword::Partial => self.lower_partial(mustache),
                StatementKeyword::Debugger => self.lower_debugger(mustache),
            };
        }

        let value = if let Some(keyword) = keywords::expression_keyword(path) {
            self.lower_has_block(keyword, &mustache.params, &mustache.hash, span)?
        } else if is_helper_invocation(&mustache.params, &mustache.hash) {
            self.lower_call(path, &mustache.params, &mustache.hash, span)?
        } else {
            let context = if path.parts.len() > 1 || path.data {
                ExpressionContext::Expression
            } else {
                ExpressionContext::AppendSingleId
            };
            self.lower_path(path, context)?
        };
        Ok(append(value, mustache.trusting, span))
    }

    fn lower_block_statement(&mut self, block: &ast::BlockStatement) -> Result<Statement> {
        if keywords::is_in_element(&block.path) {
            return self.lower_in_element(block);
        }
        let mut blocks = vec![self.lower_block("default", &block.program)?];
        if let Some(inverse) = &block.inverse {
            blocks.push(self.lower_block("else", inverse)?);
        }
        let kind = StatementKind::BlockInvocation {
            head: self.lower_path(&block.path, ExpressionContext::BlockHead)?,
            params: self.lower_params(&block.params)?,
            hash: self.lower_hash(&block.hash)?,
            blocks,
        };
        Ok(Statement::new(kind, block.loc))
    }

    /// Lowers a block body inside a fresh scope binding its block params.
    pub(crate) fn lower_block(&mut self, name: &str, block: &ast::Block) -> Result<hir::NamedBlock> {
        let scope = self.child_scope(&block.block_params);
        self.enter_scope(scope);
        let body = self.lower_statements(&block.body)?;
        self.exit_scope();
        Ok(hir::NamedBlock {
            name: name.to_string(),
            scope,
            body,
            span: block.loc,
        })
    }

    pub(crate) fn lower_expr(&self, expr: &ast::Expression, context: ExpressionContext) -> Result<Expr> {
        match expr {
            ast::Expression::PathExpression(path) => self.lower_path(path, context),
            ast::Expression::SubExpression(sexpr) => match keywords::expression_keyword(&sexpr.path) {
                Some(keyword) => self.lower_has_block(keyword, &sexpr.params, &sexpr.hash, sexpr.loc),
                None => self.lower_call(&sexpr.path, &sexpr.params, &sexpr.hash, sexpr.loc),
            },
            literal => {
                let value = literal
                    .as_literal()
                    .expect("every other expression is a literal");
                Ok(Expr::new(ExprKind::Literal(value), literal.loc()))
            }
        }
    }

    pub(crate) fn lower_call(
        &self,
        path: &ast::PathExpression,
        params: &[ast::Expression],
        hash: &ast::Hash,
        span: SourceSpan,
    ) -> Result<Expr> {
        let kind = ExprKind::Call {
            head: Box::new(self.lower_path(path, ExpressionContext::CallHead)?),
            params: self.lower_params(params)?,
            hash: self.lower_hash(hash)?,
        };
        Ok(Expr::new(kind, span))
    }

    /// `@a.b` reads an argument, `this.a` reads `this`, and anything else
    /// starts with a variable read in `context`.
    pub(crate) fn lower_path(&self, path: &ast::PathExpression, context: ExpressionContext) -> Result<Expr> {
        let (head, tail) = if path.this {
            (ExprKind::GetThis, &path.parts[..])
        } else {
            let (first, tail) = path.parts.split_first().ok_or_else(|| {
                syntax_error(
                    format!("`{}` is not a valid path (on line {})", path.original, path.loc.start.line),
                    path.loc,
                )
            })?;
            let head = if path.data {
                ExprKind::GetArg(first.clone())
            } else {
                ExprKind::GetVar {
                    name: first.clone(),
                    context,
                }
            };
            (head, tail)
        };
        let head = Expr::new(head, path.loc);
        if tail.is_empty() {
            Ok(head)
        } else {
            Ok(Expr::new(ExprKind::Path(Box::new(head), tail.to_vec()), path.loc))
        }
    }

    pub(crate) fn lower_params(&self, params: &[ast::Expression]) -> Result<hir::Params> {
        let list = params
            .iter()
            .map(|param| self.lower_expr(param, ExpressionContext::Expression))
            .collect::<Result<Vec<_>>>()?;
        let span = match (params.first(), params.last()) {
            (Some(first), Some(last)) => first.loc().merge(last.loc()),
            _ => SourceSpan::synthetic(),
        };
        Ok(hir::Params { list, span })
    }

    pub(crate) fn lower_hash(&self, hash: &ast::Hash) -> Result<hir::Hash> {
        let pairs = hash
            .pairs
            .iter()
            .map(|pair| {
                Ok(hir::HashPair {
                    key: pair.key.clone(),
                    value: self.lower_expr(&pair.value, ExpressionContext::Expression)?,
                    span: pair.loc,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(hir::Hash {
            pairs,
            span: hash.loc,
        })
    }

    pub(crate) fn lower_has_block(
        &self,
        keyword: ExpressionKeyword,
        params: &[ast::Expression],
        hash: &ast::Hash,
        span: SourceSpan,
    ) -> Result<Expr> {
        let target = keywords::has_block_target(keyword, params, hash, span)?;
        let kind = match keyword {
            ExpressionKeyword::HasBlock => ExprKind::HasBlock(target),
            ExpressionKeyword::HasBlockParams => ExprKind::HasBlockParams(target),
        };
        Ok(Expr::new(kind, span))
    }
}

pub(crate) fn is_helper_invocation(params: &[ast::Expression], hash: &ast::Hash) -> bool {
    !params.is_empty() || !hash.pairs.is_empty()
}

fn append(value: Expr, trusting: bool, span: SourceSpan) -> Statement {
    let kind = if trusting {
        StatementKind::AppendTrusted(value)
    } else {
        StatementKind::Append(value)
    };
    Statement::new(kind, span)
}
