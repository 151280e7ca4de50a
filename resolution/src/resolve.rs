use crate::ops::{Op, OpKind};

use data_structures::NonemptyStack;
use hir::{Expr, ExprKind, ExpressionContext, NamedBlock, ScopeId, SourceSpan, Statement, StatementKind, SymbolTable};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Free variables are emitted without a resolution context.
    pub strict_mode: bool,
}

/// A resolved template: the op stream and the table every slot in it
/// refers to.
#[derive(Debug)]
pub struct Program {
    pub ops: Vec<Op>,
    pub table: SymbolTable,
}

pub fn resolve(template: hir::Template, options: ResolveOptions) -> Program {
    let hir::Template { body, table } = template;
    let mut resolver = Resolver::new(table, options);
    resolver.statements(&body);
    debug!(
        "resolved {} ops ({} symbols, {} upvars)",
        resolver.ops.len(),
        resolver.table.symbols().len(),
        resolver.table.upvars().len()
    );
    assert_eq!(resolver.scopes.len(), 1, "unbalanced scopes after resolution");
    Program {
        ops: resolver.ops,
        table: resolver.table,
    }
}

struct Resolver {
    table: SymbolTable,
    scopes: NonemptyStack<ScopeId>,
    ops: Vec<Op>,
    options: ResolveOptions,
}

impl Resolver {
    fn new(table: SymbolTable, options: ResolveOptions) -> Self {
        let scopes = NonemptyStack::new(table.root());
        Resolver {
            table,
            scopes,
            ops: vec![],
            options,
        }
    }

    fn push(&mut self, kind: OpKind, span: SourceSpan) {
        trace!("{:?}", kind);
        self.ops.push(Op::new(kind, span));
    }

    fn current_scope(&self) -> ScopeId {
        *self.scopes.current()
    }

    fn exit_scope(&mut self) {
        self.scopes.pop().expect("there must always be a scope");
    }

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Statement) {
        let span = statement.span;
        match &statement.kind {
            StatementKind::Append(value) => {
                self.expr(value);
                self.push(OpKind::Append, span);
            }
            StatementKind::AppendTrusted(value) => {
                self.expr(value);
                self.push(OpKind::TrustingAppend, span);
            }
            StatementKind::AppendComment(value) => self.push(OpKind::Comment(value.clone()), span),
            StatementKind::OpenSimpleElement(tag) => self.push(OpKind::OpenElement(tag.clone()), span),
            StatementKind::OpenElementWithSplat(tag) => {
                self.push(OpKind::OpenElementWithSplat(tag.clone()), span);
            }
            StatementKind::OpenComponent {
                tag,
                self_closing,
                scope,
            } => {
                self.expr(tag);
                let kind = OpKind::OpenComponent {
                    self_closing: *self_closing,
                    parameters: self.table.slots(*scope).to_vec(),
                };
                self.push(kind, span);
            }
            StatementKind::OpenNamedBlock { name, scope } => {
                let kind = OpKind::OpenNamedBlock {
                    name: name.clone(),
                    parameters: self.table.slots(*scope).to_vec(),
                };
                self.push(kind, span);
                self.scopes.push(*scope);
            }
            StatementKind::FlushElement { scope } => {
                self.push(OpKind::FlushElement, span);
                if let Some(scope) = scope {
                    self.scopes.push(*scope);
                }
            }
            StatementKind::CloseElement => self.push(OpKind::CloseElement, span),
            StatementKind::CloseComponent | StatementKind::CloseDynamicComponent => {
                self.exit_scope();
                self.push(OpKind::CloseComponent, span);
            }
            StatementKind::CloseNamedBlock => {
                self.exit_scope();
                self.push(OpKind::CloseNamedBlock, span);
            }
            StatementKind::Attr {
                kind,
                name,
                namespace,
                value,
            } => {
                self.expr(value);
                let kind = OpKind::Attr {
                    kind: *kind,
                    name: name.clone(),
                    namespace: *namespace,
                };
                self.push(kind, span);
            }
            StatementKind::Arg { name, value } => {
                self.expr(value);
                let kind = if value.is_literal() {
                    OpKind::StaticArg(name.clone())
                } else {
                    OpKind::DynamicArg(name.clone())
                };
                self.push(kind, span);
            }
            StatementKind::AttrSplat => {
                let slot = self.table.allocate_block("attrs");
                self.push(OpKind::AttrSplat(slot), span);
            }
            StatementKind::Modifier { head, params, hash } => {
                self.args(params, hash);
                self.expr(head);
                self.push(OpKind::Modifier, span);
            }
            StatementKind::BlockInvocation {
                head,
                params,
                hash,
                blocks,
            } => {
                // The generator pops the default block first.
                for block in blocks.iter().rev() {
                    self.named_block(block);
                }
                self.args(params, hash);
                self.expr(head);
                let has_inverse = blocks.len() > 1;
                self.push(OpKind::InvokeBlock { has_inverse }, span);
            }
            StatementKind::Yield { target, params } => {
                self.params(params);
                let slot = self.table.allocate_block(target);
                self.push(OpKind::Yield(slot), span);
            }
            StatementKind::Partial(expr) => {
                self.expr(expr);
                let eval_info = self.table.eval_info(self.current_scope());
                self.push(OpKind::Partial(eval_info), span);
            }
            StatementKind::Debugger => {
                let eval_info = self.table.eval_info(self.current_scope());
                self.push(OpKind::Debugger(eval_info), span);
            }
            StatementKind::InElement {
                destination,
                insert_before,
                guid,
                block,
            } => {
                self.named_block(block);
                self.expr(destination);
                if let Some(insert_before) = insert_before {
                    self.expr(insert_before);
                }
                let kind = OpKind::InElement {
                    guid: guid.clone(),
                    has_insert_before: insert_before.is_some(),
                };
                self.push(kind, span);
            }
        }
    }

    fn named_block(&mut self, block: &NamedBlock) {
        let kind = OpKind::StartBlock {
            name: block.name.clone(),
            parameters: self.table.slots(block.scope).to_vec(),
        };
        self.push(kind, block.span);
        self.scopes.push(block.scope);
        self.statements(&block.body);
        self.exit_scope();
        self.push(OpKind::EndBlock, block.span);
    }

    /// Hash first, then params, so that consumers pop params before hash.
    fn args(&mut self, params: &hir::Params, hash: &hir::Hash) {
        self.hash(hash);
        self.params(params);
    }

    fn params(&mut self, params: &hir::Params) {
        for param in params.list.iter().rev() {
            self.expr(param);
        }
        self.push(OpKind::PrepareArray(params.list.len()), params.span);
    }

    fn hash(&mut self, hash: &hir::Hash) {
        for pair in hash.pairs.iter().rev() {
            self.expr(&pair.value);
            self.push(OpKind::PushString(pair.key.clone()), pair.span);
        }
        self.push(OpKind::PrepareObject(hash.pairs.len()), hash.span);
    }

    fn expr(&mut self, expr: &Expr) {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(value) => self.push(OpKind::Literal(value.clone()), span),
            ExprKind::Path(head, tail) => {
                self.expr(head);
                self.push(OpKind::GetPath(tail.clone()), span);
            }
            ExprKind::GetArg(name) => {
                let slot = self.table.allocate_named(name);
                self.push(OpKind::GetSymbol(slot), span);
            }
            ExprKind::GetThis => self.push(OpKind::GetSymbol(0), span),
            ExprKind::GetVar { name, context } => self.get_var(name, *context, span),
            ExprKind::HasBlock(target) => {
                let slot = self.table.allocate_block(target);
                self.push(OpKind::HasBlock(slot), span);
            }
            ExprKind::HasBlockParams(target) => {
                let slot = self.table.allocate_block(target);
                self.push(OpKind::HasBlockParams(slot), span);
            }
            ExprKind::Concat(parts) => {
                self.params(parts);
                self.push(OpKind::Concat, span);
            }
            ExprKind::Call { head, params, hash } => {
                self.args(params, hash);
                self.expr(head);
                self.push(OpKind::Call, span);
            }
        }
    }

    fn get_var(&mut self, name: &str, context: ExpressionContext, span: SourceSpan) {
        if let Some(slot) = self.table.get(self.current_scope(), name) {
            self.push(OpKind::GetSymbol(slot), span);
            return;
        }
        let upvar = self.table.allocate_free(name);
        debug!("free variable {} is upvar {}", name, upvar);
        let kind = if self.options.strict_mode {
            OpKind::GetFree(upvar)
        } else {
            OpKind::GetFreeWithContext(upvar, context)
        };
        self.push(kind, span);
    }
}
