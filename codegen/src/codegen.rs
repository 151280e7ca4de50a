use crate::blocks::{Block, ComponentBlock, NamedBlock};
use crate::stack::{OperandStack, StackValue};

use data_structures::NonemptyStack;
use hir::Literal;
use log::{debug, trace};
use resolution::{Op, OpKind, Program};
use wire_format::{Expression, Hash, InlineBlock, Params, SerializedTemplateBlock, Statement, Value};

/// Runs the op stream through the stack machine and builds the template.
pub fn codegen(program: Program) -> SerializedTemplateBlock {
    let Program { ops, table } = program;
    let mut generator = CodeGenerator::new();
    for op in ops {
        generator.op(op);
    }
    let statements = generator.finish();

    let (symbols, upvars, has_eval) = table.into_parts();
    debug!(
        "generated {} statements ({} symbols, {} upvars)",
        statements.len(),
        symbols.len(),
        upvars.len()
    );
    SerializedTemplateBlock {
        symbols,
        upvars,
        has_eval,
        statements,
    }
}

struct CodeGenerator {
    stack: OperandStack,
    blocks: NonemptyStack<Block>,
    // Blocks that were ended but not yet consumed by their invocation
    finished: Vec<NamedBlock>,
}

impl CodeGenerator {
    fn new() -> Self {
        CodeGenerator {
            stack: OperandStack::default(),
            blocks: NonemptyStack::new(Block::Template(vec![])),
            finished: vec![],
        }
    }

    fn finish(self) -> Vec<Statement> {
        assert!(self.stack.is_empty(), "operands left on the stack");
        assert!(self.finished.is_empty(), "blocks left unconsumed");
        match self.blocks.into_root() {
            Ok(Block::Template(statements)) => statements,
            Ok(other) => panic!("the root block must be the template, found {:?}", other),
            Err(blocks) => panic!("{} blocks left open", blocks.len() - 1),
        }
    }

    fn op(&mut self, op: Op) {
        trace!("{:?}", op.kind);
        let is_expression = op.kind.is_expression();
        if is_expression {
            self.expression(op.kind);
        } else {
            self.statement(op.kind);
            assert!(self.stack.is_empty(), "operand stack must be empty between statements");
        }
    }

    fn push(&mut self, statement: Statement) {
        self.blocks.current_mut().push(statement);
    }

    fn pop_block(&mut self) -> Block {
        self.blocks.pop().expect("popped the template block")
    }

    fn current_component(&mut self) -> &mut ComponentBlock {
        match self.blocks.current_mut() {
            Block::Component(component) => component,
            other => panic!("expected an open component, found {:?}", other),
        }
    }

    fn expression(&mut self, kind: OpKind) {
        match kind {
            OpKind::Literal(literal) => self.stack.push_expr(literal_expression(literal)),
            OpKind::GetSymbol(slot) => self.stack.push_expr(Expression::GetSymbol(slot)),
            OpKind::GetFree(upvar) => self.stack.push_expr(Expression::GetFree(upvar)),
            OpKind::GetFreeWithContext(upvar, context) => {
                self.stack.push_expr(Expression::GetContextualFree(upvar, context));
            }
            OpKind::GetPath(tail) => {
                let head = self.stack.pop::<Expression>();
                self.stack.push_expr(Expression::GetPath(Box::new(head), tail));
            }
            OpKind::Concat => {
                let parts = self.stack.pop::<Params>();
                self.stack.push_expr(Expression::Concat(parts));
            }
            OpKind::Call => {
                let head = self.stack.pop::<Expression>();
                let params = self.stack.pop::<Params>();
                let hash = self.stack.pop::<Hash>();
                self.stack.push_expr(Expression::Call {
                    head: Box::new(head),
                    params,
                    hash,
                });
            }
            OpKind::HasBlock(slot) => {
                let block = Box::new(Expression::GetSymbol(slot));
                self.stack.push_expr(Expression::HasBlock(block));
            }
            OpKind::HasBlockParams(slot) => {
                let block = Box::new(Expression::GetSymbol(slot));
                self.stack.push_expr(Expression::HasBlockParams(block));
            }
            OpKind::PrepareArray(count) => {
                let params: Params = (0..count).map(|_| self.stack.pop::<Expression>()).collect();
                self.stack.push(StackValue::Params(params));
            }
            OpKind::PrepareObject(count) => {
                let mut hash: Hash = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.stack.pop::<String>();
                    let value = self.stack.pop::<Expression>();
                    hash.push((key, value));
                }
                self.stack.push(StackValue::Hash(hash));
            }
            OpKind::PushString(string) => self.stack.push(StackValue::String(string)),
            other => unreachable!("{:?} is not an expression", other),
        }
    }

    fn statement(&mut self, kind: OpKind) {
        match kind {
            OpKind::Append => {
                let value = self.stack.pop::<Expression>();
                self.push(Statement::Append(value));
            }
            OpKind::TrustingAppend => {
                let value = self.stack.pop::<Expression>();
                self.push(Statement::TrustingAppend(value));
            }
            OpKind::Comment(value) => self.push(Statement::Comment(value)),
            OpKind::OpenElement(tag) => self.push(Statement::OpenElement(tag)),
            OpKind::OpenElementWithSplat(tag) => self.push(Statement::OpenElementWithSplat(tag)),
            OpKind::OpenComponent {
                self_closing,
                parameters,
            } => {
                let tag = self.stack.pop::<Expression>();
                let component = ComponentBlock::new(tag, self_closing, parameters);
                self.blocks.push(Block::Component(component));
            }
            OpKind::OpenNamedBlock { name, parameters } => {
                self.blocks.push(Block::Named(NamedBlock::new(name, parameters)));
            }
            OpKind::FlushElement => match self.blocks.current_mut() {
                Block::Component(component) if !component.is_flushed() => component.flush(),
                block => block.push(Statement::FlushElement),
            },
            OpKind::CloseElement => self.push(Statement::CloseElement),
            OpKind::CloseComponent => match self.pop_block() {
                Block::Component(component) => self.push(component.finish()),
                other => panic!("closed a component but {:?} was open", other),
            },
            OpKind::CloseNamedBlock => match self.pop_block() {
                Block::Named(block) => self.current_component().push_named_block(block),
                other => panic!("closed a named block but {:?} was open", other),
            },
            OpKind::Attr { kind, name, namespace } => {
                let value = self.stack.pop::<Expression>();
                self.push(Statement::Attr {
                    kind,
                    name,
                    value,
                    namespace: namespace.map(String::from),
                });
            }
            OpKind::StaticArg(name) => {
                let value = self.stack.pop::<Expression>();
                self.push(Statement::StaticArg { name, value });
            }
            OpKind::DynamicArg(name) => {
                let value = self.stack.pop::<Expression>();
                self.push(Statement::DynamicArg { name, value });
            }
            OpKind::AttrSplat(slot) => self.push(Statement::AttrSplat(slot)),
            OpKind::Modifier => {
                let head = self.stack.pop::<Expression>();
                let params = self.stack.pop::<Params>();
                let hash = self.stack.pop::<Hash>();
                self.push(Statement::Modifier { head, params, hash });
            }
            OpKind::StartBlock { name, parameters } => {
                self.blocks.push(Block::Named(NamedBlock::new(name, parameters)));
            }
            OpKind::EndBlock => match self.pop_block() {
                Block::Named(block) => self.finished.push(block),
                other => panic!("ended a block but {:?} was open", other),
            },
            OpKind::InvokeBlock { has_inverse } => {
                let mut blocks = vec![("default".to_string(), self.take_finished())];
                if has_inverse {
                    blocks.push(("else".to_string(), self.take_finished()));
                }
                let head = self.stack.pop::<Expression>();
                let params = self.stack.pop::<Params>();
                let hash = self.stack.pop::<Hash>();
                self.push(Statement::Block {
                    head,
                    params,
                    hash,
                    blocks,
                });
            }
            OpKind::Yield(to) => {
                let params = self.stack.pop::<Params>();
                self.push(Statement::Yield { to, params });
            }
            OpKind::Partial(eval_info) => {
                let expr = self.stack.pop::<Expression>();
                self.push(Statement::Partial { expr, eval_info });
            }
            OpKind::Debugger(eval_info) => {
                self.push(Statement::Debugger(eval_info));
            }
            OpKind::InElement {
                guid,
                has_insert_before,
            } => {
                let insert_before = if has_insert_before {
                    Some(self.stack.pop::<Expression>())
                } else {
                    None
                };
                let destination = self.stack.pop::<Expression>();
                let block = self.take_finished();
                self.push(Statement::InElement {
                    block,
                    guid,
                    destination,
                    insert_before,
                });
            }
            other => unreachable!("{:?} is not a statement", other),
        }
    }

    fn take_finished(&mut self) -> InlineBlock {
        self.finished
            .pop()
            .expect("a block invocation must follow its blocks")
            .block
    }
}

fn literal_expression(literal: Literal) -> Expression {
    let value = match literal {
        Literal::Undefined => return Expression::Undefined,
        Literal::String(string) => Value::String(string),
        Literal::Number(number) => Value::Number(number),
        Literal::Boolean(boolean) => Value::Boolean(boolean),
        Literal::Null => Value::Null,
    };
    Expression::Value(value)
}
