//! The flat instruction stream consumed by the code generator.
//!
//! Expression ops push exactly one value onto the operand stack. Statement
//! ops pop their operands and leave the stack as they found it before
//! their operands were pushed.

use hir::{AttrKind, ExpressionContext, Literal, SourceSpan};

#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    pub kind: OpKind,
    pub span: SourceSpan,
}

impl Op {
    pub fn new(kind: OpKind, span: SourceSpan) -> Self {
        Op { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpKind {
    // Expressions
    Literal(Literal),
    GetSymbol(u32),
    GetFree(u32),
    GetFreeWithContext(u32, ExpressionContext),
    /// Pops the head expression.
    GetPath(Vec<String>),
    /// Pops its parts as params.
    Concat,
    /// Pops the head, params and hash.
    Call,
    HasBlock(u32),
    HasBlockParams(u32),
    /// Pops `n` expressions into one params list.
    PrepareArray(usize),
    /// Pops `n` key/value pairs into one hash.
    PrepareObject(usize),
    PushString(String),

    // Statements
    Append,
    TrustingAppend,
    Comment(String),
    OpenElement(String),
    OpenElementWithSplat(String),
    /// Pops the tag expression.
    OpenComponent {
        self_closing: bool,
        parameters: Vec<u32>,
    },
    OpenNamedBlock {
        name: String,
        parameters: Vec<u32>,
    },
    FlushElement,
    CloseElement,
    CloseComponent,
    CloseNamedBlock,
    /// Pops the value.
    Attr {
        kind: AttrKind,
        name: String,
        namespace: Option<&'static str>,
    },
    StaticArg(String),
    DynamicArg(String),
    AttrSplat(u32),
    /// Pops the head, params and hash.
    Modifier,
    StartBlock {
        name: String,
        parameters: Vec<u32>,
    },
    EndBlock,
    /// Pops the head, params and hash, and the finished blocks.
    InvokeBlock {
        has_inverse: bool,
    },
    /// Pops the params.
    Yield(u32),
    /// Pops the template name expression.
    Partial(Vec<u32>),
    Debugger(Vec<u32>),
    /// Pops `insertBefore` when present, then the destination.
    InElement {
        guid: String,
        has_insert_before: bool,
    },
}

impl OpKind {
    /// Whether the op pushes an expression instead of building a statement.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            OpKind::Literal(_)
                | OpKind::GetSymbol(_)
                | OpKind::GetFree(_)
                | OpKind::GetFreeWithContext(..)
                | OpKind::GetPath(_)
                | OpKind::Concat
                | OpKind::Call
                | OpKind::HasBlock(_)
                | OpKind::HasBlockParams(_)
                | OpKind::PrepareArray(_)
                | OpKind::PrepareObject(_)
                | OpKind::PushString(_)
        )
    }
}
