//! The lowered form of a template: keywords are expanded, elements are
//! classified and every block carries the scope it binds, but variables
//! are still referenced by name.

use crate::symbol_table::{ScopeId, SymbolTable};

pub use syntax::ast::Literal;
pub use syntax::SourceSpan;
pub use wire_format::{AttrKind, ExpressionContext};

#[derive(Debug)]
pub struct Template {
    pub body: Vec<Statement>,
    pub table: SymbolTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: SourceSpan,
}

impl Statement {
    pub fn new(kind: StatementKind, span: SourceSpan) -> Self {
        Statement { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Append(Expr),
    AppendTrusted(Expr),
    AppendComment(String),
    /// `<div>` with nothing that needs runtime attribute merging.
    OpenSimpleElement(String),
    /// `<div ...attributes {{modifier}}>`
    OpenElementWithSplat(String),
    /// Components and dynamic tags. `scope` is entered at `FlushElement`.
    OpenComponent {
        tag: Expr,
        self_closing: bool,
        scope: ScopeId,
    },
    /// `<:name>` inside a component.
    OpenNamedBlock {
        name: String,
        scope: ScopeId,
    },
    FlushElement {
        scope: Option<ScopeId>,
    },
    CloseElement,
    CloseComponent,
    CloseDynamicComponent,
    CloseNamedBlock,
    Attr {
        kind: AttrKind,
        name: String,
        namespace: Option<&'static str>,
        value: Expr,
    },
    /// `@name={{value}}`. The name keeps its sigil.
    Arg {
        name: String,
        value: Expr,
    },
    AttrSplat,
    Modifier {
        head: Expr,
        params: Params,
        hash: Hash,
    },
    BlockInvocation {
        head: Expr,
        params: Params,
        hash: Hash,
        blocks: Vec<NamedBlock>,
    },
    Yield {
        target: String,
        params: Params,
    },
    Partial(Expr),
    Debugger,
    InElement {
        destination: Expr,
        insert_before: Option<Expr>,
        guid: String,
        block: NamedBlock,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedBlock {
    pub name: String,
    pub scope: ScopeId,
    pub body: Vec<Statement>,
    pub span: SourceSpan,
}

impl StatementKind {
    pub fn opens_container(&self) -> bool {
        matches!(
            self,
            StatementKind::OpenSimpleElement(_)
                | StatementKind::OpenElementWithSplat(_)
                | StatementKind::OpenComponent { .. }
                | StatementKind::OpenNamedBlock { .. }
        )
    }

    pub fn closes_container(&self) -> bool {
        matches!(
            self,
            StatementKind::CloseElement
                | StatementKind::CloseComponent
                | StatementKind::CloseDynamicComponent
                | StatementKind::CloseNamedBlock
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

impl Expr {
    pub fn new(kind: ExprKind, span: SourceSpan) -> Self {
        Expr { kind, span }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// `head.tail.tail`
    Path(Box<Expr>, Vec<String>),
    /// `@name`, without the sigil.
    GetArg(String),
    GetThis,
    GetVar {
        name: String,
        context: ExpressionContext,
    },
    HasBlock(String),
    HasBlockParams(String),
    Concat(Params),
    Call {
        head: Box<Expr>,
        params: Params,
        hash: Hash,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    pub list: Vec<Expr>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hash {
    pub pairs: Vec<HashPair>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Expr,
    pub span: SourceSpan,
}
