use crate::opcodes::{ExpressionContext, Opcode};

use serde::{Deserialize, Serialize};

/// A plain value. Encodes as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Positional arguments. An empty list encodes as `null`.
pub type Params = Vec<Expression>;

/// Named arguments in source order. An empty list encodes as `null`,
/// otherwise as `[keys, values]`.
pub type Hash = Vec<(String, Expression)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Undefined,
    Value(Value),
    GetSymbol(u32),
    /// A free variable read in strict mode, with no resolution context.
    GetFree(u32),
    GetContextualFree(u32, ExpressionContext),
    GetPath(Box<Expression>, Vec<String>),
    Concat(Params),
    Call {
        head: Box<Expression>,
        params: Params,
        hash: Hash,
    },
    HasBlock(Box<Expression>),
    HasBlockParams(Box<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Static,
    Dynamic,
    Component,
    StaticComponent,
    TrustingDynamic,
    TrustingComponent,
}

impl AttrKind {
    pub fn opcode(self) -> Opcode {
        match self {
            AttrKind::Static => Opcode::StaticAttr,
            AttrKind::Dynamic => Opcode::DynamicAttr,
            AttrKind::Component => Opcode::ComponentAttr,
            AttrKind::StaticComponent => Opcode::StaticComponentAttr,
            AttrKind::TrustingDynamic => Opcode::TrustingDynamicAttr,
            AttrKind::TrustingComponent => Opcode::TrustingComponentAttr,
        }
    }

    pub fn from_opcode(opcode: Opcode) -> Option<AttrKind> {
        match opcode {
            Opcode::StaticAttr => Some(AttrKind::Static),
            Opcode::DynamicAttr => Some(AttrKind::Dynamic),
            Opcode::ComponentAttr => Some(AttrKind::Component),
            Opcode::StaticComponentAttr => Some(AttrKind::StaticComponent),
            Opcode::TrustingDynamicAttr => Some(AttrKind::TrustingDynamic),
            Opcode::TrustingComponentAttr => Some(AttrKind::TrustingComponent),
            _ => None,
        }
    }
}

/// A block body with the slots of its block params.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineBlock {
    pub statements: Vec<Statement>,
    pub parameters: Vec<u32>,
}

/// Block tables encode as `[names, blocks]`.
pub type NamedBlocks = Vec<(String, InlineBlock)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Append(Expression),
    TrustingAppend(Expression),
    Comment(String),
    Modifier {
        head: Expression,
        params: Params,
        hash: Hash,
    },
    Block {
        head: Expression,
        params: Params,
        hash: Hash,
        blocks: NamedBlocks,
    },
    Component {
        tag: Expression,
        attrs: Vec<Statement>,
        args: Hash,
        /// `None` for self-closing components.
        blocks: Option<NamedBlocks>,
    },
    OpenElement(String),
    OpenElementWithSplat(String),
    FlushElement,
    CloseElement,
    Attr {
        kind: AttrKind,
        name: String,
        value: Expression,
        namespace: Option<String>,
    },
    StaticArg {
        name: String,
        value: Expression,
    },
    DynamicArg {
        name: String,
        value: Expression,
    },
    AttrSplat(u32),
    Yield {
        to: u32,
        params: Params,
    },
    Partial {
        expr: Expression,
        eval_info: Vec<u32>,
    },
    Debugger(Vec<u32>),
    InElement {
        block: InlineBlock,
        guid: String,
        destination: Expression,
        insert_before: Option<Expression>,
    },
}

impl Statement {
    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            Statement::Attr { .. } | Statement::AttrSplat(_) | Statement::Modifier { .. }
        )
    }
}

/// The compiled form of one template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SerializedTemplateBlock {
    pub symbols: Vec<String>,
    pub upvars: Vec<String>,
    pub has_eval: bool,
    pub statements: Vec<Statement>,
}
