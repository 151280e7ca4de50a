use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Statements
    Append = 1,
    TrustingAppend = 2,
    Comment = 3,
    Modifier = 4,
    Block = 6,
    Component = 8,
    OpenElement = 10,
    OpenElementWithSplat = 11,
    FlushElement = 12,
    CloseElement = 13,
    StaticAttr = 14,
    DynamicAttr = 15,
    ComponentAttr = 16,
    AttrSplat = 17,
    Yield = 18,
    Partial = 19,
    DynamicArg = 20,
    StaticArg = 21,
    TrustingDynamicAttr = 22,
    TrustingComponentAttr = 23,
    StaticComponentAttr = 24,
    Debugger = 26,
    InElement = 40,

    // Expressions
    Undefined = 27,
    Call = 28,
    Concat = 29,
    GetSymbol = 30,
    GetFree = 32,
    GetFreeInAppendSingleId = 33,
    GetFreeInExpression = 34,
    GetFreeInCallHead = 35,
    GetFreeInBlockHead = 36,
    GetFreeInModifierHead = 37,
    GetFreeInComponentHead = 38,
    GetPath = 39,
    HasBlock = 48,
    HasBlockParams = 49,
}

const ALL: [Opcode; 37] = [
    Opcode::Append,
    Opcode::TrustingAppend,
    Opcode::Comment,
    Opcode::Modifier,
    Opcode::Block,
    Opcode::Component,
    Opcode::OpenElement,
    Opcode::OpenElementWithSplat,
    Opcode::FlushElement,
    Opcode::CloseElement,
    Opcode::StaticAttr,
    Opcode::DynamicAttr,
    Opcode::ComponentAttr,
    Opcode::AttrSplat,
    Opcode::Yield,
    Opcode::Partial,
    Opcode::DynamicArg,
    Opcode::StaticArg,
    Opcode::TrustingDynamicAttr,
    Opcode::TrustingComponentAttr,
    Opcode::StaticComponentAttr,
    Opcode::Debugger,
    Opcode::InElement,
    Opcode::Undefined,
    Opcode::Call,
    Opcode::Concat,
    Opcode::GetSymbol,
    Opcode::GetFree,
    Opcode::GetFreeInAppendSingleId,
    Opcode::GetFreeInExpression,
    Opcode::GetFreeInCallHead,
    Opcode::GetFreeInBlockHead,
    Opcode::GetFreeInModifierHead,
    Opcode::GetFreeInComponentHead,
    Opcode::GetPath,
    Opcode::HasBlock,
    Opcode::HasBlockParams,
];

impl Opcode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u64) -> Option<Opcode> {
        ALL.iter().copied().find(|op| u64::from(op.code()) == code)
    }

    /// The syntactic context a free-variable read opcode was compiled in.
    pub fn free_context(self) -> Option<ExpressionContext> {
        match self {
            Opcode::GetFreeInAppendSingleId => Some(ExpressionContext::AppendSingleId),
            Opcode::GetFreeInExpression => Some(ExpressionContext::Expression),
            Opcode::GetFreeInCallHead => Some(ExpressionContext::CallHead),
            Opcode::GetFreeInBlockHead => Some(ExpressionContext::BlockHead),
            Opcode::GetFreeInModifierHead => Some(ExpressionContext::ModifierHead),
            Opcode::GetFreeInComponentHead => Some(ExpressionContext::ComponentHead),
            _ => None,
        }
    }
}

/// Where a bare identifier appeared. The runtime resolves a free variable
/// differently depending on whether it is appended, invoked as a helper,
/// used as a block or modifier, or rendered as a component.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionContext {
    AppendSingleId,
    Expression,
    CallHead,
    BlockHead,
    ModifierHead,
    ComponentHead,
}

impl ExpressionContext {
    pub fn free_opcode(self) -> Opcode {
        match self {
            ExpressionContext::AppendSingleId => Opcode::GetFreeInAppendSingleId,
            ExpressionContext::Expression => Opcode::GetFreeInExpression,
            ExpressionContext::CallHead => Opcode::GetFreeInCallHead,
            ExpressionContext::BlockHead => Opcode::GetFreeInBlockHead,
            ExpressionContext::ModifierHead => Opcode::GetFreeInModifierHead,
            ExpressionContext::ComponentHead => Opcode::GetFreeInComponentHead,
        }
    }
}
