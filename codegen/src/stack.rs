use wire_format::{Expression, Hash, Params};

/// A value on the operand stack.
#[derive(Debug)]
pub(crate) enum StackValue {
    Expr(Expression),
    Params(Params),
    Hash(Hash),
    String(String),
}

/// Values that can be popped off the operand stack with a type check.
pub(crate) trait Check: Sized {
    const NAME: &'static str;

    fn check(value: StackValue) -> Result<Self, StackValue>;
}

impl Check for Expression {
    const NAME: &'static str = "an expression";

    fn check(value: StackValue) -> Result<Self, StackValue> {
        match value {
            StackValue::Expr(expr) => Ok(expr),
            other => Err(other),
        }
    }
}

impl Check for Params {
    const NAME: &'static str = "params";

    fn check(value: StackValue) -> Result<Self, StackValue> {
        match value {
            StackValue::Params(params) => Ok(params),
            other => Err(other),
        }
    }
}

impl Check for Hash {
    const NAME: &'static str = "a hash";

    fn check(value: StackValue) -> Result<Self, StackValue> {
        match value {
            StackValue::Hash(hash) => Ok(hash),
            other => Err(other),
        }
    }
}

impl Check for String {
    const NAME: &'static str = "a string";

    fn check(value: StackValue) -> Result<Self, StackValue> {
        match value {
            StackValue::String(string) => Ok(string),
            other => Err(other),
        }
    }
}

/// The operand stack. A wrong or missing operand means the op stream is
/// malformed, which is a compiler bug, so pops panic instead of failing.
#[derive(Debug, Default)]
pub(crate) struct OperandStack {
    values: Vec<StackValue>,
}

impl OperandStack {
    pub fn push(&mut self, value: StackValue) {
        self.values.push(value);
    }

    pub fn push_expr(&mut self, expr: Expression) {
        self.values.push(StackValue::Expr(expr));
    }

    pub fn pop<T: Check>(&mut self) -> T {
        let value = self
            .values
            .pop()
            .unwrap_or_else(|| panic!("expected {} but the operand stack is empty", T::NAME));
        T::check(value)
            .unwrap_or_else(|value| panic!("expected {} on the operand stack, found {:?}", T::NAME, value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
