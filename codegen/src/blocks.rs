use wire_format::{Expression, Hash, InlineBlock, NamedBlocks, Statement};

/// A container that statements are appended to while generating code.
#[derive(Debug)]
pub(crate) enum Block {
    Template(Vec<Statement>),
    Named(NamedBlock),
    Component(ComponentBlock),
}

impl Block {
    pub fn push(&mut self, statement: Statement) {
        match self {
            Block::Template(statements) => statements.push(statement),
            Block::Named(block) => block.block.statements.push(statement),
            Block::Component(component) => component.push(statement),
        }
    }
}

#[derive(Debug)]
pub(crate) struct NamedBlock {
    pub name: String,
    pub block: InlineBlock,
}

impl NamedBlock {
    pub fn new(name: String, parameters: Vec<u32>) -> Self {
        NamedBlock {
            name,
            block: InlineBlock {
                statements: vec![],
                parameters,
            },
        }
    }
}

/// An open `<Component>`. Until its `FlushElement`, statements are the
/// component's attributes and arguments; afterwards they are its body.
#[derive(Debug)]
pub(crate) struct ComponentBlock {
    tag: Expression,
    self_closing: bool,
    parameters: Vec<u32>,
    attrs: Vec<Statement>,
    args: Hash,
    body: Vec<Statement>,
    named: NamedBlocks,
    flushed: bool,
}

impl ComponentBlock {
    pub fn new(tag: Expression, self_closing: bool, parameters: Vec<u32>) -> Self {
        ComponentBlock {
            tag,
            self_closing,
            parameters,
            attrs: vec![],
            args: vec![],
            body: vec![],
            named: vec![],
            flushed: false,
        }
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    pub fn flush(&mut self) {
        self.flushed = true;
    }

    fn push(&mut self, statement: Statement) {
        if self.flushed {
            self.body.push(statement);
            return;
        }
        match statement {
            Statement::StaticArg { name, value } | Statement::DynamicArg { name, value } => {
                self.args.push((name, value));
            }
            attr if attr.is_attribute() => self.attrs.push(attr),
            other => panic!("{:?} cannot appear before a component is flushed", other),
        }
    }

    pub fn push_named_block(&mut self, block: NamedBlock) {
        self.named.push((block.name, block.block));
    }

    pub fn finish(self) -> Statement {
        let blocks = if self.self_closing {
            None
        } else if !self.named.is_empty() {
            Some(self.named)
        } else {
            let default = InlineBlock {
                statements: self.body,
                parameters: self.parameters,
            };
            Some(vec![("default".to_string(), default)])
        };
        Statement::Component {
            tag: self.tag,
            attrs: self.attrs,
            args: self.args,
            blocks,
        }
    }
}
