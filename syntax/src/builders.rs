//! Terse constructors for syntax trees. All nodes get a synthetic span;
//! callers that care about locations set `loc` themselves.

use crate::ast::*;
use crate::span::SourceSpan;

pub fn template(body: Vec<Statement>) -> Template {
    Template {
        body,
        loc: SourceSpan::synthetic(),
    }
}

pub fn program(block_params: &[&str], body: Vec<Statement>) -> Block {
    Block {
        body,
        block_params: strings(block_params),
        loc: SourceSpan::synthetic(),
    }
}

/// Parses a dotted path like `this.foo`, `@bar.baz` or `foo.bar`.
pub fn path(original: &str) -> PathExpression {
    let mut parts: Vec<String> = original.split('.').map(String::from).collect();
    let mut this = false;
    let mut data = false;
    if parts[0] == "this" {
        this = true;
        parts.remove(0);
    } else if let Some(name) = parts[0].strip_prefix('@').map(String::from) {
        data = true;
        parts[0] = name;
    }
    PathExpression {
        original: original.to_string(),
        this,
        data,
        parts,
        loc: SourceSpan::synthetic(),
    }
}

pub fn var(original: &str) -> Expression {
    Expression::PathExpression(path(original))
}

pub fn string(value: &str) -> Expression {
    Expression::StringLiteral {
        value: value.to_string(),
        loc: SourceSpan::synthetic(),
    }
}

pub fn number(value: f64) -> Expression {
    Expression::NumberLiteral {
        value,
        loc: SourceSpan::synthetic(),
    }
}

pub fn boolean(value: bool) -> Expression {
    Expression::BooleanLiteral {
        value,
        loc: SourceSpan::synthetic(),
    }
}

pub fn null() -> Expression {
    Expression::NullLiteral {
        loc: SourceSpan::synthetic(),
    }
}

pub fn undefined() -> Expression {
    Expression::UndefinedLiteral {
        loc: SourceSpan::synthetic(),
    }
}

pub fn pair(key: &str, value: Expression) -> HashPair {
    HashPair {
        key: key.to_string(),
        value,
        loc: SourceSpan::synthetic(),
    }
}

fn hash(pairs: Vec<HashPair>) -> Hash {
    Hash {
        pairs,
        loc: SourceSpan::synthetic(),
    }
}

pub fn sexpr(head: &str, params: Vec<Expression>, pairs: Vec<HashPair>) -> Expression {
    Expression::SubExpression(SubExpression {
        path: path(head),
        params,
        hash: hash(pairs),
        loc: SourceSpan::synthetic(),
    })
}

/// `{{head params hash}}`
pub fn mustache(head: Expression, params: Vec<Expression>, pairs: Vec<HashPair>) -> MustacheStatement {
    MustacheStatement {
        path: head,
        params,
        hash: hash(pairs),
        trusting: false,
        loc: SourceSpan::synthetic(),
    }
}

/// `{{{head params hash}}}`
pub fn triple(head: Expression, params: Vec<Expression>, pairs: Vec<HashPair>) -> MustacheStatement {
    MustacheStatement {
        trusting: true,
        ..mustache(head, params, pairs)
    }
}

/// Shorthand for `{{original}}`.
pub fn append(original: &str) -> Statement {
    mustache(var(original), vec![], vec![]).into()
}

pub fn block(
    head: &str,
    params: Vec<Expression>,
    pairs: Vec<HashPair>,
    program: Block,
    inverse: Option<Block>,
) -> Statement {
    Statement::BlockStatement(BlockStatement {
        path: path(head),
        params,
        hash: hash(pairs),
        program,
        inverse,
        loc: SourceSpan::synthetic(),
    })
}

pub fn text(chars: &str) -> TextNode {
    TextNode {
        chars: chars.to_string(),
        loc: SourceSpan::synthetic(),
    }
}

pub fn comment(value: &str) -> Statement {
    Statement::CommentStatement(CommentStatement {
        value: value.to_string(),
        loc: SourceSpan::synthetic(),
    })
}

pub fn mustache_comment(value: &str) -> Statement {
    Statement::MustacheCommentStatement(MustacheCommentStatement {
        value: value.to_string(),
        loc: SourceSpan::synthetic(),
    })
}

pub fn concat(parts: Vec<ConcatPart>) -> AttrValue {
    AttrValue::ConcatStatement(ConcatStatement {
        parts,
        loc: SourceSpan::synthetic(),
    })
}

pub fn attr(name: &str, value: impl Into<AttrValue>) -> AttrNode {
    AttrNode {
        name: name.to_string(),
        value: value.into(),
        loc: SourceSpan::synthetic(),
    }
}

pub fn element(tag: &str) -> ElementNode {
    ElementNode {
        tag: tag.to_string(),
        attributes: vec![],
        modifiers: vec![],
        children: vec![],
        block_params: vec![],
        self_closing: false,
        loc: SourceSpan::synthetic(),
    }
}

impl ElementNode {
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.push(attr(name, value));
        self
    }

    pub fn with_attr_node(mut self, attr: AttrNode) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_modifier(mut self, head: &str, params: Vec<Expression>, pairs: Vec<HashPair>) -> Self {
        self.modifiers.push(ElementModifierStatement {
            path: path(head),
            params,
            hash: hash(pairs),
            loc: SourceSpan::synthetic(),
        });
        self
    }

    pub fn with_children(mut self, children: Vec<Statement>) -> Self {
        self.children = children;
        self
    }

    pub fn with_block_params(mut self, params: &[&str]) -> Self {
        self.block_params = strings(params);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

impl From<MustacheStatement> for Statement {
    fn from(node: MustacheStatement) -> Self {
        Statement::MustacheStatement(node)
    }
}

impl From<ElementNode> for Statement {
    fn from(node: ElementNode) -> Self {
        Statement::ElementNode(node)
    }
}

impl From<TextNode> for Statement {
    fn from(node: TextNode) -> Self {
        Statement::TextNode(node)
    }
}

impl From<TextNode> for AttrValue {
    fn from(node: TextNode) -> Self {
        AttrValue::TextNode(node)
    }
}

impl From<MustacheStatement> for AttrValue {
    fn from(node: MustacheStatement) -> Self {
        AttrValue::MustacheStatement(node)
    }
}

impl From<TextNode> for ConcatPart {
    fn from(node: TextNode) -> Self {
        ConcatPart::TextNode(node)
    }
}

impl From<MustacheStatement> for ConcatPart {
    fn from(node: MustacheStatement) -> Self {
        ConcatPart::MustacheStatement(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_split_their_sigils() {
        let this_path = path("this.foo.bar");
        assert!(this_path.this);
        assert_eq!(this_path.parts, vec!["foo", "bar"]);

        let arg = path("@model.name");
        assert!(arg.data);
        assert_eq!(arg.parts, vec!["model", "name"]);

        assert!(path("name").is_simple());
        assert!(!path("this").is_simple());
        assert!(path("this").parts.is_empty());
    }
}
