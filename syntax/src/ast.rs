//! The template syntax tree handed to the compiler by the parser.
//!
//! Nodes are discriminated by a `type` field when serialized, so a parser
//! living outside of this workspace can hand its output over as JSON.

use crate::span::SourceSpan;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Template {
    pub body: Vec<Statement>,
    #[serde(default)]
    pub loc: SourceSpan,
}

/// The body of a block statement, with the names it binds (`as |x y|`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub body: Vec<Statement>,
    #[serde(default)]
    pub block_params: Vec<String>,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Statement {
    MustacheStatement(MustacheStatement),
    BlockStatement(BlockStatement),
    ElementNode(ElementNode),
    TextNode(TextNode),
    CommentStatement(CommentStatement),
    MustacheCommentStatement(MustacheCommentStatement),
}

impl Statement {
    pub fn loc(&self) -> SourceSpan {
        match self {
            Statement::MustacheStatement(node) => node.loc,
            Statement::BlockStatement(node) => node.loc,
            Statement::ElementNode(node) => node.loc,
            Statement::TextNode(node) => node.loc,
            Statement::CommentStatement(node) => node.loc,
            Statement::MustacheCommentStatement(node) => node.loc,
        }
    }
}

/// `{{path params hash}}`, or `{{{...}}}` when `trusting` is set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MustacheStatement {
    pub path: Expression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub trusting: bool,
    #[serde(default)]
    pub loc: SourceSpan,
}

/// `{{#path params hash}}program{{else}}inverse{{/path}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub path: PathExpression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    pub program: Block,
    #[serde(default)]
    pub inverse: Option<Block>,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<AttrNode>,
    #[serde(default)]
    pub modifiers: Vec<ElementModifierStatement>,
    #[serde(default)]
    pub children: Vec<Statement>,
    #[serde(default)]
    pub block_params: Vec<String>,
    #[serde(default)]
    pub self_closing: bool,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextNode {
    pub chars: String,
    #[serde(default)]
    pub loc: SourceSpan,
}

/// `<!-- value -->`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentStatement {
    pub value: String,
    #[serde(default)]
    pub loc: SourceSpan,
}

/// `{{!-- value --}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MustacheCommentStatement {
    pub value: String,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttrNode {
    pub name: String,
    pub value: AttrValue,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum AttrValue {
    TextNode(TextNode),
    MustacheStatement(MustacheStatement),
    ConcatStatement(ConcatStatement),
}

/// `class="a {{b}} c"`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConcatStatement {
    pub parts: Vec<ConcatPart>,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ConcatPart {
    TextNode(TextNode),
    MustacheStatement(MustacheStatement),
}

/// `<div {{on "click" this.go}}>`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElementModifierStatement {
    pub path: PathExpression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Expression {
    PathExpression(PathExpression),
    SubExpression(SubExpression),
    StringLiteral {
        value: String,
        #[serde(default)]
        loc: SourceSpan,
    },
    BooleanLiteral {
        value: bool,
        #[serde(default)]
        loc: SourceSpan,
    },
    NumberLiteral {
        value: f64,
        #[serde(default)]
        loc: SourceSpan,
    },
    NullLiteral {
        #[serde(default)]
        loc: SourceSpan,
    },
    UndefinedLiteral {
        #[serde(default)]
        loc: SourceSpan,
    },
}

impl Expression {
    pub fn loc(&self) -> SourceSpan {
        match self {
            Expression::PathExpression(path) => path.loc,
            Expression::SubExpression(sexpr) => sexpr.loc,
            Expression::StringLiteral { loc, .. }
            | Expression::BooleanLiteral { loc, .. }
            | Expression::NumberLiteral { loc, .. }
            | Expression::NullLiteral { loc }
            | Expression::UndefinedLiteral { loc } => *loc,
        }
    }

    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Expression::StringLiteral { value, .. } => Some(Literal::String(value.clone())),
            Expression::BooleanLiteral { value, .. } => Some(Literal::Boolean(*value)),
            Expression::NumberLiteral { value, .. } => Some(Literal::Number(*value)),
            Expression::NullLiteral { .. } => Some(Literal::Null),
            Expression::UndefinedLiteral { .. } => Some(Literal::Undefined),
            Expression::PathExpression(_) | Expression::SubExpression(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathExpression> {
        match self {
            Expression::PathExpression(path) => Some(path),
            _ => None,
        }
    }
}

impl From<PathExpression> for Expression {
    fn from(path: PathExpression) -> Self {
        Expression::PathExpression(path)
    }
}

/// A literal value, detached from its syntax.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Boolean(bool),
    Number(f64),
    Null,
    Undefined,
}

/// `foo.bar`, `this.foo` or `@foo.bar`. For `this` paths `parts` excludes
/// `this`; for `@` paths the first part has the sigil stripped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub original: String,
    #[serde(default)]
    pub this: bool,
    #[serde(default)]
    pub data: bool,
    pub parts: Vec<String>,
    #[serde(default)]
    pub loc: SourceSpan,
}

impl PathExpression {
    /// A single bare identifier, like `foo`.
    pub fn is_simple(&self) -> bool {
        !self.this && !self.data && self.parts.len() == 1
    }
}

/// `(path params hash)`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubExpression {
    pub path: PathExpression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Hash {
    pub pairs: Vec<HashPair>,
    #[serde(default)]
    pub loc: SourceSpan,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Expression,
    #[serde(default)]
    pub loc: SourceSpan,
}
