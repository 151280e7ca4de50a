use quickcheck::{Arbitrary, Gen};
use syntax::ast;
use syntax::builders as b;

#[derive(Clone, Copy, Debug)]
enum StatementChoice {
    Text,
    Append,
    Helper,
    Each,
    Component,
    Element,
    Yield,
    HasBlock,
}

const CHOICES: &[StatementChoice] = &[
    StatementChoice::Text,
    StatementChoice::Append,
    StatementChoice::Helper,
    StatementChoice::Each,
    StatementChoice::Component,
    StatementChoice::Element,
    StatementChoice::Yield,
    StatementChoice::HasBlock,
];

/// Choices that don't nest, used once the depth limit is reached.
const LEAVES: &[StatementChoice] = &[
    StatementChoice::Text,
    StatementChoice::Append,
    StatementChoice::Helper,
    StatementChoice::Yield,
    StatementChoice::HasBlock,
];

const FREE_NAMES: &[&str] = &["name", "title", "@model", "this.value", "@model.id"];

const MAX_DEPTH: usize = 3;

/// A random template that always compiles.
#[derive(Clone, Debug)]
pub struct ArbitraryTemplate(pub ast::Template);

impl Arbitrary for ArbitraryTemplate {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut fuzzer = TemplateFuzzer::default();
        let body = fuzzer.gen_statements(g, 0);
        ArbitraryTemplate(b::template(body))
    }
}

/// Generates valid templates, tracking which block params are in scope
/// so appends can refer to them.
#[derive(Default, Debug)]
struct TemplateFuzzer {
    locals: Vec<String>,
    next_local: usize,
}

impl TemplateFuzzer {
    fn gen_statements(&mut self, g: &mut Gen, depth: usize) -> Vec<ast::Statement> {
        let count = usize::arbitrary(g) % 4 + 1;
        (0..count).map(|_| self.gen_statement(g, depth)).collect()
    }

    fn gen_statement(&mut self, g: &mut Gen, depth: usize) -> ast::Statement {
        let choices = if depth >= MAX_DEPTH { LEAVES } else { CHOICES };
        let choice = *g.choose(choices).unwrap_or(&StatementChoice::Text);
        match choice {
            StatementChoice::Text => b::text(*g.choose(&["Hello ", " ", "text"]).unwrap_or(&" ")).into(),
            StatementChoice::Append => b::append(&self.gen_name(g)),
            StatementChoice::Helper => {
                let param = b::var(&self.gen_name(g));
                b::mustache(
                    b::var("format"),
                    vec![param, b::string("x")],
                    vec![b::pair("style", b::var(&self.gen_name(g)))],
                )
                .into()
            }
            StatementChoice::Each => {
                let local = self.fresh_local();
                self.locals.push(local.clone());
                let body = self.gen_statements(g, depth + 1);
                self.locals.pop();
                let inverse = if bool::arbitrary(g) {
                    Some(b::program(&[], self.gen_statements(g, depth + 1)))
                } else {
                    None
                };
                b::block(
                    "each",
                    vec![b::var(&self.gen_name(g))],
                    vec![],
                    b::program(&[local.as_str()], body),
                    inverse,
                )
            }
            StatementChoice::Component => {
                let card = b::element("Card").with_attr("@title", b::mustache(b::var(&self.gen_name(g)), vec![], vec![]));
                if bool::arbitrary(g) {
                    card.self_closing().into()
                } else {
                    card.with_children(self.gen_statements(g, depth + 1)).into()
                }
            }
            StatementChoice::Element => {
                let class = b::concat(vec![
                    b::text("item ").into(),
                    b::mustache(b::var(&self.gen_name(g)), vec![], vec![]).into(),
                ]);
                b::element("div")
                    .with_attr("class", class)
                    .with_children(self.gen_statements(g, depth + 1))
                    .into()
            }
            StatementChoice::Yield => b::append("yield"),
            StatementChoice::HasBlock => {
                b::mustache(b::var("has-block"), vec![b::string("inverse")], vec![]).into()
            }
        }
    }

    /// A free name or one of the block params in scope.
    fn gen_name(&self, g: &mut Gen) -> String {
        if !self.locals.is_empty() && bool::arbitrary(g) {
            if let Some(local) = g.choose(&self.locals) {
                return local.clone();
            }
        }
        (*g.choose(FREE_NAMES).unwrap_or(&"name")).to_string()
    }

    fn fresh_local(&mut self) -> String {
        self.next_local += 1;
        format!("item{}", self.next_local)
    }
}
