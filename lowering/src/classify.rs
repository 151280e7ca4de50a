use syntax::ast::{ElementNode, PathExpression};

/// How an element tag is opened and closed.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// `<:header>`
    NamedBlock,
    /// `<@arg>`, `<this.x>` or `<local>`, with the tag read as a path.
    DynamicTag(PathExpression),
    /// `<Foo>`
    Component,
    /// An html element that merges attributes at runtime.
    Dynamic,
    Html,
}

impl ElementKind {
    /// Components and dynamic tags take `@args` and a block.
    pub fn is_component_like(&self) -> bool {
        matches!(self, ElementKind::Component | ElementKind::DynamicTag(_))
    }

    /// Elements that accept `@args` and use the component attribute opcodes.
    pub fn has_component_features(&self) -> bool {
        matches!(
            self,
            ElementKind::Component | ElementKind::DynamicTag(_) | ElementKind::Dynamic
        )
    }
}

pub fn classify_element(element: &ElementNode, is_local: impl Fn(&str) -> bool) -> ElementKind {
    let tag = element.tag.as_str();
    let head = tag.split('.').next().unwrap_or(tag);

    if tag.starts_with(':') {
        ElementKind::NamedBlock
    } else if tag.starts_with('@') || head == "this" || is_local(head) {
        ElementKind::DynamicTag(tag_path(element))
    } else if tag.chars().next().map_or(false, char::is_uppercase) {
        ElementKind::Component
    } else if !element.modifiers.is_empty() || element.attributes.iter().any(|attr| attr.name == "...attributes") {
        ElementKind::Dynamic
    } else {
        ElementKind::Html
    }
}

fn tag_path(element: &ElementNode) -> PathExpression {
    let mut parts: Vec<String> = element.tag.split('.').map(String::from).collect();
    let this = parts[0] == "this";
    let data = parts[0].starts_with('@');
    if this {
        parts.remove(0);
    } else if data {
        parts[0].remove(0);
    }
    PathExpression {
        original: element.tag.clone(),
        this,
        data,
        parts,
        loc: element.loc,
    }
}
