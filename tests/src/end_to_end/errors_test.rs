#[cfg(test)]
mod tests {
    use crate::support::init_logger;

    use compiler::{compile, Diagnostic};
    use serde_json::json;
    use syntax::ast;
    use syntax::builders as b;
    use syntax::{Position, SourceSpan};

    fn compile_error(body: Vec<ast::Statement>) -> Diagnostic {
        init_logger();
        compile(&b::template(body), "").unwrap_err()
    }

    fn at(line: u32, start: u32, end: u32) -> SourceSpan {
        SourceSpan::new(Position::new(line, start), Position::new(line, end))
    }

    #[test]
    fn arguments_on_html_elements_point_at_the_attribute() {
        let source = "<div @foo=\"bar\"></div>";
        let mut attr = b::attr("@foo", b::text("bar"));
        attr.loc = at(1, 5, 15);
        let mut div = b::element("div").with_attr_node(attr);
        div.loc = at(1, 0, 22);

        let error = compile(&b::template(vec![div.into()]), source).unwrap_err();
        assert_eq!(
            error.message,
            "@foo is not a valid attribute name. @arguments are only allowed on components, but the tag for this element (`div`) is a regular, non-component HTML element."
        );
        assert_eq!(error.primary_span(), Some(at(1, 5, 15)));

        let rendered = error.render("show.hbs", source);
        assert!(rendered.contains("error: @foo is not a valid attribute name."));
        assert!(rendered.contains("show.hbs:1:6"));
    }

    #[test]
    fn yield_targets_must_be_literals() {
        let error = compile_error(vec![b::mustache(
            b::var("yield"),
            vec![],
            vec![b::pair("to", b::var("name"))],
        )
        .into()]);
        assert_eq!(error.message, "you can only yield to a literal value");

        let error = compile_error(vec![b::mustache(
            b::var("yield"),
            vec![],
            vec![b::pair("as", b::string("else"))],
        )
        .into()]);
        assert_eq!(error.message, "yield only takes a single named argument: 'to'");
    }

    #[test]
    fn partials_need_exactly_one_name() {
        let error = compile_error(vec![b::append("partial")]);
        assert!(error.message.starts_with("Partial found with no arguments."));

        let error = compile_error(vec![b::mustache(
            b::var("partial"),
            vec![b::string("a"), b::string("b")],
            vec![],
        )
        .into()]);
        assert!(error.message.starts_with("Partial found with 2 arguments."));

        let error = compile_error(vec![b::triple(b::var("partial"), vec![b::string("a")], vec![]).into()]);
        assert!(error.message.starts_with("{{{partial ...}}} is not supported"));
    }

    #[test]
    fn debugger_takes_no_arguments() {
        let error = compile_error(vec![b::mustache(b::var("debugger"), vec![b::var("x")], vec![]).into()]);
        assert_eq!(error.message, "debugger does not take any positional arguments");
    }

    #[test]
    fn in_element_rejects_guid_and_else() {
        let error = compile_error(vec![b::block(
            "in-element",
            vec![b::var("el")],
            vec![b::pair("guid", b::string("x"))],
            b::program(&[], vec![]),
            None,
        )]);
        assert!(error.message.starts_with("Cannot pass `guid` to `{{#in-element}}`"));

        let error = compile_error(vec![b::block(
            "in-element",
            vec![b::var("el")],
            vec![],
            b::program(&[], vec![]),
            Some(b::program(&[], vec![])),
        )]);
        assert!(error.message.starts_with("`{{#in-element}}` does not take an `{{else}}` block"));
    }

    #[test]
    fn element_shape_errors() {
        let error = compile_error(vec![b::element("div").with_block_params(&["x"]).into()]);
        assert!(error
            .message
            .starts_with("Unexpected block params in <div>: simple elements cannot have block params"));

        let error = compile_error(vec![b::element(":header").into()]);
        assert!(error.message.starts_with("Unexpected named block <:header>"));

        let card = b::element("Card").with_children(vec![
            b::element(":header").into(),
            b::append("stray"),
        ]);
        let error = compile_error(vec![card.into()]);
        assert!(error
            .message
            .starts_with("Unexpected content inside <Card> component invocation"));
    }

    #[test]
    fn named_blocks_take_no_attributes() {
        let mut header = b::element(":header").with_attr("class", b::text("x"));
        header.loc = at(1, 5, 33);
        let card = b::element("Foo").with_children(vec![header.into()]);
        let error = compile_error(vec![card.into()]);
        assert_eq!(
            error.message,
            "named block <:header> cannot have attributes, arguments, or modifiers (on line 1)"
        );
        assert_eq!(error.primary_span(), Some(at(1, 5, 33)));

        let card = b::element("Foo").with_children(vec![b::element(":body")
            .with_modifier("on", vec![b::string("click")], vec![])
            .into()]);
        assert!(compile_error(vec![card.into()])
            .message
            .starts_with("named block <:body> cannot have attributes"));
    }

    #[test]
    fn arguments_are_allowed_next_to_splattributes() {
        // <div ...attributes @x="1"></div>
        init_logger();
        let div = b::element("div")
            .with_attr("...attributes", b::text(""))
            .with_attr("@x", b::text("1"));
        let block = compile(&b::template(vec![div.into()]), "<div ...attributes @x=\"1\"></div>").unwrap();
        assert_eq!(
            serde_json::to_value(&block).unwrap()["statements"],
            json!([[11, "div"], [17, 1], [21, "@x", "1"], [12], [13]])
        );

        let error = compile_error(vec![b::element("div").with_attr("@x", b::text("1")).into()]);
        assert!(error.message.starts_with("@x is not a valid attribute name."));
    }

    #[test]
    fn empty_paths_are_reported() {
        let mut path = b::path("x");
        path.original = String::new();
        path.parts.clear();
        let error = compile_error(vec![b::mustache(path.into(), vec![], vec![]).into()]);
        assert_eq!(error.message, "`` is not a valid path (on line 0)");
    }

    #[test]
    fn helpers_in_attributes_need_simple_names() {
        let div = b::element("div").with_attr(
            "class",
            b::mustache(b::var("this.format"), vec![b::var("x")], vec![]),
        );
        let error = compile_error(vec![div.into()]);
        assert!(error.message.starts_with("`this.format` is not a valid name for a helper"));
    }
}
