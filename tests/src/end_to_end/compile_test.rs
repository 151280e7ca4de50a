#[cfg(test)]
mod tests {
    use crate::support::{compile_body, compile_to_json, init_logger};

    use compiler::{compile, compile_with_options, CompileOptions};
    use serde_json::json;
    use syntax::ast;
    use syntax::builders as b;

    #[test]
    fn text_and_free_variables() {
        // Hello {{name}}
        let block = compile_to_json(vec![b::text("Hello ").into(), b::append("name")]);
        assert_eq!(
            block,
            json!({
                "symbols": [],
                "upvars": ["name"],
                "hasEval": false,
                "statements": [[1, "Hello "], [1, [33, 0]]]
            })
        );
    }

    #[test]
    fn yield_to_the_default_block() {
        let block = compile_to_json(vec![b::append("yield")]);
        assert_eq!(block["symbols"], json!(["&default"]));
        assert_eq!(block["statements"], json!([[18, 1, null]]));
    }

    #[test]
    fn debugger_captures_visible_locals() {
        let block = compile_to_json(vec![b::append("debugger")]);
        assert_eq!(block["hasEval"], json!(true));
        assert_eq!(block["statements"], json!([[26, []]]));

        // {{#each items as |item|}}{{debugger}}{{/each}}
        let each = b::block(
            "each",
            vec![b::var("items")],
            vec![],
            b::program(&["item"], vec![b::append("debugger")]),
            None,
        );
        let block = compile_to_json(vec![each]);
        assert_eq!(
            block,
            json!({
                "symbols": ["item"],
                "upvars": ["items", "each"],
                "hasEval": true,
                "statements": [[
                    6,
                    [36, 1],
                    [[34, 0]],
                    null,
                    [["default"], [{ "parameters": [1], "statements": [[26, [1]]] }]]
                ]]
            })
        );
    }

    #[test]
    fn self_closing_component_has_no_blocks() {
        // <Foo @x={{1}} />
        let foo = b::element("Foo")
            .with_attr("@x", b::mustache(b::number(1.0), vec![], vec![]))
            .self_closing();
        let block = compile_to_json(vec![foo.into()]);
        assert_eq!(block["upvars"], json!(["Foo"]));
        assert_eq!(block["statements"], json!([[8, [38, 0], [], [["@x"], [1]], null]]));
    }

    #[test]
    fn component_children_form_the_default_block() {
        // <Foo>{{yield}}</Foo>
        let foo = b::element("Foo").with_children(vec![b::append("yield")]);
        let block = compile_to_json(vec![foo.into()]);
        assert_eq!(block["symbols"], json!(["&default"]));
        assert_eq!(
            block["statements"],
            json!([[
                8,
                [38, 0],
                [],
                null,
                [["default"], [{ "parameters": [], "statements": [[18, 1, null]] }]]
            ]])
        );
    }

    #[test]
    fn inverse_and_else_share_a_slot() {
        // {{has-block "inverse"}}{{yield to="else"}}
        let block = compile_to_json(vec![
            b::mustache(b::var("has-block"), vec![b::string("inverse")], vec![]).into(),
            b::mustache(b::var("yield"), vec![], vec![b::pair("to", b::string("else"))]).into(),
        ]);
        assert_eq!(block["symbols"], json!(["&else"]));
        assert_eq!(block["statements"], json!([[1, [48, [30, 1]]], [18, 1, null]]));
    }

    #[test]
    fn each_with_else_and_block_params() {
        // {{#each items key="@index" as |item i|}}{{item.name}}{{i}}{{else}}none{{/each}}
        let each = b::block(
            "each",
            vec![b::var("items")],
            vec![b::pair("key", b::string("@index"))],
            b::program(&["item", "i"], vec![b::append("item.name"), b::append("i")]),
            Some(b::program(&[], vec![b::text("none").into()])),
        );
        let block = compile_to_json(vec![each]);
        assert_eq!(
            block,
            json!({
                "symbols": ["item", "i"],
                "upvars": ["items", "each"],
                "hasEval": false,
                "statements": [[
                    6,
                    [36, 1],
                    [[34, 0]],
                    [["key"], ["@index"]],
                    [
                        ["default", "else"],
                        [
                            {
                                "parameters": [1, 2],
                                "statements": [[1, [39, [30, 1], ["name"]]], [1, [30, 2]]]
                            },
                            { "parameters": [], "statements": [[1, "none"]] }
                        ]
                    ]
                ]]
            })
        );
    }

    #[test]
    fn helpers_and_sub_expressions() {
        // {{format (concat "a" b) style="short"}}
        let mustache = b::mustache(
            b::var("format"),
            vec![b::sexpr("concat", vec![b::string("a"), b::var("b")], vec![])],
            vec![b::pair("style", b::string("short"))],
        );
        let block = compile_to_json(vec![mustache.into()]);
        assert_eq!(block["upvars"], json!(["b", "concat", "format"]));
        assert_eq!(
            block["statements"],
            json!([[
                1,
                [
                    28,
                    [35, 2],
                    [[28, [35, 1], ["a", [34, 0]], null]],
                    [["style"], ["short"]]
                ]
            ]])
        );
    }

    #[test]
    fn undefined_and_null_stay_distinct() {
        // {{{helper undefined null}}}
        let triple = b::triple(b::var("helper"), vec![b::undefined(), b::null()], vec![]);
        let block = compile_to_json(vec![triple.into(), b::comment(" note "), b::mustache_comment("dropped")]);
        assert_eq!(
            block["statements"],
            json!([[2, [28, [35, 0], [[27], null], null]], [3, " note "]])
        );
    }

    #[test]
    fn plain_element_attributes() {
        // <input value={{v}} disabled={{{raw}}} type="text" class="a {{b}}">
        let input = b::element("input")
            .with_attr("value", b::mustache(b::var("v"), vec![], vec![]))
            .with_attr("disabled", b::triple(b::var("raw"), vec![], vec![]))
            .with_attr("type", b::text("text"))
            .with_attr(
                "class",
                b::concat(vec![
                    b::text("a ").into(),
                    b::mustache(b::var("b"), vec![], vec![]).into(),
                ]),
            );
        let block = compile_to_json(vec![input.into()]);
        assert_eq!(block["upvars"], json!(["v", "raw", "b"]));
        assert_eq!(
            block["statements"],
            json!([
                [10, "input"],
                [15, 2, [33, 0]],
                [22, "disabled", [33, 1]],
                [15, 0, [29, ["a ", [33, 2]]]],
                [14, 4, "text"],
                [12],
                [13]
            ])
        );
    }

    #[test]
    fn splattributes_and_modifiers() {
        // <div ...attributes class="c" {{on "click" this.save}}></div>
        let div = b::element("div")
            .with_attr("...attributes", b::text(""))
            .with_attr("class", b::text("c"))
            .with_modifier("on", vec![b::string("click"), b::var("this.save")], vec![]);
        let block = compile_to_json(vec![div.into()]);
        assert_eq!(block["symbols"], json!(["&attrs"]));
        assert_eq!(block["upvars"], json!(["on"]));
        assert_eq!(
            block["statements"],
            json!([
                [11, "div"],
                [17, 1],
                [24, 0, "c"],
                [4, [37, 0], ["click", [39, [30, 0], ["save"]]], null],
                [12],
                [13]
            ])
        );
    }

    #[test]
    fn namespaced_attributes() {
        let svg = b::element("svg")
            .with_attr("xmlns:xlink", b::text("http://www.w3.org/1999/xlink"))
            .with_children(vec![b::element("use").with_attr("xlink:href", b::text("#a")).into()]);
        let block = compile_to_json(vec![svg.into()]);
        assert_eq!(
            block["statements"],
            json!([
                [10, "svg"],
                [14, "xmlns:xlink", "http://www.w3.org/1999/xlink", "http://www.w3.org/2000/xmlns/"],
                [12],
                [10, "use"],
                [14, "xlink:href", "#a", "http://www.w3.org/1999/xlink"],
                [12],
                [13],
                [13]
            ])
        );
    }

    #[test]
    fn named_blocks() {
        // <Card @title="Hi"><:header as |h|>{{h}}</:header><:body>text</:body></Card>
        let card = b::element("Card").with_attr("@title", b::text("Hi")).with_children(vec![
            b::element(":header")
                .with_block_params(&["h"])
                .with_children(vec![b::append("h")])
                .into(),
            b::element(":body").with_children(vec![b::text("text").into()]).into(),
        ]);
        let block = compile_to_json(vec![card.into()]);
        assert_eq!(block["symbols"], json!(["h"]));
        assert_eq!(
            block["statements"],
            json!([[
                8,
                [38, 0],
                [],
                [["@title"], ["Hi"]],
                [
                    ["header", "body"],
                    [
                        { "parameters": [1], "statements": [[1, [30, 1]]] },
                        { "parameters": [], "statements": [[1, "text"]] }
                    ]
                ]
            ]])
        );
    }

    #[test]
    fn local_component_invocation() {
        // {{#let (component "x") as |Comp|}}<Comp @a={{1}} />{{/let}}
        let comp = b::element("Comp")
            .with_attr("@a", b::mustache(b::number(1.0), vec![], vec![]))
            .self_closing();
        let let_block = b::block(
            "let",
            vec![b::sexpr("component", vec![b::string("x")], vec![])],
            vec![],
            b::program(&["Comp"], vec![comp.into()]),
            None,
        );
        let block = compile_to_json(vec![let_block]);
        assert_eq!(block["symbols"], json!(["Comp"]));
        assert_eq!(block["upvars"], json!(["component", "let"]));
        assert_eq!(
            block["statements"],
            json!([[
                6,
                [36, 1],
                [[28, [35, 0], ["x"], null]],
                null,
                [
                    ["default"],
                    [{ "parameters": [1], "statements": [[8, [30, 1], [], [["@a"], [1]], null]] }]
                ]
            ]])
        );
    }

    #[test]
    fn in_element() {
        // {{#in-element this.el insertBefore=null}}hi{{/in-element}}
        let in_element = b::block(
            "in-element",
            vec![b::var("this.el")],
            vec![b::pair("insertBefore", b::null())],
            b::program(&[], vec![b::text("hi").into()]),
            None,
        );
        let block = compile_to_json(vec![in_element]);
        assert_eq!(
            block["statements"],
            json!([[
                40,
                { "parameters": [], "statements": [[1, "hi"]] },
                "%cursor:0%",
                [39, [30, 0], ["el"]],
                null
            ]])
        );
    }

    #[test]
    fn partials_capture_eval_info() {
        // {{#each xs as |x|}}{{partial "p"}}{{/each}}
        let each = b::block(
            "each",
            vec![b::var("xs")],
            vec![],
            b::program(&["x"], vec![b::mustache(b::var("partial"), vec![b::string("p")], vec![]).into()]),
            None,
        );
        let block = compile_to_json(vec![each]);
        assert_eq!(block["hasEval"], json!(true));
        assert_eq!(
            block["statements"][0][4][1][0]["statements"],
            json!([[19, "p", [1]]])
        );
    }

    #[test]
    fn strict_mode_free_variables() {
        init_logger();
        let options = CompileOptions {
            strict_mode: true,
            ..CompileOptions::default()
        };
        let template = b::template(vec![b::append("name"), b::element("Foo").self_closing().into()]);
        let block = compile_with_options(&template, "{{name}}<Foo />", &options).unwrap();
        assert_eq!(
            serde_json::to_value(&block).unwrap()["statements"],
            json!([[1, [32, 0]], [8, [32, 1], [], null, null]])
        );
    }

    #[test]
    fn compiles_parser_output() {
        init_logger();
        let template: ast::Template = serde_json::from_value(json!({
            "body": [{
                "type": "ElementNode",
                "tag": "h1",
                "children": [{
                    "type": "MustacheStatement",
                    "path": {
                        "type": "PathExpression",
                        "original": "@title",
                        "data": true,
                        "parts": ["title"]
                    }
                }]
            }]
        }))
        .unwrap();
        let block = compile(&template, "<h1>{{@title}}</h1>").unwrap();
        assert_eq!(block.symbols, vec!["@title".to_string()]);
        assert_eq!(
            serde_json::to_value(&block).unwrap()["statements"],
            json!([[10, "h1"], [12], [1, [30, 1]], [13]])
        );
    }

    #[test]
    fn compiling_twice_is_deterministic() {
        let body = || {
            vec![
                b::append("a"),
                b::element("Foo").with_children(vec![b::append("yield"), b::append("b")]).into(),
                b::append("a"),
            ]
        };
        assert_eq!(compile_body(body()), compile_body(body()));
    }
}
