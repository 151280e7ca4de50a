#[cfg(test)]
mod tests {
    use crate::support::compile_body;

    use insta::assert_json_snapshot;
    use syntax::builders as b;

    #[test]
    fn greeting_paragraph() {
        // <p class="greeting">Hello {{name}}</p>
        let p = b::element("p")
            .with_attr("class", b::text("greeting"))
            .with_children(vec![b::text("Hello ").into(), b::append("name")]);
        assert_json_snapshot!(compile_body(vec![p.into()]), @r###"
        {
          "symbols": [],
          "upvars": [
            "name"
          ],
          "hasEval": false,
          "statements": [
            [
              10,
              "p"
            ],
            [
              14,
              0,
              "greeting"
            ],
            [
              12
            ],
            [
              1,
              "Hello "
            ],
            [
              1,
              [
                33,
                0
              ]
            ],
            [
              13
            ]
          ]
        }
        "###);
    }

    #[test]
    fn conditional_yield() {
        // {{#if this.show}}{{yield this.item}}{{/if}}
        let body = vec![b::block(
            "if",
            vec![b::var("this.show")],
            vec![],
            b::program(&[], vec![b::mustache(b::var("yield"), vec![b::var("this.item")], vec![]).into()]),
            None,
        )];
        assert_json_snapshot!(compile_body(body), @r###"
        {
          "symbols": [
            "&default"
          ],
          "upvars": [
            "if"
          ],
          "hasEval": false,
          "statements": [
            [
              6,
              [
                36,
                0
              ],
              [
                [
                  39,
                  [
                    30,
                    0
                  ],
                  [
                    "show"
                  ]
                ]
              ],
              null,
              [
                [
                  "default"
                ],
                [
                  {
                    "parameters": [],
                    "statements": [
                      [
                        18,
                        1,
                        [
                          [
                            39,
                            [
                              30,
                              0
                            ],
                            [
                              "item"
                            ]
                          ]
                        ]
                      ]
                    ]
                  }
                ]
              ]
            ]
          ]
        }
        "###);
    }
}
