//! Acceptance and rejection corpora
//!
//! Inputs that must fail produce an error and no tree. Inputs that must
//! succeed are compared by node type sequence and key fields.

use integration_tests::{estree, node_types};
use parser::{parse, ParseOptions};
use serde_json::json;

fn assert_rejected(sources: &[&str], options: &ParseOptions) {
    for source in sources {
        if let Ok(program) = parse(source, options) {
            panic!("Expected {:?} to fail, got {:?}", source, program);
        }
    }
}

#[test]
fn test_rejects_invalid_scripts() {
    assert_rejected(
        &[
            "super.foo;",
            "let {...x = y} = z;",
            "switch (a) { default: default: }",
            "(a, ...b, ...rest) => {}",
            "class C { constructor() { super(); super(); } }",
            "[...x,] = [1,2,3];",
            "-x ** y",
            "a && b ?? c",
            "'use strict'; with (a) {}",
            "'use strict'; 010",
            "'use strict'; var eval;",
            "'use strict'; arguments = 1;",
            "'use strict'; function f(a, a) {}",
            "let a; let a;",
            "const a = 1, a = 2;",
            "let [a, a] = b;",
            "const a;",
            "new.target",
            "return;",
            "break;",
            "continue;",
            "a: a: ;",
            "a: { continue a; }",
            "if (a) const b = 1;",
            "if (a) class B {}",
            "for (let of x);",
            "for (const x of y) { var x; }",
            "1 = 2",
            "({a: 1} = b)",
            "(a, b) = 1",
            "a++ = 1",
            "x = { get a(b) {} }",
            "x = { set a() {} }",
            "x = { __proto__: 1, __proto__: 2 }",
            "class A { #a; #a; }",
            "class A { m() { this.#b; } }",
            "class A { constructor() {} constructor() {} }",
            "class A { static prototype() {} }",
            "class A { get constructor() {} }",
            "class A extends B { constructor() { function f() { super(); } } }",
            "({ m() { super(); } })",
            "function* g() { var yield; }",
            "function* g() { function* h(a = yield) {} }",
            "async function f() { var await; }",
            "async function f() { function g(a = await 1) {} }",
            "import.meta",
            "export default 1;",
            "`\\u{`",
            "'abc",
            "/* unterminated",
            "a ? b",
            "throw\nerror;",
            "try {}",
            "a b",
            "{ a = 1 }; ({ b = 1 });",
        ],
        &ParseOptions::default(),
    );
}

#[test]
fn test_rejects_invalid_modules() {
    assert_rejected(
        &[
            "var await;",
            "with (a) {}",
            "export { undeclared };",
            "export default 1; export default 2;",
            "let a; export { a, a };",
            "import { a } from 'm'; let a;",
            "function f() { export var x; }",
            "010",
        ],
        &ParseOptions::module(),
    );
}

#[test]
fn test_disable_web_compat() {
    let options = ParseOptions::default().with_disable_web_compat(true);
    assert_rejected(&["if (a) function f() {}", "for (var a = 1 in b) {}"], &options);
    assert!(parse("if (a) function f() {}", &ParseOptions::default()).is_ok());
    assert!(parse("for (var a = 1 in b) {}", &ParseOptions::default()).is_ok());
}

#[test]
fn test_accepts_type_sequences() {
    let cases: &[(&str, &[&str])] = &[
        (
            "a = b + 1;",
            &[
                "Program",
                "ExpressionStatement",
                "AssignmentExpression",
                "Identifier",
                "BinaryExpression",
                "Identifier",
                "Literal",
            ],
        ),
        (
            "if (x) y(); else ;",
            &[
                "Program",
                "IfStatement",
                "Identifier",
                "ExpressionStatement",
                "CallExpression",
                "Identifier",
                "EmptyStatement",
            ],
        ),
        (
            "for (const [k] of m) {}",
            &[
                "Program",
                "ForOfStatement",
                "VariableDeclaration",
                "VariableDeclarator",
                "ArrayPattern",
                "Identifier",
                "Identifier",
                "BlockStatement",
            ],
        ),
        (
            "x => ({ ...x });",
            &[
                "Program",
                "ExpressionStatement",
                "ArrowFunctionExpression",
                "Identifier",
                "ObjectExpression",
                "SpreadElement",
                "Identifier",
            ],
        ),
        (
            "a?.b();",
            &[
                "Program",
                "ExpressionStatement",
                "ChainExpression",
                "CallExpression",
                "MemberExpression",
                "Identifier",
                "Identifier",
            ],
        ),
    ];
    for (source, expected) in cases {
        let value = estree(source, &ParseOptions::default());
        assert_eq!(node_types(&value), *expected, "{:?}", source);
    }
}

#[test]
fn test_accepts_key_fields() {
    let options = ParseOptions::default().with_ranges(false);
    let value = estree("({a, b: [c = 1]} = d);", &options);
    assert_eq!(
        value["body"][0]["expression"],
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": {
                "type": "ObjectPattern",
                "properties": [
                    {
                        "type": "Property",
                        "method": false,
                        "shorthand": true,
                        "computed": false,
                        "key": { "type": "Identifier", "name": "a" },
                        "value": { "type": "Identifier", "name": "a" },
                        "kind": "init"
                    },
                    {
                        "type": "Property",
                        "method": false,
                        "shorthand": false,
                        "computed": false,
                        "key": { "type": "Identifier", "name": "b" },
                        "value": {
                            "type": "ArrayPattern",
                            "elements": [{
                                "type": "AssignmentPattern",
                                "left": { "type": "Identifier", "name": "c" },
                                "right": { "type": "Literal", "value": 1, "raw": "1" }
                            }]
                        },
                        "kind": "init"
                    }
                ]
            },
            "right": { "type": "Identifier", "name": "d" }
        })
    );
}

#[test]
fn test_accepts_class_members() {
    let options = ParseOptions::default().with_ranges(false);
    let value = estree("class A { static [k]() {} get x() {} set x(v) {} y = 1; }", &options);
    let members = &value["body"][0]["body"]["body"];
    assert_eq!(members[0]["kind"], "method");
    assert_eq!(members[0]["static"], true);
    assert_eq!(members[0]["computed"], true);
    assert_eq!(members[1]["kind"], "get");
    assert_eq!(members[2]["kind"], "set");
    assert_eq!(members[3]["type"], "PropertyDefinition");
    assert_eq!(members[3]["value"]["value"], 1);
}

#[test]
fn test_accepts_sloppy_only_forms() {
    for source in [
        "var yield, let, static; yield = let;",
        "with (a) b;",
        "010; '\\07';",
        "function f(a, a) {}",
        "if (a) function f() {}",
        "a: function g() {}",
        "<!-- html comment\nx;",
        "async = 1; async(); async\nfunction f() {}",
        "try {} catch (e) { var e; }",
    ] {
        if let Err(err) = parse(source, &ParseOptions::default()) {
            panic!("Expected {:?} to parse: {}", source, err);
        }
    }
}
