//! End-to-end parse scenarios

use integration_tests::estree;
use parser::ast::*;
use parser::{parse_script, ParseOptions};
use serde_json::json;

#[test]
fn test_rest_parameter_then_empty_statement() {
    let program = parse_script("function f(...b) {};").unwrap();
    assert_eq!(program.body.len(), 2);
    match &program.body[0] {
        Statement::FunctionDeclaration(function) => {
            assert_eq!(function.params.len(), 1);
            match &function.params[0] {
                Pattern::RestElement { argument, .. } => {
                    assert!(matches!(argument.as_ref(), Pattern::Identifier(id) if id.name == "b"));
                }
                other => panic!("Expected rest element, got {:?}", other),
            }
        }
        other => panic!("Expected function declaration, got {:?}", other),
    }
    assert!(matches!(program.body[1], Statement::EmptyStatement { .. }));

    let value = estree("function f(...b) {};", &ParseOptions::default().with_ranges(false));
    assert_eq!(
        value["body"][0]["params"],
        json!([{ "type": "RestElement", "argument": { "type": "Identifier", "name": "b" } }])
    );
    assert_eq!(value["body"][1], json!({ "type": "EmptyStatement" }));
}

#[test]
fn test_super_property_at_top_level_fails() {
    let err = parse_script("super.foo;").unwrap_err();
    assert_eq!(err.position.offset, 0);
}

#[test]
fn test_super_call_in_base_constructor_fails() {
    assert!(parse_script("class C { constructor() { super(); super(); } }").is_err());
    assert!(parse_script("class C extends D { constructor() { super(); super(); } }").is_ok());
}

#[test]
fn test_trailing_comma_after_rest_in_assignment_fails() {
    assert!(parse_script("[...x,] = [1,2,3];").is_err());
    assert!(parse_script("[...x] = [1,2,3];").is_ok());
    assert!(parse_script("[...x,];").is_ok());
}

#[test]
fn test_super_property_in_method() {
    let value = estree("class x { foo(){ super.foo; }}", &ParseOptions::default().with_ranges(false));
    let method = &value["body"][0]["body"]["body"][0];
    assert_eq!(method["type"], "MethodDefinition");
    assert_eq!(method["kind"], "method");
    let statement = &method["value"]["body"]["body"][0];
    assert_eq!(
        statement["expression"],
        json!({
            "type": "MemberExpression",
            "object": { "type": "Super" },
            "property": { "type": "Identifier", "name": "foo" },
            "computed": false,
            "optional": false
        })
    );
}

#[test]
fn test_return_newline_is_two_statements() {
    let program = parse_script("function f() { return\n42; }").unwrap();
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("Expected function declaration");
    };
    assert_eq!(function.body.body.len(), 2);
    assert!(matches!(function.body.body[0], Statement::ReturnStatement { argument: None, .. }));
    assert!(matches!(
        &function.body.body[1],
        Statement::ExpressionStatement { expression: Expression::Literal(_), .. }
    ));
}

#[test]
fn test_restricted_productions() {
    let program = parse_script("a\n++b").unwrap();
    assert_eq!(program.body.len(), 2);

    let program = parse_script("function* g() { yield\n1 }").unwrap();
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("Expected function declaration");
    };
    assert_eq!(function.body.body.len(), 2);

    assert!(parse_script("x\n=> x").is_err());
    assert!(parse_script("for (;;) { continue\nlabel; }").is_ok());
}

#[test]
fn test_super_in_arrow_inside_method() {
    assert!(parse_script("({ m() { return () => super.x; } })").is_ok());
    assert!(parse_script("({ m() { return function () { super.x; }; } })").is_err());
}

#[test]
fn test_new_target_rules() {
    assert!(parse_script("function f() { return () => new.target; }").is_ok());
    assert!(parse_script("() => new.target").is_err());
}

#[test]
fn test_strict_mode_is_inherited() {
    assert!(parse_script("'use strict'; function f() { var static; }").is_err());
    assert!(parse_script("function f() { 'use strict'; } var static;").is_ok());
    assert!(parse_script("class A { m() { var static; } }").is_err());
}
