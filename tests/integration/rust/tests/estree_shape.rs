//! ESTree JSON shape

use integration_tests::estree;
use parser::ParseOptions;
use serde_json::json;

fn shape(source: &str) -> serde_json::Value {
    estree(source, &ParseOptions::default().with_ranges(false))
}

#[test]
fn test_function_fields() {
    let value = shape("async function* f(a) {}");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "FunctionDeclaration",
            "id": { "type": "Identifier", "name": "f" },
            "expression": false,
            "generator": true,
            "async": true,
            "params": [{ "type": "Identifier", "name": "a" }],
            "body": { "type": "BlockStatement", "body": [] }
        })
    );
}

#[test]
fn test_arrow_expression_flag() {
    let value = shape("(a) => a; () => {};");
    assert_eq!(value["body"][0]["expression"]["expression"], true);
    assert_eq!(value["body"][1]["expression"]["expression"], false);
    assert_eq!(value["body"][0]["expression"]["id"], json!(null));
}

#[test]
fn test_unary_update_and_logical() {
    let value = shape("!a; b--; c ?? d;");
    assert_eq!(
        value["body"][0]["expression"],
        json!({
            "type": "UnaryExpression",
            "operator": "!",
            "prefix": true,
            "argument": { "type": "Identifier", "name": "a" }
        })
    );
    assert_eq!(value["body"][1]["expression"]["prefix"], false);
    assert_eq!(value["body"][1]["expression"]["operator"], "--");
    assert_eq!(value["body"][2]["expression"]["type"], "LogicalExpression");
    assert_eq!(value["body"][2]["expression"]["operator"], "??");
}

#[test]
fn test_object_property_fields() {
    let value = shape("({ a, b: 1, [c]: 2, d() {}, get e() {} });");
    let properties = &value["body"][0]["expression"]["properties"];
    assert_eq!(properties[0]["shorthand"], true);
    assert_eq!(properties[1]["shorthand"], false);
    assert_eq!(properties[2]["computed"], true);
    assert_eq!(properties[3]["method"], true);
    assert_eq!(properties[3]["kind"], "init");
    assert_eq!(properties[4]["kind"], "get");
    assert_eq!(properties[4]["value"]["type"], "FunctionExpression");
}

#[test]
fn test_directives() {
    let value = shape("'use strict'; 'other'; x; 'not a directive';");
    assert_eq!(value["body"][0]["directive"], "use strict");
    assert_eq!(value["body"][1]["directive"], "other");
    assert!(value["body"][2].get("directive").is_none());
    assert!(value["body"][3].get("directive").is_none());
}

#[test]
fn test_module_nodes() {
    let options = ParseOptions::module().with_ranges(false);
    let value = estree("import * as ns from 'm'; export { ns as default };", &options);
    assert_eq!(value["sourceType"], "module");
    assert_eq!(
        value["body"][0],
        json!({
            "type": "ImportDeclaration",
            "specifiers": [{
                "type": "ImportNamespaceSpecifier",
                "local": { "type": "Identifier", "name": "ns" }
            }],
            "source": { "type": "Literal", "value": "m", "raw": "'m'" },
            "attributes": []
        })
    );
    assert_eq!(
        value["body"][1]["specifiers"][0],
        json!({
            "type": "ExportSpecifier",
            "local": { "type": "Identifier", "name": "ns" },
            "exported": { "type": "Identifier", "name": "default" }
        })
    );
}

#[test]
fn test_meta_and_import_expressions() {
    let options = ParseOptions::module().with_ranges(false);
    let value = estree("import.meta.url; import('m');", &options);
    assert_eq!(value["body"][0]["expression"]["object"]["type"], "MetaProperty");
    assert_eq!(value["body"][0]["expression"]["object"]["meta"]["name"], "import");
    assert_eq!(value["body"][1]["expression"]["type"], "ImportExpression");
    assert_eq!(value["body"][1]["expression"]["options"], json!(null));
}

#[test]
fn test_decorated_class_with_next() {
    let options = ParseOptions::default().with_ranges(false).with_next(true);
    let value = estree("@dec class A { @log accessor x = 1; }", &options);
    let class = &value["body"][0];
    assert_eq!(class["decorators"][0]["expression"], json!({ "type": "Identifier", "name": "dec" }));
    let member = &class["body"]["body"][0];
    assert_eq!(member["type"], "AccessorProperty");
    assert_eq!(member["decorators"][0]["type"], "Decorator");
}
