//! Position invariants
//!
//! Every node range lies inside the source and inside its parent, and the
//! tree shape does not depend on whether locations are tracked.

use integration_tests::{check_positions, estree, node_types};
use parser::{parse, ParseOptions};
use serde_json::Value;

const SOURCES: &[&str] = &[
    "var a = 1, b = a + 2 * 3;",
    "function f(a, [b, c] = [], { d, e: { f } }, ...rest) { return a ? b : c; }",
    "class A extends B { static #count = 0; constructor() { super(); } get x() { return this.#count; } static { A.y = 1; } }",
    "const f = async (a, b = 1) => { await a; };",
    "for (let i = 0; i < 10; i++) { if (i % 2) continue; else break; }",
    "label: for (const [k, v] of Object.entries(o)) { switch (k) { case 'a': break label; default: } }",
    "try { throw new Error(`bad ${value}`); } catch ({ message }) { log(message); } finally { done(); }",
    "({ a, b: [c, ...d], ...e } = obj);",
    "x?.y?.[z]?.(1)?.w;",
    "tag`hello ${world} and ${more}`;",
    "let re = /[a-z]+/gi, big = 123n, s = 'caf\u{e9}';",
    "function* g() { yield* other(); const x = yield; }",
    "a ||= b; c &&= d; e ??= f; g **= 2;",
    "do x++; while (x < 5)",
    "function h() { return new.target; }",
];

#[test]
fn test_node_ranges_are_nested() {
    for source in SOURCES {
        let value = estree(source, &ParseOptions::default());
        if let Err(violation) = check_positions(&value, source.len() as u64) {
            panic!("{:?}: {}", source, violation);
        }
    }
}

#[test]
fn test_module_ranges_are_nested() {
    let source = "import a, { b as c } from 'm' with { type: 'json' };\nexport { c as default2 };\nexport default class {}\nexport * as ns from 'n';";
    let options = ParseOptions::module();
    let value = estree(source, &options);
    check_positions(&value, source.len() as u64).unwrap();
}

fn strip_loc(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("loc");
            map.values_mut().for_each(strip_loc);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_loc),
        _ => {}
    }
}

#[test]
fn test_loc_does_not_change_shape() {
    for source in SOURCES {
        let plain = estree(source, &ParseOptions::default());
        let mut located = estree(source, &ParseOptions::default().with_loc(true));
        assert!(located["body"][0].get("loc").is_some());
        strip_loc(&mut located);
        assert_eq!(plain, located, "{:?}", source);
    }
}

#[test]
fn test_loc_columns_count_utf16_units() {
    let source = "'\u{1F600}'; x;";
    let value = estree(source, &ParseOptions::default().with_loc(true));
    let x = &value["body"][1];
    assert_eq!(x["start"], 8);
    // quote, surrogate pair, quote, semicolon, space
    assert_eq!(x["loc"]["start"]["column"], 6);
}

#[test]
fn test_parse_is_idempotent() {
    for source in SOURCES {
        let first = parse(source, &ParseOptions::default()).unwrap();
        let second = parse(source, &ParseOptions::default()).unwrap();
        assert_eq!(first, second, "{:?}", source);
        let types = node_types(&first.to_estree_json(&ParseOptions::default()));
        assert_eq!(types.first().map(String::as_str), Some("Program"));
    }
}
