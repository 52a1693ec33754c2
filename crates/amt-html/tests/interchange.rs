//! JSON interchange of trees built from Markdown.

use pretty_assertions::assert_eq;
use serde_json::json;

fn tree_json(markdown: &str) -> serde_json::Value {
    let tree = amt_tree::build(&amt_cmark::tokenize(markdown)).unwrap();
    serde_json::to_value(&tree).unwrap()
}

#[test]
fn test_tight_list_json() {
    assert_eq!(
        tree_json("- a\n"),
        json!({
            "type": "root",
            "children": [{
                "type": "list",
                "ordered": false,
                "spread": false,
                "data": { "markup": "-" },
                "position": {
                    "start": { "line": 1, "column": 1 },
                    "end": { "line": 2, "column": 1 }
                },
                "children": [{
                    "type": "listItem",
                    "data": { "markup": "-" },
                    "position": {
                        "start": { "line": 1, "column": 1 },
                        "end": { "line": 2, "column": 1 }
                    },
                    "children": [{
                        "type": "paragraph",
                        "position": {
                            "start": { "line": 1, "column": 1 },
                            "end": { "line": 2, "column": 1 }
                        },
                        "children": [{ "type": "text", "value": "a" }]
                    }]
                }]
            }]
        })
    );
}

#[test]
fn test_code_json() {
    let value = tree_json("~~~py run\nx\n~~~\n");
    assert_eq!(
        value["children"][0],
        json!({
            "type": "code",
            "lang": "py",
            "meta": "run",
            "value": "x\n",
            "data": { "markup": "~~~" },
            "position": {
                "start": { "line": 1, "column": 1 },
                "end": { "line": 4, "column": 1 }
            }
        })
    );
}
