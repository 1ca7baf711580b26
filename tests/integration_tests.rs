use std::{sync::Arc, thread};

use odata_mongo::{
    Error, Expr, filter_to_predicate, output::{query_to_value, to_json, to_json_pretty},
    parse_filter, parse_orderby, parse_query_string, parse_select, translate_filter_to_predicate,
};
use serde_json::json;

fn compile(filter: &str) -> Result<String, Error> {
    let doc = filter_to_predicate(filter)?;
    to_json(&doc).map_err(|e| Error::invalid_input(e.to_string()))
}

#[test]
fn test_simple_equality() {
    assert_eq!(compile("Name eq 'john'").unwrap(), r#"{"Name":{"$eq":"john"}}"#);
}

#[test]
fn test_conjunction() {
    assert_eq!(
        compile("Age gt 5 and City eq 'NY'").unwrap(),
        r#"{"$and":[{"Age":{"$gt":5}},{"City":{"$eq":"NY"}}]}"#
    );
}

#[test]
fn test_object_id() {
    assert_eq!(
        compile("_id gt '507f1f77bcf86cd799439011'").unwrap(),
        r#"{"_id":{"$gt":{"$oid":"507f1f77bcf86cd799439011"}}}"#
    );
    assert!(compile("_id gt 'zz'").is_err());
}

#[test]
fn test_string_functions() {
    assert_eq!(
        compile("Name startswith 'Jo'").unwrap(),
        r#"{"Name":{"$regex":"^Jo","$options":"g"}}"#
    );
    assert_eq!(
        compile("Name endswith 'hn'").unwrap(),
        r#"{"Name":{"$regex":"^.*hn$","$options":"g"}}"#
    );
    assert_eq!(
        compile("Name contains 'oh'").unwrap(),
        r#"{"Name":{"$regex":"^.*oh","$options":"g"}}"#
    );
}

#[test]
fn test_orderby_and_select() {
    let sort = parse_orderby("Name desc, Age").unwrap();
    assert_eq!(sort["Name"], -1);
    assert_eq!(sort["Age"], 1);
    assert!(parse_orderby("Name asc desc").is_err());
    assert!(parse_orderby("Na#me").is_err());

    assert!(parse_select("*").unwrap().is_empty());
    assert_eq!(parse_select("Name, Age").unwrap(), vec!["Name", "Age"]);
}

#[test]
fn test_complex_filter() {
    let filter = "(startswith(Name, 'A') or Name eq 'Bob') and Age ge 18 and Active eq true";
    let doc = filter_to_predicate(filter).unwrap();
    assert_eq!(
        odata_mongo::output::to_value(&doc).unwrap(),
        json!({"$and": [
            {"$and": [
                {"$or": [
                    {"Name": {"$regex": "^A", "$options": "g"}},
                    {"Name": {"$eq": "Bob"}}
                ]},
                {"Age": {"$gte": 18}}
            ]},
            {"Active": {"$eq": true}}
        ]})
    );
}

#[test]
fn test_reparse_is_deterministic() {
    let filter = "Price lt 9.99 or (Qty ge 3 and Name ne 'x')";
    let first = compile(filter).unwrap();
    for _ in 0..5 {
        assert_eq!(compile(filter).unwrap(), first);
    }
}

#[test]
fn test_display_roundtrip() {
    let expr = parse_filter("A eq 'it''s' or contains(B, 'x') and C le -2.5").unwrap();
    let reparsed = parse_filter(&expr.to_string()).unwrap();
    assert_eq!(expr, reparsed);
}

#[test]
fn test_shared_tree_across_threads() {
    let expr: Arc<Expr> =
        Arc::new(parse_filter("Name eq 'O''Neil' and _id gt '507f1f77bcf86cd799439011'").unwrap());
    let expected = translate_filter_to_predicate(&expr).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || translate_filter_to_predicate(&expr).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_pretty_output() {
    let doc = filter_to_predicate("Age lt 3").unwrap();
    assert_eq!(
        to_json_pretty(&doc).unwrap(),
        "{\n  \"Age\": {\n    \"$lt\": 3\n  }\n}"
    );
}

#[test]
fn test_full_query_string() {
    let query = parse_query_string(
        "$filter=Age gt 5&$select=Name,Age&$orderby=Age desc,Name&$top=10&$skip=5",
    )
    .unwrap();
    assert_eq!(
        query_to_value(&query).unwrap(),
        json!({
            "filter": {"Age": {"$gt": 5}},
            "select": ["Name", "Age"],
            "limit": 10,
            "skip": 5,
            "sort": {"Age": -1, "Name": 1}
        })
    );
}

#[test]
fn test_parse_errors_are_invalid_input() {
    let err = parse_filter("Name eq").unwrap_err();
    assert_eq!(err.cause(), "expected a literal value, found end of input");
    assert_eq!(
        err.to_string(),
        "odata syntax error: expected a literal value, found end of input"
    );
}

#[test]
fn test_oversized_filters_are_invalid_input() {
    let chain = vec!["A eq 1"; 10_000].join(" and ");
    let err = filter_to_predicate(&chain).unwrap_err();
    assert!(err.cause().starts_with("filter nests deeper than"));

    let parens = format!("{}A eq 1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(parse_filter(&parens), Err(Error::InvalidInput { .. })));
}
