// tests/params_tests.rs

use std::collections::HashMap;

use odata_mongo::ast::{CompareOp, Expr, Literal};
use odata_mongo::params::{parse_skip, parse_top};
use odata_mongo::{
    OrderItem, SortDirection, parse_order_items, parse_orderby, parse_query, parse_query_string,
    parse_select,
};

// ============================================================================
// $select
// ============================================================================

#[test]
fn test_select_fields() {
    assert_eq!(parse_select("Name, Age").unwrap(), vec!["Name", "Age"]);
    assert_eq!(parse_select("Name").unwrap(), vec!["Name"]);
    assert_eq!(
        parse_select("  a ,b,  c  ").unwrap(),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_select_star_is_all_fields() {
    assert_eq!(parse_select("*").unwrap(), Vec::<String>::new());
    assert_eq!(parse_select(" * ").unwrap(), Vec::<String>::new());
}

#[test]
fn test_select_star_among_names_keeps_names() {
    let fields = parse_select("Name, *").unwrap();
    assert!(!fields.is_empty());
    assert_eq!(fields, vec!["Name", "*"]);
}

#[test]
fn test_select_rejects_blank() {
    assert!(parse_select("").is_err());
    assert!(parse_select("   ").is_err());
    assert!(parse_select("Name,,Age").is_err());
    assert!(parse_select("Name,").is_err());
}

// ============================================================================
// $orderby
// ============================================================================

#[test]
fn test_orderby_mapping() {
    let sort = parse_orderby("Name desc, Age").unwrap();
    assert_eq!(sort.len(), 2);
    assert_eq!(sort["Name"], -1);
    assert_eq!(sort["Age"], 1);
}

#[test]
fn test_orderby_keeps_field_order() {
    let sort = parse_orderby("Zeta, Alpha desc, Mid asc").unwrap();
    let fields: Vec<&str> = sort.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_orderby_repeated_field_takes_last_direction() {
    let sort = parse_orderby("Name, Age, Name desc").unwrap();
    let entries: Vec<(&str, i32)> = sort.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(entries, vec![("Name", -1), ("Age", 1)]);
}

#[test]
fn test_order_items() {
    assert_eq!(
        parse_order_items("Name desc,Age asc,City").unwrap(),
        vec![
            OrderItem {
                field: "Name".to_string(),
                direction: SortDirection::Desc,
            },
            OrderItem {
                field: "Age".to_string(),
                direction: SortDirection::Asc,
            },
            OrderItem {
                field: "City".to_string(),
                direction: SortDirection::Asc,
            },
        ]
    );
}

#[test]
fn test_orderby_too_many_parts() {
    let err = parse_orderby("Name asc desc").unwrap_err();
    assert_eq!(
        err.cause(),
        "cannot have more than 2 items in orderby query"
    );
}

#[test]
fn test_orderby_bad_direction() {
    let err = parse_orderby("Name up").unwrap_err();
    assert_eq!(err.cause(), "second value in orderby needs to be asc or desc");
    // Direction keywords are case-sensitive.
    assert!(parse_orderby("Name DESC").is_err());
}

#[test]
fn test_orderby_disallowed_characters() {
    for c in "~!@#$%^&*()_+-".chars() {
        let input = format!("Na{c}me");
        let err = parse_orderby(&input).unwrap_err();
        assert_eq!(
            err.cause(),
            format!("cannot support field {input}"),
            "Failed for character: {}",
            c
        );
    }
}

#[test]
fn test_orderby_empty_items() {
    assert!(parse_orderby("").is_err());
    assert!(parse_orderby("Name,,Age").is_err());
    assert!(parse_orderby("Name, ").is_err());
}

// ============================================================================
// $top / $skip
// ============================================================================

#[test]
fn test_top_and_skip() {
    assert_eq!(parse_top("10").unwrap(), 10);
    assert_eq!(parse_top(" 0 ").unwrap(), 0);
    assert_eq!(parse_skip("25").unwrap(), 25);
}

#[test]
fn test_top_and_skip_reject_non_integers() {
    for input in ["", "ten", "1.5", "-1", "1e3"] {
        assert!(parse_top(input).is_err(), "Failed for input: {:?}", input);
        assert!(parse_skip(input).is_err(), "Failed for input: {:?}", input);
    }
}

// ============================================================================
// Query assembly
// ============================================================================

#[test]
fn test_query_all_options() {
    let mut params = HashMap::new();
    params.insert("$filter", "Age gt 5");
    params.insert("$select", "Name, Age");
    params.insert("$orderby", "Name desc");
    params.insert("$top", "10");
    params.insert("$skip", "20");

    let query = parse_query(&params).unwrap();

    assert_eq!(
        query.filter,
        Some(Expr::compare(
            CompareOp::GreaterThan,
            Expr::identifier("Age"),
            Expr::Literal(Literal::Integer(5)),
        ))
    );
    assert_eq!(
        query.select,
        Some(vec!["Name".to_string(), "Age".to_string()])
    );
    assert_eq!(query.limit, Some(10));
    assert_eq!(query.skip, Some(20));
    assert_eq!(query.sort.unwrap()["Name"], -1);
}

#[test]
fn test_query_absent_options_stay_unset() {
    let query = parse_query(Vec::<(String, String)>::new()).unwrap();
    assert!(query.filter.is_none());
    assert!(query.select.is_none());
    assert!(query.limit.is_none());
    assert!(query.skip.is_none());
    assert!(query.sort.is_none());
    assert!(query.predicate().unwrap().is_empty());
}

#[test]
fn test_query_select_star_differs_from_unset() {
    let query = parse_query([("$select", "*")]).unwrap();
    assert_eq!(query.select, Some(Vec::new()));
}

#[test]
fn test_query_ignores_unknown_keys() {
    let query = parse_query([("$count", "true"), ("page", "2"), ("$top", "1")]).unwrap();
    assert_eq!(query.limit, Some(1));
}

#[test]
fn test_query_rejects_duplicate_option() {
    let err = parse_query([("$top", "1"), ("$top", "2")]).unwrap_err();
    assert_eq!(err.cause(), "duplicate query option $top");
}

#[test]
fn test_query_errors_are_invalid_input() {
    for params in [
        vec![("$filter", "Name eq")],
        vec![("$top", "many")],
        vec![("$orderby", "a b c")],
        vec![("$select", "")],
    ] {
        let err = parse_query(params.clone()).unwrap_err();
        assert!(
            err.to_string().starts_with("odata syntax error: "),
            "Failed for params: {:?}",
            params
        );
    }
}

#[test]
fn test_query_string_decoding() {
    let query =
        parse_query_string("?%24filter=Name%20eq%20%27O%27%27Neil%27&$orderby=Age+desc").unwrap();
    assert_eq!(
        query.filter,
        Some(Expr::compare(
            CompareOp::Equal,
            Expr::identifier("Name"),
            Expr::string("O'Neil"),
        ))
    );
    assert_eq!(query.sort.unwrap()["Age"], -1);
}

#[test]
fn test_query_predicate_translates_filter() {
    let query = parse_query_string("$filter=_id gt 'zz'").unwrap();
    assert!(query.filter.is_some());
    assert!(query.predicate().is_err());
}
