use odata_mongo::ast::{Expr, LogicalOp, Token};
use odata_mongo::lexer::tokenize;
use odata_mongo::{filter_to_predicate, parse_filter};
use proptest::prelude::*;

fn arb_field() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,6}"
}

fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| n.to_string()),
        any::<bool>().prop_map(|b| b.to_string()),
        "[a-z ']{0,8}".prop_map(|s| format!("'{}'", s.replace('\'', "''"))),
    ]
}

fn arb_comparison() -> impl Strategy<Value = String> {
    (
        arb_field(),
        prop_oneof![
            Just("eq"),
            Just("ne"),
            Just("gt"),
            Just("ge"),
            Just("lt"),
            Just("le")
        ],
        arb_literal(),
    )
        .prop_map(|(field, op, lit)| format!("{field} {op} {lit}"))
}

fn arb_filter(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_comparison().boxed();
    }

    let leaf = arb_comparison();
    let nested = (
        arb_filter(depth - 1),
        prop_oneof![Just("and"), Just("or")],
        arb_filter(depth - 1),
    )
        .prop_map(|(lhs, op, rhs)| format!("({lhs} {op} {rhs})"));
    prop_oneof![leaf, nested].boxed()
}

fn and_depth(expr: &Expr) -> usize {
    match expr {
        Expr::Logical {
            op: LogicalOp::And,
            left,
            ..
        } => 1 + and_depth(left),
        _ => 0,
    }
}

proptest! {
    #[test]
    fn translation_is_deterministic(filter in arb_filter(3)) {
        let first = filter_to_predicate(&filter).expect("generated filter should translate");
        let second = filter_to_predicate(&filter).expect("generated filter should translate");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn display_reparses_to_same_tree(filter in arb_filter(3)) {
        let parsed = parse_filter(&filter).expect("generated filter should parse");
        let reparsed = parse_filter(&parsed.to_string()).expect("rendered filter should reparse");
        prop_assert_eq!(parsed, reparsed);
    }

    #[test]
    fn and_chains_fold_left(terms in prop::collection::vec(arb_comparison(), 2..6)) {
        let filter = terms.join(" and ");
        let expr = parse_filter(&filter).expect("and chain should parse");
        prop_assert_eq!(and_depth(&expr), terms.len() - 1);
    }

    #[test]
    fn quoted_strings_unescape(text in "\\PC{0,16}") {
        let quoted = format!("'{}'", text.replace('\'', "''"));
        let tokens = tokenize(&quoted).expect("quoted literal should lex");
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(&tokens[0].token, &Token::String(text));
    }
}
