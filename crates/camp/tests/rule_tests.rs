// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for rule-to-pattern compilation

use qcert_camp::macros::{bind, flatten, iterate_globally, lookup, singleton};
use qcert_camp::{
    BinaryOperator, CampError, Data, Pattern, Rule, RuleKind, RuleTemplate, UnaryOperator,
};

fn sample_patterns() -> Vec<Pattern> {
    vec![
        Pattern::It,
        bind("x"),
        Pattern::map(Pattern::unary(
            UnaryOperator::OpDot("salary".into()),
            Pattern::It,
        )),
        Pattern::assert(Pattern::binary(
            BinaryOperator::OpEqual,
            Pattern::It,
            Pattern::Const(Data::Nat(3)),
        )),
    ]
}

fn sample_operands() -> Vec<Rule> {
    vec![
        Rule::returning(lookup("x")),
        Rule::returning(Pattern::Const(Data::string("done"))),
        RuleTemplate::global(bind("y")).apply_to(Rule::returning(Pattern::Env)),
    ]
}

#[test]
fn test_global_law_for_all_samples() {
    for p in sample_patterns() {
        for r in sample_operands() {
            let expected = flatten(singleton(Pattern::let_env(
                iterate_globally(p.clone()),
                r.convert_to_pattern().unwrap(),
            )));
            let actual = RuleTemplate::global(p.clone())
                .apply_to(r)
                .convert_to_pattern()
                .unwrap();
            assert_eq!(actual, expected);
        }
    }
}

#[test]
fn test_global_law_exact_shape() {
    let rule = RuleTemplate::global(bind("x")).apply_to(Rule::returning(lookup("x")));
    let pattern = rule.convert_to_pattern().unwrap();

    let expected = Pattern::Unary(
        UnaryOperator::OpFlatten,
        Box::new(Pattern::Unary(
            UnaryOperator::OpBag,
            Box::new(Pattern::LetEnv(
                Box::new(Pattern::LetIt(
                    Box::new(Pattern::GetConstant("WORLD".into())),
                    Box::new(bind("x")),
                )),
                Box::new(Pattern::Unary(UnaryOperator::OpBag, Box::new(lookup("x")))),
            )),
        )),
    );
    assert_eq!(pattern, expected);
    assert_eq!(
        pattern.to_string(),
        concat!(
            r#"(punop (OpFlatten ) (punop (OpBag ) (pletEnv "#,
            r#"(pletIt (pgetConstant "WORLD" ) (punop (OpRec "x" ) (pit ) ) ) "#,
            r#"(punop (OpBag ) (punop (OpDot "x" ) (penv ) ) ) ) ) )"#
        )
    );
}

#[test]
fn test_template_reused_for_two_operands() {
    let template = RuleTemplate::global(bind("x"));
    let first = template.apply_to(Rule::returning(lookup("x")));
    let second = template.apply_to(Rule::returning(Pattern::Const(Data::Unit)));

    // Template unchanged
    assert_eq!(template.kind(), RuleKind::Global);
    assert_eq!(template.pattern(), &bind("x"));

    for rule in [&first, &second] {
        assert_eq!(rule.pattern(), template.pattern());
        match rule {
            Rule::Applied(applied) => assert!(applied.shares_pattern_with(&template)),
            Rule::Return(_) => panic!("Expected applied rule"),
        }
    }

    assert_ne!(first, second);
    let p1 = first.convert_to_pattern().unwrap();
    let p2 = second.convert_to_pattern().unwrap();
    assert_ne!(p1, p2);
    assert_eq!(first.convert_to_pattern().unwrap(), p1);
}

#[test]
fn test_unsupported_kind_is_reported() {
    let rule = RuleTemplate::when(bind("x")).apply_to(Rule::returning(Pattern::Env));
    assert_eq!(rule.kind(), RuleKind::When);
    assert_eq!(
        rule.convert_to_pattern(),
        Err(CampError::UnsupportedRuleKind {
            kind: RuleKind::When
        })
    );
}

#[test]
fn test_unsupported_kind_deep_in_chain_aborts() {
    let rule = Rule::chain(
        [
            RuleTemplate::global(bind("a")),
            RuleTemplate::not(bind("b")),
            RuleTemplate::global(bind("c")),
        ],
        Rule::returning(Pattern::Env),
    );
    let err = rule.convert_to_pattern().unwrap_err();
    assert_eq!(err, CampError::UnsupportedRuleKind { kind: RuleKind::Not });
}

#[test]
fn test_chain_matches_manual_application() {
    let a = RuleTemplate::global(bind("a"));
    let b = RuleTemplate::global(bind("b"));
    let terminal = Rule::returning(lookup("a"));

    let manual = a.apply_to(b.apply_to(terminal.clone()));
    let chained = Rule::chain([a, b], terminal);
    assert_eq!(manual, chained);
    assert_eq!(
        manual.convert_to_pattern().unwrap(),
        chained.convert_to_pattern().unwrap()
    );
}

#[test]
fn test_nested_global_expansion() {
    let inner = RuleTemplate::global(bind("b")).apply_to(Rule::returning(lookup("b")));
    let inner_pattern = inner.convert_to_pattern().unwrap();
    let outer = RuleTemplate::global(bind("a")).apply_to(inner);

    let expected = flatten(singleton(Pattern::let_env(
        iterate_globally(bind("a")),
        inner_pattern,
    )));
    assert_eq!(outer.convert_to_pattern().unwrap(), expected);
}
