use chrono::NaiveDate;

use sievelet::construct::Item;
use sievelet::datatype::{Decimal, Value};
use sievelet::error::SieveletError;
use sievelet::predicate::Predicate;
use sievelet::selector;

#[test]
fn single_comparison_is_an_atomic_predicate() {
    let parsed = selector::parse(r#"color = "green""#).expect("valid selector");
    assert_eq!(parsed, Predicate::equals("color", "green"));
}

#[test]
fn ampersand_joins_comparisons_into_a_conjunction() {
    let parsed = selector::parse(r#"size = "large" & color = "blue""#).expect("valid selector");
    let expected = Predicate::all(vec![
        Predicate::equals("size", "large"),
        Predicate::equals("color", "blue"),
    ])
    .unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn literal_forms_cover_every_value_type() {
    assert_eq!(
        selector::parse("suite = 101").unwrap(),
        Predicate::equals("suite", 101)
    );
    assert_eq!(
        selector::parse("suite = -7").unwrap(),
        Predicate::equals("suite", -7)
    );
    assert_eq!(
        selector::parse("price = 4.50").unwrap(),
        Predicate::equals("price", Decimal::from_str("4.50").unwrap())
    );
    assert_eq!(
        selector::parse("active = true").unwrap(),
        Predicate::equals("active", true)
    );
    assert_eq!(
        selector::parse("hired = '2004-06-19'").unwrap(),
        Predicate::equals("hired", NaiveDate::from_ymd_opt(2004, 6, 19).unwrap())
    );
}

#[test]
fn whitespace_around_tokens_is_ignored() {
    let compact = selector::parse(r#"size="large"&color="blue""#).unwrap();
    let spaced = selector::parse(r#"  size =  "large"   &  color = "blue"  "#).unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn parsed_selector_drives_a_sift() {
    let items = vec![
        Item::new().with("color", "green").with("size", "small"),
        Item::new().with("color", "green").with("size", "large"),
        Item::new().with("color", "blue").with("size", "large"),
    ];
    let predicate = selector::parse(r#"size = "large" & color = "blue""#).unwrap();
    let matching: Vec<&Item> = predicate
        .sift(&items)
        .collect::<Result<_, _>>()
        .expect("all items carry both attributes");
    assert_eq!(matching, vec![&items[2]]);
}

#[test]
fn malformed_selectors_report_a_position() {
    let err = selector::parse("color = ").unwrap_err();
    match err {
        SieveletError::Parse { line, col, .. } => {
            assert!(line.is_some(), "parse errors carry a line");
            assert!(col.is_some(), "parse errors carry a column");
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn empty_input_is_a_parse_error() {
    assert!(matches!(
        selector::parse("").unwrap_err(),
        SieveletError::Parse { .. }
    ));
    assert!(matches!(
        selector::parse("   ").unwrap_err(),
        SieveletError::Parse { .. }
    ));
}

#[test]
fn dangling_ampersand_is_a_parse_error() {
    assert!(matches!(
        selector::parse(r#"color = "green" &"#).unwrap_err(),
        SieveletError::Parse { .. }
    ));
}

#[test]
fn unquoted_text_is_a_parse_error() {
    assert!(matches!(
        selector::parse("color = green").unwrap_err(),
        SieveletError::Parse { .. }
    ));
}
