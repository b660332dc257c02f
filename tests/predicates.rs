use sievelet::construct::Item;
use sievelet::error::SieveletError;
use sievelet::predicate::Predicate;

fn apple() -> Item {
    Item::new()
        .with("name", "Apple")
        .with("color", "green")
        .with("size", "small")
}

#[test]
fn atomic_matches_equal_attribute() {
    let item = apple();
    let green = Predicate::equals("color", "green");
    assert!(green.matches(&item).expect("attribute present"));
}

#[test]
fn atomic_rejects_different_value() {
    let item = apple();
    let blue = Predicate::equals("color", "blue");
    assert!(!blue.matches(&item).expect("attribute present"));
}

#[test]
fn cross_type_equality_is_false_not_an_error() {
    let item = apple();
    // "color" holds text, the expectation is an integer
    let odd = Predicate::equals("color", 2);
    assert!(!odd.matches(&item).expect("type mismatch is just a non-match"));
}

#[test]
fn missing_attribute_is_an_error() {
    let item = apple();
    let weighty = Predicate::equals("weight", 100);
    let err = weighty.matches(&item).unwrap_err();
    assert!(matches!(
        err,
        SieveletError::AttributeNotFound { ref attribute } if attribute == "weight"
    ));
}

#[test]
fn conjunction_requires_every_child() {
    let item = apple();
    let green_and_small = Predicate::all(vec![
        Predicate::equals("color", "green"),
        Predicate::equals("size", "small"),
    ])
    .expect("two children");
    assert!(green_and_small.matches(&item).unwrap());

    let green_and_large = Predicate::all(vec![
        Predicate::equals("color", "green"),
        Predicate::equals("size", "large"),
    ])
    .expect("two children");
    assert!(!green_and_large.matches(&item).unwrap());
}

#[test]
fn conjunction_agrees_with_children_evaluated_one_by_one() {
    let item = apple();
    let children = vec![
        Predicate::equals("color", "green"),
        Predicate::equals("size", "small"),
        Predicate::equals("name", "Apple"),
    ];
    let each: Vec<bool> = children
        .iter()
        .map(|child| child.matches(&item).unwrap())
        .collect();
    let conjunction = Predicate::all(children).unwrap();
    assert_eq!(
        conjunction.matches(&item).unwrap(),
        each.iter().all(|satisfied| *satisfied)
    );
}

#[test]
fn conjunction_of_one_behaves_like_its_child() {
    let item = apple();
    let child = Predicate::equals("color", "green");
    let conjunction = Predicate::all(vec![child.clone()]).expect("one child is enough");
    assert_eq!(
        conjunction.matches(&item).unwrap(),
        child.matches(&item).unwrap()
    );
}

#[test]
fn empty_conjunction_is_rejected() {
    let err = Predicate::all(Vec::new()).unwrap_err();
    assert!(matches!(err, SieveletError::InvalidArgument(_)));
}

#[test]
fn nested_conjunctions_flatten_logically() {
    let item = apple();
    let inner = Predicate::all(vec![
        Predicate::equals("color", "green"),
        Predicate::equals("size", "small"),
    ])
    .unwrap();
    let outer = Predicate::all(vec![inner, Predicate::equals("name", "Apple")]).unwrap();
    assert!(outer.matches(&item).unwrap());
}

#[test]
fn evaluation_is_repeatable() {
    let item = apple();
    let green = Predicate::equals("color", "green");
    for _ in 0..3 {
        assert!(green.matches(&item).unwrap(), "evaluation must be pure");
    }
}
