use tests::prelude::*;

fn resolved(set: &ParameterSet) -> Vec<(String, Value)> {
    set.iter()
        .map(|entry| (entry.name().to_string(), entry.value()))
        .collect()
}

#[test]
fn one_parameter_per_token_in_order() {
    let set = bind("a=@x AND b=@y", args![1, 2], BindMode::Strict).unwrap();

    assert_eq!(
        resolved(&set),
        [
            ("@x".to_string(), Value::I64(1)),
            ("@y".to_string(), Value::I64(2)),
        ]
    );
}

#[test]
fn explicit_nulls_produce_null_marker_parameters() {
    let set = bind(
        "someField=@p1 and someField2=@p2",
        args![Option::<i64>::None, Value::Null],
        BindMode::Strict,
    )
    .unwrap();

    assert_eq!(set.len(), 2);
    assert!(set.iter().all(|entry| entry.value().is_null()));
}

#[test]
fn out_of_order_naming_resolves_by_token_appearance() {
    let set = bind(
        "@val1 and @val2",
        args!["@val2", "abc", "@val1", 678],
        BindMode::Strict,
    )
    .unwrap();

    assert_eq!(
        resolved(&set),
        [
            ("@val1".to_string(), Value::I64(678)),
            ("@val2".to_string(), Value::Text("abc".into())),
        ]
    );
}

#[test]
fn lenient_mode_drops_the_unresolvable_tail() {
    let set = bind("a=@x", args![1, "extra", 99], BindMode::Lenient).unwrap();

    assert_eq!(resolved(&set), [("@x".to_string(), Value::I64(1))]);
}

#[test]
fn strict_mode_raises_on_excess_values() {
    let err = bind("a=@x", args![1, "extra"], BindMode::Strict).unwrap_err();
    assert!(err.is_binding());
}
