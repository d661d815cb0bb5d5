//! Property-based tests for nebula-sanitizer.

use futures::executor::block_on;
use nebula_sanitizer::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

// ============================================================================
// RESULT SHAPE: success <=> no errors, failure => no data
// ============================================================================

proptest! {
    #[test]
    fn success_iff_no_errors(input in json_leaf()) {
        let unit = pipeline![trim(), min_length(3)].unwrap();
        let result = block_on(unit.run(Some(input)));
        prop_assert_eq!(result.is_success(), result.errors().is_empty());
        if !result.is_success() {
            prop_assert!(result.data().is_none());
        }
    }

    #[test]
    fn required_gate_is_uniform(optional in any::<bool>(), null in any::<bool>()) {
        let options = UnitOptions { is_optional: optional };
        let unit = pipeline![integer(); options].unwrap();
        let input = if null { Some(Value::Null) } else { None };
        let expected = input.clone();

        let result = block_on(unit.run(input));
        if optional {
            prop_assert!(result.is_success());
            prop_assert_eq!(result.into_data(), expected);
        } else {
            prop_assert_eq!(result.errors(), &[ValidationError::required()][..]);
        }
    }
}

// ============================================================================
// IDEMPOTENCY: same instance, same input, same result
// ============================================================================

proptest! {
    #[test]
    fn runs_are_repeatable(s in ".{0,20}") {
        let unit = pipeline![trim(), lowercase(), email()].unwrap();
        let first = block_on(unit.run(Some(json!(s))));
        let second = block_on(unit.run(Some(json!(s))));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn trim_is_idempotent(s in "\\s{0,3}[a-z]{0,5}\\s{0,3}") {
        let once = block_on(trim().run(Some(s))).into_data().unwrap();
        let twice = block_on(trim().run(Some(once.clone()))).into_data().unwrap();
        prop_assert_eq!(once, twice);
    }
}

// ============================================================================
// PIPELINE: errors are exactly those of the first failing step
// ============================================================================

proptest! {
    #[test]
    fn pipeline_errors_come_from_first_failing_step(s in "[a-z]{0,12}") {
        let first = min_length(4);
        let second = max_length(8);
        let pipeline = pipeline![first, second].unwrap();

        let result = block_on(pipeline.run(Some(json!(s))));
        let first_result = block_on(first.run(Some(s.clone())));
        let second_result = block_on(second.run(Some(s.clone())));

        if !first_result.is_success() {
            prop_assert_eq!(result.errors(), first_result.errors());
        } else if !second_result.is_success() {
            prop_assert_eq!(result.errors(), second_result.errors());
        } else {
            prop_assert!(result.is_success());
        }
    }
}

// ============================================================================
// OBJECT SHAPE: one error per failing field plus one per unexpected key
// ============================================================================

proptest! {
    #[test]
    fn object_error_count(
        a in json_leaf(),
        b in json_leaf(),
        extra in proptest::collection::btree_set("[x-z]{1,3}", 0..4),
    ) {
        let shape = ObjectShape::new(
            schema! { "a" => integer(), "b" => trim() },
            ObjectShapeOptions::default(),
        );

        let mut object = serde_json::Map::new();
        object.insert("a".into(), a.clone());
        object.insert("b".into(), b.clone());
        for key in &extra {
            object.insert(key.clone(), json!(0));
        }

        let a_fails = !a.is_i64();
        let b_fails = !b.is_string();
        let expected = usize::from(a_fails) + usize::from(b_fails) + extra.len();

        let result = block_on(shape.run(Some(Value::Object(object))));
        prop_assert_eq!(result.errors().len(), expected);
        prop_assert_eq!(result.is_success(), expected == 0);
    }
}

// ============================================================================
// ARRAY SHAPE: every failing index reported, length preserved on success
// ============================================================================

proptest! {
    #[test]
    fn array_reports_every_failing_index(items in proptest::collection::vec(json_leaf(), 0..10)) {
        let shape = ArrayShape::new(integer().shared(), UnitOptions::default());
        let result = block_on(shape.run(Some(Value::Array(items.clone()))));

        let failing: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_i64())
            .map(|(i, _)| format!("[{i}]"))
            .collect();
        let reported: Vec<String> = result
            .errors()
            .iter()
            .filter_map(|e| e.field.clone())
            .collect();
        prop_assert_eq!(reported, failing.clone());

        if failing.is_empty() {
            prop_assert_eq!(result.into_data(), Some(Value::Array(items)));
        }
    }
}
