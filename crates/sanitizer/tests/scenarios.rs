//! End-to-end scenarios over the public API.

use nebula_sanitizer::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn email_pipeline() -> Pipeline {
    pipeline![trim(), lowercase(), email()].unwrap()
}

fn address() -> ObjectShape {
    ObjectShape::new(
        schema! {
            "street" => trim(),
            "city" => trim(),
            "zipCode" => trim(),
        },
        ObjectShapeOptions::default(),
    )
}

// ============================================================================
// PIPELINES
// ============================================================================

#[tokio::test]
async fn email_pipeline_canonicalizes_address() {
    let result = email_pipeline()
        .run(Some(json!("  User@Example.COM  ")))
        .await;

    assert!(result.is_success());
    assert!(result.errors().is_empty());
    assert_eq!(result.into_data(), Some(json!("user@example.com")));
}

#[tokio::test]
async fn email_pipeline_reports_only_the_format_error() {
    let result = email_pipeline().run(Some(json!("not-an-email"))).await;

    assert!(!result.is_success());
    assert!(result.data().is_none());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].code, "email_format");
}

#[test]
fn pipeline_without_steps_fails_to_build() {
    let error = Pipeline::new(Vec::new(), UnitOptions::default()).unwrap_err();
    assert!(matches!(error, BuildError::EmptyPipeline));
    assert_eq!(error.to_string(), "pipeline requires at least one step");
}

// ============================================================================
// OBJECT SHAPES
// ============================================================================

#[tokio::test]
async fn object_shape_trims_every_field() {
    let result = address()
        .run(Some(json!({
            "street": "  123 Main St  ",
            "city": "  Springfield  ",
            "zipCode": "  12345  ",
        })))
        .await;

    assert_eq!(
        result.into_data(),
        Some(json!({"street": "123 Main St", "city": "Springfield", "zipCode": "12345"}))
    );
}

#[tokio::test]
async fn object_shape_rejects_unexpected_field() {
    let result = address()
        .run(Some(json!({"street": "x", "city": "y", "zipCode": "z", "extra": "w"})))
        .await;

    assert!(!result.is_success());
    assert!(result.data().is_none());
    assert!(
        result
            .errors()
            .iter()
            .any(|e| e.code == ValidationError::UNEXPECTED_FIELD && e.field.as_deref() == Some("extra"))
    );
}

#[tokio::test]
async fn nested_object_errors_use_dotted_paths() {
    let shape = ObjectShape::new(
        schema! {
            "address" => ObjectShape::new(
                schema! {
                    "city" => ObjectShape::new(
                        schema! { "population" => integer() },
                        ObjectShapeOptions::default(),
                    ),
                },
                ObjectShapeOptions::default(),
            ),
        },
        ObjectShapeOptions::default(),
    );

    let result = shape
        .run(Some(json!({"address": {"city": {"population": "many"}}})))
        .await;

    assert_eq!(result.errors().len(), 1);
    assert_eq!(
        result.errors()[0].field.as_deref(),
        Some("address.city.population")
    );
}

// ============================================================================
// ARRAY SHAPES
// ============================================================================

#[tokio::test]
async fn array_shape_reports_failing_index() {
    let numbers = ArrayShape::new(integer().shared(), UnitOptions::default());
    let result = numbers.run(Some(json!([1, "not-a-number", 3]))).await;

    assert!(!result.is_success());
    let at_one: Vec<_> = result
        .errors()
        .iter()
        .filter(|e| e.field.as_deref() == Some("[1]"))
        .collect();
    assert_eq!(at_one.len(), 1);
    assert_eq!(result.errors().len(), 1);
}

#[tokio::test]
async fn array_of_objects() {
    let people = ArrayShape::new(
        ObjectShape::new(
            schema! {
                "name" => pipeline![trim(), min_length(1)].unwrap(),
                "tags" => ArrayShape::new(lowercase().shared(), UnitOptions::optional()),
            },
            ObjectShapeOptions::default(),
        )
        .shared(),
        UnitOptions::default(),
    );

    let result = people
        .run(Some(json!([
            {"name": " Ada ", "tags": ["MATH"]},
            {"name": "Grace"},
        ])))
        .await;
    assert_eq!(
        result.into_data(),
        Some(json!([{"name": "Ada", "tags": ["math"]}, {"name": "Grace"}]))
    );

    let result = people
        .run(Some(json!([{"name": "  "}, {"name": "x", "tags": ["ok", 7]}])))
        .await;
    let fields: Vec<_> = result
        .errors()
        .iter()
        .filter_map(|e| e.field.as_deref())
        .collect();
    assert_eq!(fields, ["[0].name", "[1].tags.[1]"]);
}

// ============================================================================
// REQUIRED GATE
// ============================================================================

#[tokio::test]
async fn every_kind_of_unit_shares_the_required_gate() {
    let units: Vec<SharedUnit> = vec![
        trim().shared(),
        email_pipeline().shared(),
        address().shared(),
        ArrayShape::new(integer().shared(), UnitOptions::default()).shared(),
    ];

    for unit in &units {
        for input in [None, Some(Value::Null)] {
            let result = unit.run(input).await;
            assert_eq!(result.errors(), &[ValidationError::required()]);
            assert!(result.data().is_none());
        }
    }
}

#[tokio::test]
async fn optional_units_pass_missing_values_through() {
    let units: Vec<SharedUnit> = vec![
        Trim::optional().shared(),
        pipeline![trim(); UnitOptions::optional()].unwrap().shared(),
        address()
            .copy_with(|o| o.base.is_optional = true)
            .unwrap()
            .shared(),
        ArrayShape::new(integer().shared(), UnitOptions::optional()).shared(),
    ];

    for unit in &units {
        let absent = unit.run(None).await;
        assert!(absent.is_success());
        assert_eq!(absent.into_data(), None);

        let null = unit.run(Some(Value::Null)).await;
        assert!(null.is_success());
        assert_eq!(null.into_data(), Some(Value::Null));
    }
}

// ============================================================================
// SERIALIZED RESULTS
// ============================================================================

#[tokio::test]
async fn results_serialize_for_transport() {
    let result = address().run(Some(json!({"street": 1, "city": "y", "zipCode": "z"}))).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "success": false,
            "errors": [{
                "code": "string",
                "message": "Value is not valid text",
                "field": "street",
                "context": {"actual": "number"},
            }],
        })
    );
}
