use proptest::prelude::*;

use super::*;
use crate::crud::FieldType;

fn spec(label: &str, field_type: FieldType, required: bool) -> FieldSpec {
    FieldSpec::new(label, field_type, required, None).unwrap_or_else(|_| unreachable!())
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_owned()))
}

fn contacts_schema() -> Vec<FieldSpec> {
    vec![
        spec("Name", FieldType::Text, true),
        spec("Phone", FieldType::Phone, false),
    ]
}

#[test]
fn shapes_item_in_schema_order() {
    let shaped = validate_and_shape(&contacts_schema(), &[ProposedField::new("Name", text("Ana"))]);

    assert!(shaped.is_ok());
    let shaped = shaped.unwrap_or_default();
    assert_eq!(shaped.len(), 2);
    assert_eq!(shaped[0].label(), "Name");
    assert_eq!(shaped[0].value(), text("Ana").as_ref());
    assert!(shaped[0].required());
    assert_eq!(shaped[1].label(), "Phone");
    assert_eq!(shaped[1].field_type(), FieldType::Phone);
    assert!(shaped[1].value().is_none());
}

#[test]
fn missing_required_field_is_rejected() {
    let result = validate_and_shape(
        &contacts_schema(),
        &[ProposedField::new("Phone", text("123"))],
    );

    assert!(matches!(
        result,
        Err(AppError::Validation(message)) if message == "field Name is required"
    ));
}

#[test]
fn blank_required_value_is_rejected() {
    let result = validate_and_shape(&contacts_schema(), &[ProposedField::new("Name", text("  "))]);
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = validate_and_shape(&contacts_schema(), &[ProposedField::new("Name", None)]);
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn false_and_zero_satisfy_required_fields() {
    let schema = vec![
        spec("Active", FieldType::Options, true),
        spec("Count", FieldType::Number, true),
    ];

    let result = validate_and_shape(
        &schema,
        &[
            ProposedField::new("Active", Some(FieldValue::Boolean(false))),
            ProposedField::new("Count", Some(FieldValue::Number(0.into()))),
        ],
    );

    assert!(result.is_ok());
}

#[test]
fn unknown_labels_are_dropped() {
    let proposed = [
        ProposedField::new("Name", text("Ana")),
        ProposedField::new("Nickname", text("Aninha")),
    ];

    let shaped = validate_and_shape(&contacts_schema(), &proposed).unwrap_or_default();
    assert!(shaped.iter().all(|field| field.label() != "Nickname"));
    assert_eq!(shaped.len(), contacts_schema().len());
}

#[test]
fn options_are_copied_but_not_enforced() {
    let schema = vec![
        FieldSpec::new(
            "Status",
            FieldType::RadioGroup,
            true,
            Some(vec!["open".to_owned(), "closed".to_owned()]),
        )
        .unwrap_or_else(|_| unreachable!()),
    ];

    let shaped = validate_and_shape(&schema, &[ProposedField::new("Status", text("archived"))])
        .unwrap_or_default();

    assert_eq!(shaped.len(), 1);
    assert_eq!(shaped[0].options().map(<[String]>::len), Some(2));
    assert_eq!(shaped[0].value(), text("archived").as_ref());
}

#[test]
fn merge_updates_matching_labels_only() {
    let existing = validate_and_shape(
        &contacts_schema(),
        &[
            ProposedField::new("Name", text("Ana")),
            ProposedField::new("Phone", text("123")),
        ],
    )
    .unwrap_or_default();

    let merged = merge_item_fields(
        &contacts_schema(),
        &existing,
        &[
            ProposedField::new("Phone", text("456")),
            ProposedField::new("Email", text("ana@example.com")),
        ],
    )
    .unwrap_or_default();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0], existing[0]);
    assert_eq!(merged[1].value(), text("456").as_ref());
}

#[test]
fn merge_refreshes_metadata_from_current_schema() {
    let existing = validate_and_shape(&contacts_schema(), &[ProposedField::new("Name", text("Ana"))])
        .unwrap_or_default();
    let current_schema = vec![
        spec("Name", FieldType::Text, true),
        spec("Phone", FieldType::Phone, true),
    ];

    let merged = merge_item_fields(
        &current_schema,
        &existing,
        &[ProposedField::new("Phone", text("789"))],
    )
    .unwrap_or_default();

    assert!(merged[1].required());
    assert!(!existing[1].required());
}

#[test]
fn merge_cannot_blank_required_field() {
    let existing = validate_and_shape(&contacts_schema(), &[ProposedField::new("Name", text("Ana"))])
        .unwrap_or_default();

    let result = merge_item_fields(
        &contacts_schema(),
        &existing,
        &[ProposedField::new("Name", text(""))],
    );

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn merge_keeps_fields_removed_from_schema() {
    let existing = validate_and_shape(
        &contacts_schema(),
        &[
            ProposedField::new("Name", text("Ana")),
            ProposedField::new("Phone", text("123")),
        ],
    )
    .unwrap_or_default();
    let current_schema = vec![spec("Name", FieldType::Text, true)];

    let merged = merge_item_fields(
        &current_schema,
        &existing,
        &[ProposedField::new("Phone", text("999"))],
    )
    .unwrap_or_default();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1].field_type(), FieldType::Phone);
    assert_eq!(merged[1].value(), text("999").as_ref());
}

fn schema_strategy() -> impl Strategy<Value = Vec<FieldSpec>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..8).prop_flat_map(|labels| {
        let labels: Vec<String> = labels.into_iter().collect();
        let count = labels.len();
        prop::collection::vec(any::<bool>(), count).prop_map(move |required| {
            labels
                .iter()
                .zip(required)
                .map(|(label, required)| spec(label, FieldType::Text, required))
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn shaped_output_follows_schema_order(
        schema in schema_strategy(),
        extra in prop::collection::vec("[A-Z]{1,8}", 0..4),
        reverse in any::<bool>(),
    ) {
        let mut proposed: Vec<ProposedField> = schema
            .iter()
            .map(|spec| ProposedField::new(spec.label(), text("value")))
            .chain(extra.iter().map(|label| ProposedField::new(label.as_str(), text("extra"))))
            .collect();
        if reverse {
            proposed.reverse();
        }

        let shaped = validate_and_shape(&schema, &proposed);
        prop_assert!(shaped.is_ok());
        let shaped = shaped.unwrap_or_default();

        prop_assert_eq!(shaped.len(), schema.len());
        for (field, spec) in shaped.iter().zip(schema.iter()) {
            prop_assert_eq!(field.label(), spec.label());
            prop_assert_eq!(field.required(), spec.required());
        }
    }

    #[test]
    fn omitted_fields_fail_only_when_required(schema in schema_strategy(), omitted in 0usize..8) {
        let omitted = omitted % schema.len();
        let proposed: Vec<ProposedField> = schema
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != omitted)
            .map(|(_, spec)| ProposedField::new(spec.label(), text("value")))
            .collect();

        let result = validate_and_shape(&schema, &proposed);
        prop_assert_eq!(result.is_err(), schema[omitted].required());
    }
}
