use chrono::{DateTime, Utc};
use crudbase_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::crud::{CrudId, FieldSpec, FieldType};
use crate::user::EmailAddress;

/// Unique identifier for a CRUD item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrudItemId(Uuid);

impl CrudItemId {
    /// Creates a new random item identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an item identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CrudItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CrudItemId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A value carried by an item field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean value.
    Boolean(bool),
    /// Numeric value, kept as parsed from JSON.
    Number(serde_json::Number),
    /// Text value.
    Text(String),
    /// Selected entries of a multiple-choice field.
    List(Vec<String>),
}

impl FieldValue {
    /// Converts a JSON value into a field value.
    ///
    /// `null` maps to `None`. Objects and non-string arrays are rejected.
    pub fn from_json(value: Value) -> AppResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(flag) => Ok(Some(Self::Boolean(flag))),
            Value::Number(number) => Ok(Some(Self::Number(number))),
            Value::String(text) => Ok(Some(Self::Text(text))),
            Value::Array(entries) => entries
                .into_iter()
                .map(|entry| match entry {
                    Value::String(text) => Ok(text),
                    _ => Err(AppError::Validation(
                        "list values must only contain strings".to_owned(),
                    )),
                })
                .collect::<AppResult<Vec<_>>>()
                .map(|entries| Some(Self::List(entries))),
            Value::Object(_) => Err(AppError::Validation(
                "field values must be text, number, boolean or a list of strings".to_owned(),
            )),
        }
    }

    /// Converts the value back into JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
            Self::List(entries) => Value::Array(
                entries
                    .iter()
                    .map(|entry| Value::String(entry.clone()))
                    .collect(),
            ),
        }
    }

    /// Returns whether the value is empty for required-field purposes.
    ///
    /// Blank text and empty lists are empty. `false` and `0` are values.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Boolean(_) | Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
            Self::List(entries) => entries.iter().all(|entry| entry.trim().is_empty()),
        }
    }

    /// Renders the value as searchable text.
    #[must_use]
    pub fn search_text(&self) -> String {
        match self {
            Self::Boolean(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
            Self::List(entries) => entries.join(" "),
        }
    }
}

/// A `{label, value}` pair supplied by a caller for create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedField {
    label: String,
    value: Option<FieldValue>,
}

impl ProposedField {
    /// Creates a proposed field.
    #[must_use]
    pub fn new(label: impl Into<String>, value: Option<FieldValue>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Returns the label the value targets.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the supplied value.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }
}

/// A canonical item field: schema metadata copied from a [`FieldSpec`] plus a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemField {
    label: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<FieldValue>,
}

impl ItemField {
    /// Builds a field from its schema entry and value.
    #[must_use]
    pub fn from_spec(spec: &FieldSpec, value: Option<FieldValue>) -> Self {
        Self {
            label: spec.label().to_owned(),
            field_type: spec.field_type(),
            required: spec.required(),
            options: spec.options().map(<[String]>::to_vec),
            value,
        }
    }

    /// Returns a copy carrying `value` with unchanged metadata.
    #[must_use]
    pub fn with_value(&self, value: Option<FieldValue>) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Returns the field label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the field type copied from the schema.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether the field was required when it was written.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the advisory option list.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// Returns the field value, absent when never supplied.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }
}

/// A record conforming to a definition's field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrudItem {
    id: CrudItemId,
    crud_id: CrudId,
    fields: Vec<ItemField>,
    creator_email: Option<EmailAddress>,
    created_at: DateTime<Utc>,
}

impl CrudItem {
    /// Creates a new item from canonical fields.
    #[must_use]
    pub fn new(crud_id: CrudId, fields: Vec<ItemField>, creator_email: Option<EmailAddress>) -> Self {
        Self {
            id: CrudItemId::new(),
            crud_id,
            fields,
            creator_email,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds an item from persisted state.
    #[must_use]
    pub fn restore(
        id: CrudItemId,
        crud_id: CrudId,
        fields: Vec<ItemField>,
        creator_email: Option<EmailAddress>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            crud_id,
            fields,
            creator_email,
            created_at,
        }
    }

    /// Replaces the item fields.
    pub fn replace_fields(&mut self, fields: Vec<ItemField>) {
        self.fields = fields;
    }

    /// Returns the item identifier.
    #[must_use]
    pub fn id(&self) -> CrudItemId {
        self.id
    }

    /// Returns the owning definition identifier.
    #[must_use]
    pub fn crud_id(&self) -> CrudId {
        self.crud_id
    }

    /// Returns the canonical field list.
    #[must_use]
    pub fn fields(&self) -> &[ItemField] {
        &self.fields
    }

    /// Returns the creator email when one was recorded.
    #[must_use]
    pub fn creator_email(&self) -> Option<&EmailAddress> {
        self.creator_email.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the text free-text search runs against: every field value, space separated.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.fields
            .iter()
            .filter_map(ItemField::value)
            .map(FieldValue::search_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the normalized search terms of [`Self::search_text`], space separated.
    ///
    /// Text indexes are built over this document rather than the raw text.
    #[must_use]
    pub fn search_document(&self) -> String {
        search_terms(&self.search_text()).join(" ")
    }
}

/// Splits text into lowercase alphanumeric search terms.
///
/// Punctuation always separates terms, so `ana@x.com` yields `ana`, `x` and `com`.
#[must_use]
pub fn search_terms(text: &str) -> Vec<String> {
    text.split(|character: char| !character.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_maps_supported_shapes() {
        assert_eq!(FieldValue::from_json(Value::Null).ok(), Some(None));
        assert_eq!(
            FieldValue::from_json(json!("Ana")).ok().flatten(),
            Some(FieldValue::Text("Ana".to_owned()))
        );
        assert_eq!(
            FieldValue::from_json(json!(false)).ok().flatten(),
            Some(FieldValue::Boolean(false))
        );
        assert_eq!(
            FieldValue::from_json(json!(["a", "b"])).ok().flatten(),
            Some(FieldValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
        assert!(matches!(
            FieldValue::from_json(json!(12.5)).ok().flatten(),
            Some(FieldValue::Number(_))
        ));
    }

    #[test]
    fn from_json_rejects_objects_and_mixed_lists() {
        assert!(FieldValue::from_json(json!({"nested": true})).is_err());
        assert!(FieldValue::from_json(json!(["a", 1])).is_err());
    }

    #[test]
    fn blank_detection_keeps_false_and_zero() {
        assert!(FieldValue::Text("   ".to_owned()).is_blank());
        assert!(FieldValue::List(Vec::new()).is_blank());
        assert!(!FieldValue::Boolean(false).is_blank());
        assert!(!FieldValue::Number(serde_json::Number::from(0)).is_blank());
    }

    #[test]
    fn item_field_serializes_without_absent_value() {
        let spec = FieldSpec::new("Phone", FieldType::Phone, false, None)
            .unwrap_or_else(|_| unreachable!());
        let field = ItemField::from_spec(&spec, None);

        let serialized = serde_json::to_value(&field).unwrap_or_default();
        assert_eq!(
            serialized,
            json!({"label": "Phone", "type": "phone", "required": false})
        );
    }

    #[test]
    fn item_search_text_joins_values() {
        let name = FieldSpec::new("Name", FieldType::Text, true, None)
            .unwrap_or_else(|_| unreachable!());
        let age = FieldSpec::new("Age", FieldType::Number, false, None)
            .unwrap_or_else(|_| unreachable!());
        let empty = FieldSpec::new("Notes", FieldType::Text, false, None)
            .unwrap_or_else(|_| unreachable!());
        let item = CrudItem::new(
            CrudId::new(),
            vec![
                ItemField::from_spec(&name, Some(FieldValue::Text("Ana Lima".to_owned()))),
                ItemField::from_spec(&age, Some(FieldValue::Number(31.into()))),
                ItemField::from_spec(&empty, None),
            ],
            None,
        );

        assert_eq!(item.search_text(), "Ana Lima 31");
        assert_eq!(search_terms(&item.search_text()), vec!["ana", "lima", "31"]);
        assert_eq!(item.search_document(), "ana lima 31");
    }

    #[test]
    fn punctuation_separates_search_terms() {
        assert_eq!(search_terms("Ana@X.com"), vec!["ana", "x", "com"]);
        assert!(search_terms("!!! ...").is_empty());
    }
}
