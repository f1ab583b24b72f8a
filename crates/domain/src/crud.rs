use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use crudbase_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::EmailAddress;

/// Unique identifier for a CRUD definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrudId(Uuid);

impl CrudId {
    /// Creates a new random definition identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a definition identifier from an existing UUID value.
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

impl Default for CrudId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CrudId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Field types a definition may declare.
///
/// Types are advisory metadata for clients: item values are never checked
/// against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Numeric input.
    Number,
    /// Single choice from `options`.
    Options,
    /// Free text with suggestions.
    Autocomplete,
    /// Multiple choices from `options`.
    MultipleOptions,
    /// Date input.
    Date,
    /// Single choice rendered as radio buttons.
    RadioGroup,
    /// Brazilian individual taxpayer number.
    Cpf,
    /// Brazilian company taxpayer number.
    Cnpj,
    /// Phone number.
    Phone,
}

impl FieldType {
    /// Returns a stable storage value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Options => "options",
            Self::Autocomplete => "autocomplete",
            Self::MultipleOptions => "multipleOptions",
            Self::Date => "date",
            Self::RadioGroup => "radioGroup",
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "options" => Ok(Self::Options),
            "autocomplete" => Ok(Self::Autocomplete),
            "multipleOptions" => Ok(Self::MultipleOptions),
            "date" => Ok(Self::Date),
            "radioGroup" => Ok(Self::RadioGroup),
            "cpf" => Ok(Self::Cpf),
            "cnpj" => Ok(Self::Cnpj),
            "phone" => Ok(Self::Phone),
            _ => Err(AppError::Validation(format!(
                "unknown field type '{value}'"
            ))),
        }
    }
}

/// One field declared by a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    label: NonEmptyString,
    #[serde(rename = "type")]
    field_type: FieldType,
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
}

impl FieldSpec {
    /// Creates a field specification with a validated label.
    pub fn new(
        label: impl Into<String>,
        field_type: FieldType,
        required: bool,
        options: Option<Vec<String>>,
    ) -> AppResult<Self> {
        Ok(Self {
            label: NonEmptyString::new(label)
                .map_err(|_| AppError::Validation("field label must not be empty".to_owned()))?,
            field_type,
            required,
            options,
        })
    }

    /// Returns the label identifying this field in definitions and items.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the declared field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether items must carry a non-empty value for this field.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the advisory option list.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }
}

/// Access level granted to a collaborator. Recorded only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// May read items.
    Readonly,
    /// May manage the definition and its items.
    Admin,
}

impl AccessLevel {
    /// Returns a stable storage value for the access level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readonly => "readonly",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "readonly" => Ok(Self::Readonly),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!(
                "unknown access level '{value}'"
            ))),
        }
    }
}

/// Collaborator entry on a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccess {
    email: EmailAddress,
    access_level: AccessLevel,
}

impl UserAccess {
    /// Creates a collaborator entry.
    #[must_use]
    pub fn new(email: EmailAddress, access_level: AccessLevel) -> Self {
        Self {
            email,
            access_level,
        }
    }

    /// Returns the collaborator email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the granted access level.
    #[must_use]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }
}

/// A user-authored schema of named, typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudDefinition {
    id: CrudId,
    name: NonEmptyString,
    fields: Vec<FieldSpec>,
    creator_email: EmailAddress,
    users_with_access: Vec<UserAccess>,
    created_at: DateTime<Utc>,
}

impl CrudDefinition {
    /// Creates a new definition owned by `creator_email`.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        creator_email: EmailAddress,
        users_with_access: Vec<UserAccess>,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name)
            .map_err(|_| AppError::Validation("name is required".to_owned()))?;
        validate_fields(&fields)?;

        Ok(Self {
            id: CrudId::new(),
            name,
            fields,
            creator_email,
            users_with_access,
            created_at: Utc::now(),
        })
    }

    /// Rebuilds a definition from persisted state without re-validating it.
    #[must_use]
    pub fn restore(
        id: CrudId,
        name: NonEmptyString,
        fields: Vec<FieldSpec>,
        creator_email: EmailAddress,
        users_with_access: Vec<UserAccess>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            fields,
            creator_email,
            users_with_access,
            created_at,
        }
    }

    /// Overwrites the name and field schema in place.
    pub fn replace_schema(&mut self, name: impl Into<String>, fields: Vec<FieldSpec>) -> AppResult<()> {
        let name = NonEmptyString::new(name)
            .map_err(|_| AppError::Validation("name is required".to_owned()))?;
        validate_fields(&fields)?;

        self.name = name;
        self.fields = fields;
        Ok(())
    }

    /// Returns the definition identifier.
    #[must_use]
    pub fn id(&self) -> CrudId {
        self.id
    }

    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the ordered field schema.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the owner email.
    #[must_use]
    pub fn creator_email(&self) -> &EmailAddress {
        &self.creator_email
    }

    /// Returns the recorded collaborator list.
    #[must_use]
    pub fn users_with_access(&self) -> &[UserAccess] {
        &self.users_with_access
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_fields(fields: &[FieldSpec]) -> AppResult<()> {
    if fields.is_empty() {
        return Err(AppError::Validation("fields are required".to_owned()));
    }

    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.label()) {
            return Err(AppError::Validation(format!(
                "duplicate field label '{}'",
                field.label()
            )));
        }
    }

    Ok(())
}
