use crudbase_domain::{
    AccessLevel, CrudDefinition, CrudId, CrudItem, FieldSpec, FieldType, ProposedField,
};

/// One field of a definition as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpecInput {
    /// Field label, unique within the definition.
    pub label: String,
    /// Declared field type.
    pub field_type: FieldType,
    /// Required marker.
    pub required: bool,
    /// Advisory option list.
    pub options: Option<Vec<String>>,
}

/// Collaborator entry as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccessInput {
    /// Collaborator email.
    pub email: String,
    /// Granted access level.
    pub access_level: AccessLevel,
}

/// Input payload for definition creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCrudInput {
    /// Definition name.
    pub name: String,
    /// Ordered field schema.
    pub fields: Vec<FieldSpecInput>,
    /// Owner email.
    pub creator_email: String,
    /// Recorded collaborators.
    pub users_with_access: Vec<UserAccessInput>,
}

/// Input payload for definition updates. Name and fields are overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCrudInput {
    /// New definition name.
    pub name: String,
    /// New ordered field schema.
    pub fields: Vec<FieldSpecInput>,
}

/// Input payload for item creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItemInput {
    /// Proposed `{label, value}` pairs.
    pub fields: Vec<ProposedField>,
    /// Optional creator email.
    pub creator_email: Option<String>,
}

/// Caller-facing listing parameters. Pages are one-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListQuery {
    /// Free-text search; blank means no text predicate.
    pub search: Option<String>,
    /// Page number, defaults to 1.
    pub page: Option<usize>,
    /// Page size, defaults to 10.
    pub page_size: Option<usize>,
}

/// Store-facing item query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrudItemQuery {
    /// Owning definition.
    pub crud_id: CrudId,
    /// Free-text predicate. Every term must match.
    pub search: Option<String>,
    /// Number of matching items skipped.
    pub offset: usize,
    /// Maximum items returned.
    pub limit: usize,
}

/// One page of items together with the schema needed to render them.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    /// Items in the requested window.
    pub items: Vec<CrudItem>,
    /// Owning definition name.
    pub name: String,
    /// Owning definition field schema.
    pub fields: Vec<FieldSpec>,
}

/// Outcome of deleting a definition together with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeDeleteResult {
    /// The removed definition.
    pub definition: CrudDefinition,
    /// Number of items removed with it.
    pub deleted_item_count: u64,
}
