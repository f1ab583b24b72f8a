use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use crudbase_core::{AppError, AppResult};
use crudbase_domain::{
    AccessLevel, CrudDefinition, CrudId, CrudItem, CrudItemId, EmailAddress, FieldType,
    FieldValue, ProposedField, search_terms,
};
use tokio::sync::Mutex;

use crate::{
    CreateCrudInput, CreateItemInput, CrudDefinitionRepository, CrudItemQuery,
    CrudItemRepository, FieldSpecInput, ItemListQuery, UpdateCrudInput, UserAccessInput,
};

use super::CrudService;

#[derive(Default)]
struct FakeRepository {
    definitions: Mutex<HashMap<CrudId, CrudDefinition>>,
    items: Mutex<Vec<CrudItem>>,
    text_index: Mutex<bool>,
    text_index_creations: Mutex<usize>,
    fail_batch_delete: bool,
    late_items: Mutex<Vec<CrudItem>>,
}

impl FakeRepository {
    fn failing_batch_delete() -> Self {
        Self {
            fail_batch_delete: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CrudDefinitionRepository for FakeRepository {
    async fn create_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        self.definitions
            .lock()
            .await
            .insert(definition.id(), definition);
        Ok(())
    }

    async fn find_definition(&self, crud_id: CrudId) -> AppResult<Option<CrudDefinition>> {
        Ok(self.definitions.lock().await.get(&crud_id).cloned())
    }

    async fn list_definitions_by_creator(
        &self,
        creator_email: &EmailAddress,
    ) -> AppResult<Vec<CrudDefinition>> {
        Ok(self
            .definitions
            .lock()
            .await
            .values()
            .filter_map(|definition| {
                (definition.creator_email() == creator_email).then_some(definition.clone())
            })
            .collect())
    }

    async fn update_definition(&self, definition: CrudDefinition) -> AppResult<()> {
        let mut definitions = self.definitions.lock().await;
        let Some(stored) = definitions.get_mut(&definition.id()) else {
            return Err(AppError::NotFound("definition not found".to_owned()));
        };
        *stored = definition;
        Ok(())
    }

    async fn delete_definition(&self, crud_id: CrudId) -> AppResult<bool> {
        if self
            .items
            .lock()
            .await
            .iter()
            .any(|item| item.crud_id() == crud_id)
        {
            return Err(AppError::Conflict("definition still has items".to_owned()));
        }

        Ok(self.definitions.lock().await.remove(&crud_id).is_some())
    }
}

#[async_trait]
impl CrudItemRepository for FakeRepository {
    async fn create_item(&self, item: CrudItem) -> AppResult<()> {
        self.items.lock().await.push(item);
        Ok(())
    }

    async fn find_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|item| item.id() == item_id)
            .cloned())
    }

    async fn query_items(&self, query: CrudItemQuery) -> AppResult<Vec<CrudItem>> {
        if query.search.is_some() && !*self.text_index.lock().await {
            return Err(AppError::Internal("text index required".to_owned()));
        }

        let terms = query
            .search
            .as_deref()
            .map(search_terms)
            .unwrap_or_default();

        Ok(self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| item.crud_id() == query.crud_id)
            .filter(|item| {
                let item_terms = search_terms(&item.search_text());
                terms.iter().all(|term| item_terms.contains(term))
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn update_item(&self, item: CrudItem) -> AppResult<()> {
        let mut items = self.items.lock().await;
        let Some(stored) = items.iter_mut().find(|stored| stored.id() == item.id()) else {
            return Err(AppError::NotFound("item not found".to_owned()));
        };
        *stored = item;
        Ok(())
    }

    async fn delete_item(&self, item_id: CrudItemId) -> AppResult<Option<CrudItem>> {
        let mut items = self.items.lock().await;
        let position = items.iter().position(|item| item.id() == item_id);
        Ok(position.map(|position| items.remove(position)))
    }

    async fn delete_items_by_crud(&self, crud_id: CrudId) -> AppResult<u64> {
        if self.fail_batch_delete {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|item| item.crud_id() != crud_id);
        let removed = (before - items.len()) as u64;

        // Lands after the batch, as a concurrent create would.
        items.append(&mut *self.late_items.lock().await);
        Ok(removed)
    }

    async fn text_index_exists(&self) -> AppResult<bool> {
        Ok(*self.text_index.lock().await)
    }

    async fn create_text_index(&self) -> AppResult<()> {
        *self.text_index.lock().await = true;
        *self.text_index_creations.lock().await += 1;
        Ok(())
    }
}

fn service_with(repository: Arc<FakeRepository>) -> CrudService {
    CrudService::new(repository.clone(), repository)
}

fn contacts_input() -> CreateCrudInput {
    CreateCrudInput {
        name: "Contacts".to_owned(),
        fields: vec![
            FieldSpecInput {
                label: "Name".to_owned(),
                field_type: FieldType::Text,
                required: true,
                options: None,
            },
            FieldSpecInput {
                label: "Phone".to_owned(),
                field_type: FieldType::Phone,
                required: false,
                options: None,
            },
        ],
        creator_email: "owner@example.com".to_owned(),
        users_with_access: vec![UserAccessInput {
            email: "viewer@example.com".to_owned(),
            access_level: AccessLevel::Readonly,
        }],
    }
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_owned()))
}

fn item_input(fields: Vec<ProposedField>) -> CreateItemInput {
    CreateItemInput {
        fields,
        creator_email: None,
    }
}

async fn create_contacts(service: &CrudService) -> CrudDefinition {
    service
        .create_definition(contacts_input())
        .await
        .unwrap_or_else(|_| unreachable!())
}

async fn seed_named_items(service: &CrudService, crud_id: CrudId, names: &[&str]) {
    for name in names {
        let created = service
            .create_item(crud_id, item_input(vec![ProposedField::new("Name", text(name))]))
            .await;
        assert!(created.is_ok());
    }
}

fn names(items: &[CrudItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.fields()[0].value())
        .map(FieldValue::search_text)
        .collect()
}

#[tokio::test]
async fn create_definition_requires_name_and_fields() {
    let service = service_with(Arc::new(FakeRepository::default()));

    let mut missing_name = contacts_input();
    missing_name.name = " ".to_owned();
    assert!(matches!(
        service.create_definition(missing_name).await,
        Err(AppError::Validation(_))
    ));

    let mut missing_fields = contacts_input();
    missing_fields.fields.clear();
    assert!(matches!(
        service.create_definition(missing_fields).await,
        Err(AppError::Validation(_))
    ));

    let created = service.create_definition(contacts_input()).await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.creator_email().as_str(), "owner@example.com");
    assert_eq!(created.users_with_access().len(), 1);
}

#[tokio::test]
async fn contacts_item_is_reshaped_against_schema() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;

    let item = service
        .create_item(
            definition.id(),
            item_input(vec![ProposedField::new("Name", text("Ana"))]),
        )
        .await;
    assert!(item.is_ok());
    let item = item.unwrap_or_else(|_| unreachable!());
    assert_eq!(item.fields().len(), 2);
    assert_eq!(item.fields()[0].label(), "Name");
    assert_eq!(item.fields()[0].value(), text("Ana").as_ref());
    assert_eq!(item.fields()[1].label(), "Phone");
    assert!(item.fields()[1].value().is_none());

    let missing_name = service
        .create_item(
            definition.id(),
            item_input(vec![ProposedField::new("Phone", text("123"))]),
        )
        .await;
    assert!(matches!(missing_name, Err(AppError::Validation(message)) if message == "field Name is required"));
}

#[tokio::test]
async fn create_item_for_unknown_definition_is_not_found() {
    let service = service_with(Arc::new(FakeRepository::default()));

    let result = service
        .create_item(
            CrudId::new(),
            item_input(vec![ProposedField::new("Name", text("Ana"))]),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn create_item_records_creator_email() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;

    let item = service
        .create_item(
            definition.id(),
            CreateItemInput {
                fields: vec![ProposedField::new("Name", text("Ana"))],
                creator_email: Some("Editor@Example.com".to_owned()),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        item.creator_email().map(EmailAddress::as_str),
        Some("editor@example.com")
    );
}

#[tokio::test]
async fn list_items_pages_with_one_based_windows() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let all_names: Vec<String> = (0..25).map(|index| format!("Person{index}")).collect();
    let all_refs: Vec<&str> = all_names.iter().map(String::as_str).collect();
    seed_named_items(&service, definition.id(), &all_refs).await;

    let second_page = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: None,
                page: Some(2),
                page_size: Some(10),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(names(&second_page.items), all_names[10..20].to_vec());
    assert_eq!(second_page.name, "Contacts");
    assert_eq!(second_page.fields.len(), 2);

    let beyond = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: None,
                page: Some(4),
                page_size: Some(10),
            },
        )
        .await;
    assert!(beyond.is_ok());
    assert!(beyond.unwrap_or_else(|_| unreachable!()).items.is_empty());
}

#[tokio::test]
async fn list_items_defaults_to_first_page_of_ten() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let all_names: Vec<String> = (0..12).map(|index| format!("Person{index}")).collect();
    let all_refs: Vec<&str> = all_names.iter().map(String::as_str).collect();
    seed_named_items(&service, definition.id(), &all_refs).await;

    let first = service
        .list_items(definition.id(), ItemListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    let again = service
        .list_items(definition.id(), ItemListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first.items.len(), 10);
    assert_eq!(first, again);
}

#[tokio::test]
async fn list_items_rejects_zero_page_and_page_size() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;

    let zero_page = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: None,
                page: Some(0),
                page_size: None,
            },
        )
        .await;
    assert!(matches!(zero_page, Err(AppError::Validation(_))));

    let zero_size = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: None,
                page: None,
                page_size: Some(0),
            },
        )
        .await;
    assert!(matches!(zero_size, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn list_items_for_unknown_definition_is_not_found() {
    let service = service_with(Arc::new(FakeRepository::default()));

    let result = service
        .list_items(CrudId::new(), ItemListQuery::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn first_search_creates_text_index_once() {
    let repository = Arc::new(FakeRepository::default());
    let service = service_with(repository.clone());
    let definition = create_contacts(&service).await;
    seed_named_items(&service, definition.id(), &["Ana Lima", "Bruno Lima", "Carla"]).await;

    let unfiltered = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: Some("   ".to_owned()),
                ..ItemListQuery::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(unfiltered.items.len(), 3);
    assert_eq!(*repository.text_index_creations.lock().await, 0);

    let lima = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: Some("lima".to_owned()),
                ..ItemListQuery::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(names(&lima.items), vec!["Ana Lima", "Bruno Lima"]);

    let ana_lima = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: Some("ana LIMA".to_owned()),
                ..ItemListQuery::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(names(&ana_lima.items), vec!["Ana Lima"]);

    assert_eq!(*repository.text_index_creations.lock().await, 1);
}

#[tokio::test]
async fn existing_text_index_is_not_recreated() {
    let repository = Arc::new(FakeRepository::default());
    *repository.text_index.lock().await = true;
    let service = service_with(repository.clone());
    let definition = create_contacts(&service).await;

    let result = service
        .list_items(
            definition.id(),
            ItemListQuery {
                search: Some("ana".to_owned()),
                ..ItemListQuery::default()
            },
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(*repository.text_index_creations.lock().await, 0);
}

#[tokio::test]
async fn list_definitions_by_owner_filters_on_creator() {
    let service = service_with(Arc::new(FakeRepository::default()));
    create_contacts(&service).await;
    let mut other = contacts_input();
    other.creator_email = "someone@example.com".to_owned();
    assert!(service.create_definition(other).await.is_ok());

    let owned = service
        .list_definitions_by_owner("OWNER@example.com")
        .await
        .unwrap_or_default();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].creator_email().as_str(), "owner@example.com");

    assert!(matches!(
        service.list_definitions_by_owner("not-an-email").await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn update_definition_overwrites_schema() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;

    let updated = service
        .update_definition(
            definition.id(),
            UpdateCrudInput {
                name: "People".to_owned(),
                fields: vec![FieldSpecInput {
                    label: "Email".to_owned(),
                    field_type: FieldType::Text,
                    required: true,
                    options: None,
                }],
            },
        )
        .await;
    assert!(updated.is_ok());

    let stored = service
        .find_definition(definition.id())
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!());
    assert_eq!(stored.name().as_str(), "People");
    assert_eq!(stored.fields()[0].label(), "Email");

    let missing = service
        .update_definition(
            CrudId::new(),
            UpdateCrudInput {
                name: "People".to_owned(),
                fields: Vec::new(),
            },
        )
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_definition_cascades_to_items() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let survivor = create_contacts(&service).await;
    seed_named_items(&service, definition.id(), &["Ana", "Bruno"]).await;
    seed_named_items(&service, survivor.id(), &["Carla"]).await;

    let deleted = service.delete_definition(definition.id()).await;
    assert!(deleted.is_ok());
    let deleted = deleted.unwrap_or_else(|_| unreachable!());
    assert_eq!(deleted.deleted_item_count, 2);
    assert_eq!(deleted.definition.id(), definition.id());

    assert!(
        service
            .find_definition(definition.id())
            .await
            .unwrap_or_default()
            .is_none()
    );
    assert!(matches!(
        service.get_definition(definition.id()).await,
        Err(AppError::NotFound(_))
    ));

    let remaining = service
        .list_items(survivor.id(), ItemListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(remaining.items.len(), 1);

    assert!(matches!(
        service.delete_definition(definition.id()).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn failed_item_batch_keeps_definition() {
    let service = service_with(Arc::new(FakeRepository::failing_batch_delete()));
    let definition = create_contacts(&service).await;
    seed_named_items(&service, definition.id(), &["Ana"]).await;

    let result = service.delete_definition(definition.id()).await;
    assert!(matches!(result, Err(AppError::Internal(_))));

    let still_there = service.find_definition(definition.id()).await;
    assert!(still_there.unwrap_or_default().is_some());
}

#[tokio::test]
async fn item_created_during_cascade_is_removed_by_second_batch() {
    let repository = Arc::new(FakeRepository::default());
    let service = service_with(repository.clone());
    let definition = create_contacts(&service).await;
    seed_named_items(&service, definition.id(), &["Ana", "Bruno"]).await;
    let late = CrudItem::new(definition.id(), Vec::new(), None);
    repository.late_items.lock().await.push(late);

    let deleted = service.delete_definition(definition.id()).await;

    assert!(deleted.is_ok());
    assert_eq!(deleted.map(|result| result.deleted_item_count).ok(), Some(3));
    assert!(repository.items.lock().await.is_empty());
    assert!(
        service
            .find_definition(definition.id())
            .await
            .unwrap_or_default()
            .is_none()
    );
}

#[tokio::test]
async fn update_item_merges_by_label() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let item = service
        .create_item(
            definition.id(),
            item_input(vec![
                ProposedField::new("Name", text("Ana")),
                ProposedField::new("Phone", text("123")),
            ]),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = service
        .update_item(
            definition.id(),
            item.id(),
            vec![
                ProposedField::new("Phone", text("456")),
                ProposedField::new("Nickname", text("Aninha")),
            ],
        )
        .await;
    assert!(updated.is_ok());

    let stored = service
        .get_item(item.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(stored.fields().len(), 2);
    assert_eq!(stored.fields()[0].value(), text("Ana").as_ref());
    assert_eq!(stored.fields()[1].value(), text("456").as_ref());

    let blanked = service
        .update_item(
            definition.id(),
            item.id(),
            vec![ProposedField::new("Name", None)],
        )
        .await;
    assert!(matches!(blanked, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_item_requires_definition_and_item() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let other = create_contacts(&service).await;
    let item = service
        .create_item(
            definition.id(),
            item_input(vec![ProposedField::new("Name", text("Ana"))]),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let unknown_definition = service
        .update_item(CrudId::new(), item.id(), Vec::new())
        .await;
    assert!(matches!(unknown_definition, Err(AppError::NotFound(_))));

    let unknown_item = service
        .update_item(definition.id(), CrudItemId::new(), Vec::new())
        .await;
    assert!(matches!(unknown_item, Err(AppError::NotFound(_))));

    let wrong_definition = service.update_item(other.id(), item.id(), Vec::new()).await;
    assert!(matches!(wrong_definition, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_item_returns_removed_record_once() {
    let service = service_with(Arc::new(FakeRepository::default()));
    let definition = create_contacts(&service).await;
    let item = service
        .create_item(
            definition.id(),
            item_input(vec![ProposedField::new("Name", text("Ana"))]),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let first = service.delete_item(item.id()).await.unwrap_or_default();
    assert_eq!(first.map(|removed| removed.id()), Some(item.id()));

    let second = service.delete_item(item.id()).await.unwrap_or_default();
    assert!(second.is_none());

    assert!(matches!(
        service.get_item(item.id()).await,
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn page_window_computes_offsets() {
    assert_eq!(CrudService::page_window(None, None).ok(), Some((0, 10)));
    assert_eq!(CrudService::page_window(Some(3), Some(25)).ok(), Some((50, 25)));
    assert!(CrudService::page_window(Some(usize::MAX), Some(usize::MAX)).is_err());
}
