use super::*;

impl CrudService {
    /// Lists one page of a definition's items, optionally filtered by free text.
    ///
    /// The text index is created on the first non-blank search.
    pub async fn list_items(&self, crud_id: CrudId, query: ItemListQuery) -> AppResult<ItemPage> {
        let definition = self.require_definition(crud_id).await?;
        let (offset, limit) = Self::page_window(query.page, query.page_size)?;

        let search = query
            .search
            .map(|search| search.trim().to_owned())
            .filter(|search| !search.is_empty());
        if search.is_some() {
            self.ensure_text_index().await?;
        }

        let items = self
            .item_repository
            .query_items(CrudItemQuery {
                crud_id,
                search,
                offset,
                limit,
            })
            .await?;

        Ok(ItemPage {
            items,
            name: definition.name().as_str().to_owned(),
            fields: definition.fields().to_vec(),
        })
    }

    async fn ensure_text_index(&self) -> AppResult<()> {
        if self.text_index_ready.load(Ordering::Acquire) {
            return Ok(());
        }

        if !self.item_repository.text_index_exists().await? {
            self.item_repository.create_text_index().await?;
        }

        self.text_index_ready.store(true, Ordering::Release);
        Ok(())
    }

    pub(super) fn page_window(
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> AppResult<(usize, usize)> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(AppError::Validation("page must be at least 1".to_owned()));
        }

        if page_size == 0 {
            return Err(AppError::Validation(
                "pageSize must be at least 1".to_owned(),
            ));
        }

        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| AppError::Validation("page is out of range".to_owned()))?;

        Ok((offset, page_size))
    }
}
