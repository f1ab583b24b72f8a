mod conversions;
mod types;

pub use types::{
    CreateItemRequest, CrudItemResponse, ItemFieldRequest, ItemFieldResponse, ItemPageResponse,
    ListItemsQuery, UpdateItemRequest,
};
