use super::client::ApiClient;
use super::models::{ItemDto, ItemRequest};
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::page::{Page, PageRequest, PageWrapper};
use log::info;
use reqwest::Method;

const RESOURCE: &str = "items";

/// Item catalogue endpoints (`<base>/items`)
#[derive(Debug, Clone)]
pub struct ItemService {
    api: ApiClient,
}

impl ItemService {
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        Ok(ItemService {
            api: ApiClient::new(config, RESOURCE)?,
        })
    }

    pub fn get_items(&self, request: &PageRequest, filter: &str) -> Result<Page<ItemDto>, AdminError> {
        let wrapper: PageWrapper<ItemDto> = self.api.get_json(&[], &item_query(request, filter))?;
        Ok(wrapper.into_page(request))
    }

    pub fn create_item(&self, name: &str, price: i64) -> Result<(), AdminError> {
        let body = ItemRequest {
            id: None,
            name,
            price,
        };
        self.api.send_json(Method::POST, &[], &body)?;
        info!("Created item {} (price {})", name, price);
        Ok(())
    }

    pub fn update_item(&self, id: i64, name: &str, price: i64) -> Result<(), AdminError> {
        let body = ItemRequest {
            id: Some(id),
            name,
            price,
        };
        self.api.send_json(Method::PUT, &[], &body)?;
        info!("Updated item {}: {} (price {})", id, name, price);
        Ok(())
    }

    pub fn delete_item(&self, id: i64) -> Result<(), AdminError> {
        self.api.delete(&[&id.to_string()])?;
        info!("Deleted item {}", id);
        Ok(())
    }
}

/// Paging parameters plus the name filter, which is always sent (empty when unset)
fn item_query(request: &PageRequest, filter: &str) -> Vec<(&'static str, String)> {
    let mut query = request.query_pairs();
    query.push(("name", filter.to_string()));
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Sort, SortOrder};

    #[test]
    fn test_item_query_always_has_name() {
        let query = item_query(&PageRequest::unsorted(0, 5), "");
        assert_eq!(
            query,
            vec![
                ("page", "0".to_string()),
                ("size", "5".to_string()),
                ("name", String::new()),
            ]
        );
    }

    #[test]
    fn test_item_query_with_sort_and_filter() {
        let request = PageRequest::of(1, 10, Sort::by(vec![SortOrder::desc("price")]));
        let query = item_query(&request, "bolt");
        assert_eq!(query[2], ("sort", "price,desc".to_string()));
        assert_eq!(query[3], ("name", "bolt".to_string()));
    }
}
