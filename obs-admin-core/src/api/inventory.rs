use super::client::ApiClient;
use super::models::{InventoryDetails, InventoryRequest, InventorySummary, SummaryEnvelope};
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::page::{Page, PageRequest, PageWrapper};
use log::info;
use reqwest::Method;

const RESOURCE: &str = "inventories";

/// Stock movement endpoints (`<base>/inventories`)
#[derive(Debug, Clone)]
pub struct InventoryService {
    api: ApiClient,
}

impl InventoryService {
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        Ok(InventoryService {
            api: ApiClient::new(config, RESOURCE)?,
        })
    }

    pub fn save_inventory(&self, body: &InventoryRequest) -> Result<(), AdminError> {
        self.api.send_json(Method::POST, &[], body)?;
        info!(
            "Saving inventory for item: {}, quantity: {}, Type: {}",
            body.item_id, body.quantity, body.kind
        );
        Ok(())
    }

    /// All movements, or only those of item `filter` when it is not blank
    pub fn get_all_inventory(
        &self,
        request: &PageRequest,
        filter: &str,
    ) -> Result<Page<InventoryDetails>, AdminError> {
        let item_id = filter.trim();
        let segments: Vec<&str> = if item_id.is_empty() {
            Vec::new()
        } else {
            vec!["items", item_id]
        };
        let wrapper: PageWrapper<InventoryDetails> =
            self.api.get_json(&segments, &paging_query(request))?;
        Ok(wrapper.into_page(request))
    }

    pub fn get_summary_by_item_id(&self, item_id: &str) -> Result<InventorySummary, AdminError> {
        let envelope: SummaryEnvelope = self
            .api
            .get_json(&["items", item_id.trim(), "summary"], &[])?;
        envelope
            .data
            .ok_or_else(|| AdminError::NotFound("Summary not found".to_string()))
    }
}

/// The inventory listing only understands `page` and `size`
fn paging_query(request: &PageRequest) -> Vec<(&'static str, String)> {
    vec![
        ("page", request.page_index.to_string()),
        ("size", request.page_size.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Sort, SortOrder};

    #[test]
    fn test_paging_query_drops_sort() {
        let request = PageRequest::of(3, 40, Sort::by(vec![SortOrder::asc("col_0")]));
        assert_eq!(
            paging_query(&request),
            vec![("page", "3".to_string()), ("size", "40".to_string())]
        );
    }

    #[test]
    fn test_service_builds_from_config() {
        let config = AdminConfig::default().with_base_url("http://inventory.local:9000/v1");
        let service = InventoryService::new(&config).unwrap();
        assert_eq!(
            service.api.url(&["items", "12", "summary"]).as_str(),
            "http://inventory.local:9000/v1/inventories/items/12/summary"
        );
    }
}
