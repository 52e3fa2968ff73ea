use crate::api::{InventoryService, ItemService};
use crate::config::AdminConfig;
use crate::error::AdminError;
use std::sync::OnceLock;
use tracing::{debug, info};

// Global singletons - configured once, shared by every view
static CONFIG: OnceLock<AdminConfig> = OnceLock::new();
static ITEM_SERVICE: OnceLock<ItemService> = OnceLock::new();
static INVENTORY_SERVICE: OnceLock<InventoryService> = OnceLock::new();

/// Install the process-wide config; must run before the first service call to take effect.
/// Returns false if a config was already installed.
pub fn initialize(config: AdminConfig) -> bool {
    let base_url = config.base_url.clone();
    let installed = CONFIG.set(config).is_ok();
    if installed {
        info!("Backend configured at {}", base_url);
    } else {
        debug!("Backend config already installed, ignoring {}", base_url);
    }
    installed
}

/// Installed config, or the environment-derived one on first use
pub fn config() -> &'static AdminConfig {
    CONFIG.get_or_init(|| {
        debug!("No backend config installed, reading environment");
        AdminConfig::from_env()
    })
}

pub fn item_service() -> Result<&'static ItemService, AdminError> {
    get_or_build(&ITEM_SERVICE, || ItemService::new(config()), "item")
}

pub fn inventory_service() -> Result<&'static InventoryService, AdminError> {
    get_or_build(&INVENTORY_SERVICE, || InventoryService::new(config()), "inventory")
}

fn get_or_build<S, F>(cell: &'static OnceLock<S>, build: F, name: &str) -> Result<&'static S, AdminError>
where
    F: FnOnce() -> Result<S, AdminError>,
{
    if let Some(service) = cell.get() {
        return Ok(service);
    }
    let service = build()?;
    // A racing thread may have won; either instance is equivalent
    if cell.set(service).is_ok() {
        debug!("Created {} service", name);
    }
    cell.get()
        .ok_or_else(|| AdminError::Unexpected(format!("{} service unavailable", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_build_reuses_instance() {
        static CELL: OnceLock<String> = OnceLock::new();
        let first = get_or_build(&CELL, || Ok("first".to_string()), "test").unwrap();
        let second = get_or_build(&CELL, || Ok("second".to_string()), "test").unwrap();
        assert_eq!(first, "first");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_get_or_build_propagates_failure() {
        static CELL: OnceLock<String> = OnceLock::new();
        let result = get_or_build(&CELL, || Err(AdminError::Validation("bad url".to_string())), "test");
        assert!(matches!(result, Err(AdminError::Validation(_))));
        assert!(CELL.get().is_none());
    }
}
