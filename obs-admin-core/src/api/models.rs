use crate::datetime::iso_local_option;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::PrimitiveDateTime;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, with = "iso_local_option")]
    pub created_date: Option<PrimitiveDateTime>,
    #[serde(default, with = "iso_local_option")]
    pub updated_date: Option<PrimitiveDateTime>,
}

impl ItemDto {
    /// `12-Widget`, as shown in item pickers
    pub fn label(&self) -> String {
        format!("{}-{}", self.id, self.name)
    }
}

impl fmt::Display for ItemDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Body of item create (no id) and update (with id) requests
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ItemRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: &'a str,
    pub price: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InventoryType {
    /// Top-up
    T,
    /// Withdrawal
    #[default]
    W,
}

impl InventoryType {
    pub const ALL: [InventoryType; 2] = [InventoryType::T, InventoryType::W];

    pub fn code(&self) -> &'static str {
        match self {
            InventoryType::T => "T",
            InventoryType::W => "W",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            InventoryType::T => "Top-Up",
            InventoryType::W => "Withdrawal",
        }
    }
}

impl fmt::Display for InventoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for InventoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "T" => Ok(InventoryType::T),
            "W" => Ok(InventoryType::W),
            other => Err(format!("unknown inventory type {:?} (expected T or W)", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetails {
    pub id: i64,
    pub item_id: i64,
    #[serde(default)]
    pub item_name: String,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub kind: InventoryType,
    #[serde(default, with = "iso_local_option")]
    pub created_date: Option<PrimitiveDateTime>,
    #[serde(default, with = "iso_local_option")]
    pub updated_date: Option<PrimitiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    pub item_id: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub kind: InventoryType,
}

/// Stock movement totals for one item; every figure is kept as display text
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_top_up: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_withdraw: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remaining_stock: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub top_up_count: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub withdraw_count: String,
}

/// `{ "data": <summary> }`
#[derive(Deserialize, Debug)]
pub struct SummaryEnvelope {
    pub data: Option<InventorySummary>,
}

/// Accept a JSON string, number or bool as text; `null` becomes empty
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageRequest, PageWrapper};
    use time::macros::datetime;

    #[test]
    fn test_item_page_from_backend_json() {
        let body = r#"{
            "data": {
                "content": [
                    {"id": 1, "name": "widget", "price": 12.5, "stock": 40,
                     "createdDate": "2024-05-01T10:15:30.123", "updatedDate": null},
                    {"id": 2, "name": "Gadget", "price": 3}
                ],
                "metadata": {"totalElements": 7}
            }
        }"#;
        let page = serde_json::from_str::<PageWrapper<ItemDto>>(body)
            .unwrap()
            .into_page(&PageRequest::unsorted(0, 5));

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content[0].label(), "1-widget");
        assert_eq!(page.content[0].stock, Some(40));
        assert_eq!(
            page.content[0].created_date,
            Some(datetime!(2024-05-01 10:15:30.123))
        );
        assert_eq!(page.content[0].updated_date, None);
        assert_eq!(page.content[1].price, 3.0);
        assert_eq!(page.content[1].stock, None);
    }

    #[test]
    fn test_item_label_is_id_dash_name() {
        let item = ItemDto {
            id: 0,
            name: "bolt".to_string(),
            price: 0.0,
            stock: None,
            created_date: None,
            updated_date: None,
        };
        assert_eq!(item.to_string(), "0-bolt");
    }

    #[test]
    fn test_item_request_bodies() {
        let create = ItemRequest {
            id: None,
            name: "Widget",
            price: 12,
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            serde_json::json!({"name": "Widget", "price": 12})
        );
        let update = ItemRequest {
            id: Some(4),
            ..create
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"id": 4, "name": "Widget", "price": 12})
        );
    }

    #[test]
    fn test_inventory_json_shapes() {
        let details: InventoryDetails = serde_json::from_str(
            r#"{"id": 3, "itemId": 1, "itemName": "Widget", "quantity": 5, "type": "T",
                "createdDate": "2024-01-02T03:04:05"}"#,
        )
        .unwrap();
        assert_eq!(details.kind, InventoryType::T);
        assert_eq!(details.created_date, Some(datetime!(2024-01-02 03:04:05)));

        let request = InventoryRequest {
            item_id: 1,
            quantity: 5,
            kind: InventoryType::W,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"itemId": 1, "quantity": 5, "type": "W"})
        );
    }

    #[test]
    fn test_summary_accepts_numbers_and_nulls() {
        let envelope: SummaryEnvelope = serde_json::from_str(
            r#"{"data": {"itemId": 1, "itemName": "Widget", "totalTopUp": 50,
                "totalWithdraw": "20", "remainingStock": 30, "topUpCount": 2,
                "withdrawCount": null}}"#,
        )
        .unwrap();
        let summary = envelope.data.unwrap();
        assert_eq!(summary.item_id, "1");
        assert_eq!(summary.total_top_up, "50");
        assert_eq!(summary.total_withdraw, "20");
        assert_eq!(summary.withdraw_count, "");
    }

    #[test]
    fn test_inventory_type_parsing() {
        assert_eq!("t".parse::<InventoryType>(), Ok(InventoryType::T));
        assert_eq!(" W ".parse::<InventoryType>(), Ok(InventoryType::W));
        assert!("X".parse::<InventoryType>().is_err());
        assert_eq!(InventoryType::default(), InventoryType::W);
    }
}
