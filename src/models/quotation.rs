use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A stored quotation row. Every column except the id is nullable: the save
/// endpoint persists whatever the client sent without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quotation {
    pub id: i64,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub quotation_no: Option<String>,
    pub date: Option<String>,
    /// JSON text of the item list, returned verbatim so the form can reload it.
    pub items: Option<String>,
    pub received: Option<f64>,
    pub deposit_info: Option<String>,
}

/// Body of `POST /api/save_quotation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveQuotationRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default)]
    pub quotation_no: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub received: Option<f64>,
    #[serde(default)]
    pub deposit_info: Option<String>,
}

impl SaveQuotationRequest {
    /// A missing, null or zero id means "create".
    pub fn target_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Serialized item blob; an absent list is stored as `[]`.
    pub fn items_json(&self) -> String {
        match &self.items {
            None | Some(Value::Null) => "[]".to_string(),
            Some(items) => items.to_string(),
        }
    }

    pub fn into_record(self, id: i64) -> Quotation {
        let items = Some(self.items_json());
        Quotation {
            id,
            company_name: self.company_name,
            company_address: self.company_address,
            company_phone: self.company_phone,
            company_email: self.company_email,
            client_name: self.client_name,
            client_address: self.client_address,
            quotation_no: self.quotation_no,
            date: self.date,
            items,
            received: self.received,
            deposit_info: self.deposit_info,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveQuotationResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

// Form-backed clients send numbers as strings; accept both.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid amount: {}", other))),
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {}", s))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_items_are_stored_as_empty_list() {
        let req: SaveQuotationRequest = serde_json::from_value(json!({
            "company_name": "Acme"
        }))
        .unwrap();
        assert_eq!(req.items_json(), "[]");
        assert_eq!(req.target_id(), None);
    }

    #[test]
    fn items_are_kept_as_sent() {
        let req: SaveQuotationRequest = serde_json::from_value(json!({
            "items": [{"name": "Widget", "quantity": "2", "price": "10"}]
        }))
        .unwrap();
        let parsed: Value = serde_json::from_str(&req.items_json()).unwrap();
        assert_eq!(parsed[0]["name"], "Widget");
        assert_eq!(parsed[0]["quantity"], "2");
    }

    #[test]
    fn received_accepts_numbers_and_numeric_strings() {
        let as_number: SaveQuotationRequest =
            serde_json::from_value(json!({"received": 20})).unwrap();
        let as_string: SaveQuotationRequest =
            serde_json::from_value(json!({"received": "20.5"})).unwrap();
        let blank: SaveQuotationRequest =
            serde_json::from_value(json!({"received": ""})).unwrap();
        assert_eq!(as_number.received, Some(20.0));
        assert_eq!(as_string.received, Some(20.5));
        assert_eq!(blank.received, None);

        let bad = serde_json::from_value::<SaveQuotationRequest>(json!({"received": "lots"}));
        assert!(bad.is_err());
    }

    #[test]
    fn zero_or_blank_id_means_create() {
        let zero: SaveQuotationRequest = serde_json::from_value(json!({"id": 0})).unwrap();
        let blank: SaveQuotationRequest = serde_json::from_value(json!({"id": ""})).unwrap();
        let text: SaveQuotationRequest = serde_json::from_value(json!({"id": "7"})).unwrap();
        assert_eq!(zero.target_id(), None);
        assert_eq!(blank.target_id(), None);
        assert_eq!(text.target_id(), Some(7));
    }
}
