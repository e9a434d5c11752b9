//! JSON models for the tender backend
//!
//! Known fields are typed and optional; anything else the server sends is kept
//! in `extra` and written back unchanged on update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tender_forms::{FormValues, TenderStatus};

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TenderStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tender_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ApiError::InvalidField {
        field,
        value: value.to_string(),
    })
}

impl Tender {
    /// Build a tender from submitted form values
    ///
    /// `title`, `description`, `deadline` and `status` map onto typed fields;
    /// any other named value is sent along as a string. Blank optional values
    /// are omitted.
    pub fn from_form(values: &FormValues) -> Result<Self> {
        let mut tender = Tender::default();
        for (name, value) in values {
            match name.as_str() {
                "id" => {}
                "title" => tender.title = value.trim().to_string(),
                "description" => tender.description = value.trim().to_string(),
                "deadline" => tender.deadline = non_blank(value).map(str::to_string),
                "status" => {
                    tender.status = non_blank(value)
                        .map(|v| parse_field("status", v))
                        .transpose()?
                }
                _ => {
                    tender.extra.insert(name.clone(), Value::String(value.clone()));
                }
            }
        }
        Ok(tender)
    }
}

impl Bid {
    /// Build a bid from submitted form values
    ///
    /// Accepts `tenderId` (or `tender_id`) and `amount` as numbers in text form.
    pub fn from_form(values: &FormValues) -> Result<Self> {
        let mut bid = Bid::default();
        for (name, value) in values {
            match name.as_str() {
                "id" => {}
                "tenderId" | "tender_id" => {
                    bid.tender_id = non_blank(value)
                        .map(|v| parse_field("tenderId", v))
                        .transpose()?
                }
                "amount" => {
                    bid.amount = non_blank(value)
                        .map(|v| parse_field("amount", v))
                        .transpose()?
                }
                "description" => bid.description = non_blank(value).map(str::to_string),
                _ => {
                    bid.extra.insert(name.clone(), Value::String(value.clone()));
                }
            }
        }
        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tender_round_trips_unknown_fields() {
        let raw = json!({
            "id": 3,
            "title": "Road Construction",
            "description": "Phase one",
            "status": "OPEN",
            "budget": 125000
        });
        let tender: Tender = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(tender.status, Some(TenderStatus::Open));
        assert_eq!(tender.extra.get("budget"), Some(&json!(125000)));
        assert_eq!(serde_json::to_value(&tender).unwrap(), raw);
    }

    #[test]
    fn test_tender_from_form() {
        let tender = Tender::from_form(&values(&[
            ("title", " Bridge Repair "),
            ("description", "Replace the deck joints"),
            ("deadline", ""),
            ("status", "closed"),
            ("category", "civil"),
        ]))
        .unwrap();
        assert_eq!(tender.title, "Bridge Repair");
        assert_eq!(tender.deadline, None);
        assert_eq!(tender.status, Some(TenderStatus::Closed));
        assert_eq!(tender.extra.get("category"), Some(&json!("civil")));
    }

    #[test]
    fn test_tender_from_form_rejects_unknown_status() {
        let err = Tender::from_form(&values(&[("status", "pending")])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { field: "status", .. }));
    }

    #[test]
    fn test_bid_from_form() {
        let bid = Bid::from_form(&values(&[
            ("tenderId", "3"),
            ("amount", "1500.50"),
            ("description", "  "),
        ]))
        .unwrap();
        assert_eq!(bid.tender_id, Some(3));
        assert_eq!(bid.amount, Some(1500.5));
        assert_eq!(bid.description, None);

        let err = Bid::from_form(&values(&[("amount", "lots")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for amount: \"lots\"");
    }
}
