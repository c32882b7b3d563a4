use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A business discovered by the lead finder.
///
/// `place_id` is the identity key. Fields the backend sends beyond the known
/// ones are kept in `extra` so nothing is lost on re-render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Business {
    #[serde(default)]
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Business {
    pub fn new(place_id: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            business_name: Some(business_name.into()),
            ..Default::default()
        }
    }

    /// Whether outreach has moved this lead past `new`.
    pub fn is_contacted(&self) -> bool {
        match self.lead_status.as_deref() {
            Some(status) => !status.is_empty() && status != "new",
            None => false,
        }
    }

    pub fn display_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_preserves_unknown_fields() {
        let json = r#"{
            "place_id": "p1",
            "business_name": "Acme",
            "website": "https://acme.example",
            "review_count": 42
        }"#;

        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.place_id, "p1");
        assert_eq!(business.display_name(), "Acme");
        assert_eq!(business.extra["website"], "https://acme.example");
        assert_eq!(business.extra["review_count"], 42);

        let back = serde_json::to_value(&business).unwrap();
        assert_eq!(back["website"], "https://acme.example");
    }

    #[test]
    fn test_business_missing_place_id_decodes_empty() {
        let business: Business = serde_json::from_str(r#"{"business_name": "Nameless"}"#).unwrap();
        assert!(business.place_id.is_empty());
    }

    #[test]
    fn test_is_contacted() {
        let mut business = Business::new("p1", "Acme");
        assert!(!business.is_contacted());

        business.lead_status = Some("new".to_string());
        assert!(!business.is_contacted());

        business.lead_status = Some(String::new());
        assert!(!business.is_contacted());

        business.lead_status = Some("contacted".to_string());
        assert!(business.is_contacted());

        business.lead_status = Some("meeting_booked".to_string());
        assert!(business.is_contacted());
    }

    #[test]
    fn test_null_fields_decode_as_none() {
        let json = r#"{"place_id": "p2", "phone": null, "rating": 4.5}"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.phone, None);
        assert_eq!(business.rating, Some(4.5));
        assert_eq!(business.display_name(), "Unknown");
    }
}
