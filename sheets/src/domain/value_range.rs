use serde::{Deserialize, Serialize};

/// Body of `spreadsheets.values.get` responses and `spreadsheets.values.update` requests.
///
/// Trailing empty cells and rows are omitted by the API, so rows can be shorter than the range.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn rows(values: Vec<Vec<String>>) -> Self {
        Self {
            range: String::new(),
            major_dimension: Some("ROWS".to_string()),
            values,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_cells: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_deserialize_as_empty() {
        let parsed: ValueRange =
            serde_json::from_str(r#"{"range":"Days!A2:CU500","majorDimension":"ROWS"}"#)
                .unwrap();
        assert_eq!(parsed.range, "Days!A2:CU500");
        assert!(parsed.values.is_empty());
    }

    #[test]
    fn serializes_update_body() {
        let body = ValueRange::rows(vec![vec!["W".to_string(), String::new()]]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"majorDimension": "ROWS", "values": [["W", ""]]})
        );
    }
}
