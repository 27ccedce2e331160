use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(default, skip_serializing)]
    pub display_value: Option<String>,
}

impl Cell {
    pub fn new(column_id: Option<i64>, value: Value) -> Self {
        Self {
            column_id,
            value,
            display_value: None,
        }
    }

    pub fn empty(column_id: Option<i64>) -> Self {
        Self::new(column_id, Value::Null)
    }
}
