use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Cell;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub row_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_row_number: Option<i64>,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn cell(&self, column_id: Option<i64>) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.column_id == column_id)
    }

    // Returns the position of the written cell within `cells`
    pub fn set_value(&mut self, column_id: Option<i64>, value: Value) -> usize {
        match self.cells.iter().position(|cell| cell.column_id == column_id) {
            Some(pos) => {
                self.cells[pos].value = value;
                self.cells[pos].display_value = None;
                pos
            }
            None => {
                self.cells.push(Cell::new(column_id, value));
                self.cells.len() - 1
            }
        }
    }
}

/// A row built locally that has not been sent to the service yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewRow {
    pub cells: Vec<Cell>,
}

/// Where a new row lands in its sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowPlacement {
    Bottom,
    Top,
    Below { sibling_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_value_overwrites_existing_cell() {
        let mut row = Row {
            id: Some(7),
            row_number: 1,
            parent_row_number: None,
            expanded: true,
            cells: vec![Cell::new(Some(10), json!("old")), Cell::empty(Some(11))],
        };

        let pos = row.set_value(Some(10), json!("new"));

        assert_eq!(pos, 0);
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.cell(Some(10)).map(|c| &c.value), Some(&json!("new")));
    }

    #[test]
    fn set_value_adds_missing_cell() {
        let mut row = Row {
            id: Some(7),
            row_number: 1,
            parent_row_number: None,
            expanded: true,
            cells: Vec::new(),
        };

        let pos = row.set_value(Some(12), json!(3));

        assert_eq!(pos, 0);
        assert_eq!(row.cells[0].column_id, Some(12));
    }

    #[test]
    fn deserializes_service_row() {
        let row: Row = serde_json::from_value(json!({
            "id": 55,
            "rowNumber": 4,
            "parentRowNumber": 2,
            "expanded": false,
            "cells": [{ "columnId": 1, "value": "x", "displayValue": "x" }]
        }))
        .unwrap();

        assert_eq!(row.parent_row_number, Some(2));
        assert!(!row.expanded);
        assert_eq!(row.cells[0].display_value.as_deref(), Some("x"));
    }
}
