use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::model::{Cell, Column, NewRow, Row, RowPlacement};

/// Lightweight handle for a sheet, as listed by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl SheetInfo {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            access_level: None,
            permalink: None,
            modified_at: None,
        }
    }
}

impl fmt::Display for SheetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceRef>,
}

impl Sheet {
    pub fn info(&self) -> SheetInfo {
        SheetInfo::new(self.id, self.name.clone())
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.workspace.as_ref().map(|w| w.name.as_str())
    }

    /// Position in `rows` of the row addressed by `row_number`.
    ///
    /// Non-negative numbers match the row's own `row_number`. Negative numbers
    /// count back from the last row, so `-1` is the last row.
    pub fn row_position(&self, row_number: i64) -> Result<usize, ClientError> {
        let found = if row_number < 0 {
            let back = row_number.unsigned_abs() as usize;
            self.rows.len().checked_sub(back)
        } else {
            self.rows.iter().position(|row| row.row_number == row_number)
        };
        found.ok_or(ClientError::RowNotFound(row_number))
    }

    pub fn row_by_number(&self, row_number: i64) -> Result<&Row, ClientError> {
        let pos = self.row_position(row_number)?;
        Ok(&self.rows[pos])
    }

    pub fn row_by_number_mut(&mut self, row_number: i64) -> Result<&mut Row, ClientError> {
        let pos = self.row_position(row_number)?;
        Ok(&mut self.rows[pos])
    }

    pub fn column_at(&self, index: usize) -> Result<&Column, ClientError> {
        self.columns
            .iter()
            .find(|column| column.index == index)
            .ok_or(ClientError::ColumnIndexOutOfRange(index))
    }

    pub fn column_by_title(&self, title: &str) -> Result<&Column, ClientError> {
        self.columns
            .iter()
            .find(|column| column.title == title)
            .ok_or_else(|| ClientError::ColumnNotFound(title.to_string()))
    }

    pub fn column_by_title_mut(&mut self, title: &str) -> Result<&mut Column, ClientError> {
        self.columns
            .iter_mut()
            .find(|column| column.title == title)
            .ok_or_else(|| ClientError::ColumnNotFound(title.to_string()))
    }

    /// Build a row from column titles mapped to cell values, keeping the
    /// mapping's order.
    pub fn make_row(&self, fields: &IndexMap<String, Value>) -> Result<NewRow, ClientError> {
        let mut cells = Vec::with_capacity(fields.len());
        for (title, value) in fields {
            let column = self.column_by_title(title)?;
            cells.push(Cell::new(column.id, value.clone()));
        }
        Ok(NewRow { cells })
    }

    pub fn insert_column(&mut self, mut column: Column) {
        let pos = column.index.min(self.columns.len());
        column.index = pos;
        self.columns.insert(pos, column);
        for (index, column) in self.columns.iter_mut().enumerate() {
            column.index = index;
        }
    }

    fn descends_from(&self, row: &Row, ancestor: i64) -> bool {
        let mut parent = row.parent_row_number;
        // bounded walk, in case parent references form a cycle
        for _ in 0..self.rows.len() {
            match parent {
                Some(number) if number == ancestor => return true,
                Some(number) => {
                    parent = self
                        .rows
                        .iter()
                        .find(|r| r.row_number == number)
                        .and_then(|r| r.parent_row_number);
                }
                None => return false,
            }
        }
        false
    }

    /// Insert a row the service has accepted and renumber the sheet, keeping
    /// parent references pointing at the same rows.
    pub fn insert_row(&mut self, mut row: Row, placement: RowPlacement) -> Result<(), ClientError> {
        let pos = match placement {
            RowPlacement::Top => 0,
            RowPlacement::Bottom => self.rows.len(),
            RowPlacement::Below { sibling_id } => {
                let sibling = self
                    .rows
                    .iter()
                    .position(|r| r.id == Some(sibling_id))
                    .ok_or(ClientError::RowIdNotFound(sibling_id))?;
                row.parent_row_number = self.rows[sibling].parent_row_number;
                // A sibling goes after the whole subtree of the row it follows
                let ancestor = self.rows[sibling].row_number;
                let mut pos = sibling + 1;
                while pos < self.rows.len() && self.descends_from(&self.rows[pos], ancestor) {
                    pos += 1;
                }
                pos
            }
        };

        let parent = row.parent_row_number;
        self.rows.insert(pos, row);

        let mut renumbered = HashMap::with_capacity(self.rows.len());
        for (idx, row) in self.rows.iter_mut().enumerate() {
            if idx != pos {
                renumbered.insert(row.row_number, idx as i64 + 1);
            }
            row.row_number = idx as i64 + 1;
        }
        for (idx, row) in self.rows.iter_mut().enumerate() {
            let old = if idx == pos { parent } else { row.parent_row_number };
            row.parent_row_number = old.and_then(|n| renumbered.get(&n).copied());
        }
        Ok(())
    }
}
