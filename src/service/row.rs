use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::client::SheetClient;
use crate::error::{BulkEditError, ClientError};
use crate::model::{RowPlacement, Sheet, SheetInfo};
use crate::service::{BatchResult, BulkEditService};

/// Where `add_row` puts a row asked for at `row_number`.
///
/// `None` appends, `0` and `1` insert at the top. Any other number inserts
/// below a sibling: the row one above `row_number`, or for negative numbers
/// the row currently at `row_number` (counted from the end).
pub fn row_placement(sheet: &Sheet, row_number: Option<i64>) -> Result<RowPlacement, ClientError> {
    match row_number {
        None => Ok(RowPlacement::Bottom),
        Some(0 | 1) => Ok(RowPlacement::Top),
        Some(n) => {
            let sibling_number = if n < 0 { n } else { n - 1 };
            let sibling = sheet.row_by_number(sibling_number)?;
            let sibling_id = sibling.id.ok_or(ClientError::Unsaved("row"))?;
            Ok(RowPlacement::Below { sibling_id })
        }
    }
}

impl<C: SheetClient> BulkEditService<C> {
    pub fn add_row(
        &self,
        sheet: &mut Sheet,
        fields: &IndexMap<String, Value>,
        row_number: Option<i64>,
    ) -> Result<(), BulkEditError> {
        let row = sheet.make_row(fields)?;
        let placement = row_placement(sheet, row_number)?;
        self.client.add_row(sheet, row, placement)?;
        Ok(())
    }

    pub fn add_row_in_all_sheets(
        &self,
        fields: &IndexMap<String, Value>,
        workspace: Option<&str>,
        row_number: Option<i64>,
    ) -> Result<(), BulkEditError> {
        self.for_each_in_workspace(workspace, |sheet| self.add_row(sheet, fields, row_number))
    }

    pub fn add_row_in_sheet_list(
        &self,
        fields: &IndexMap<String, Value>,
        row_number: Option<i64>,
        sheets: &[SheetInfo],
    ) -> BatchResult {
        self.for_each_in_list(sheets, |sheet| self.add_row(sheet, fields, row_number))
    }

    /// Expand (or collapse) every row that has children. Rows already in the
    /// requested state are left alone and not saved.
    pub fn expand_all_rows(&self, sheet: &mut Sheet, is_expanded: bool) -> Result<(), BulkEditError> {
        let parents: BTreeSet<i64> = sheet
            .rows
            .iter()
            .filter_map(|row| row.parent_row_number)
            .filter(|&number| number != 0)
            .collect();

        let mut saved = 0;
        for parent in parents {
            let pos = sheet.row_position(parent)?;
            if sheet.rows[pos].expanded == is_expanded {
                continue;
            }
            sheet.rows[pos].expanded = is_expanded;
            self.client.save_row(&*sheet, &sheet.rows[pos])?;
            saved += 1;
        }

        self.log.debug(format_args!(
            "sheet {}: {} parent rows set to expanded={}",
            sheet.id, saved, is_expanded
        ));
        Ok(())
    }

    pub fn expand_all_rows_in_all_sheets(
        &self,
        workspace: Option<&str>,
        is_expanded: bool,
    ) -> Result<(), BulkEditError> {
        self.for_each_in_workspace(workspace, |sheet| self.expand_all_rows(sheet, is_expanded))
    }

    pub fn expand_all_rows_in_sheet_list(&self, is_expanded: bool, sheets: &[SheetInfo]) -> BatchResult {
        self.for_each_in_list(sheets, |sheet| self.expand_all_rows(sheet, is_expanded))
    }
}
