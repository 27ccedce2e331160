use serde_json::Value;

use crate::client::SheetClient;
use crate::error::BulkEditError;
use crate::model::{Sheet, SheetInfo};
use crate::service::{BatchResult, BulkEditService};

enum ColumnSelector<'a> {
    Index(usize),
    Title(&'a str),
}

fn select_column<'a>(
    column_index: Option<usize>,
    column_title: Option<&'a str>,
) -> Result<ColumnSelector<'a>, BulkEditError> {
    match (column_index, column_title) {
        (Some(_), Some(_)) => Err(BulkEditError::validation(
            "one but not both \"columnIndex\" and \"columnTitle\" must be specified",
        )),
        (None, Some(title)) => Ok(ColumnSelector::Title(title)),
        (Some(index), None) => Ok(ColumnSelector::Index(index)),
        (None, None) => Err(BulkEditError::validation(
            "either \"columnIndex\" or \"columnTitle\" must be specified",
        )),
    }
}

impl<C: SheetClient> BulkEditService<C> {
    /// Write `value` into one cell and save just that cell, without
    /// propagating the change through the rest of the row.
    ///
    /// The column is picked by exactly one of `column_index` or
    /// `column_title`.
    pub fn update_cell(
        &self,
        sheet: &mut Sheet,
        row_number: i64,
        column_index: Option<usize>,
        column_title: Option<&str>,
        value: Value,
    ) -> Result<(), BulkEditError> {
        let column_index = match select_column(column_index, column_title)? {
            ColumnSelector::Index(index) => index,
            ColumnSelector::Title(title) => sheet.column_by_title(title)?.index,
        };
        let column_id = sheet.column_at(column_index)?.id;

        let row = sheet.row_by_number_mut(row_number)?;
        let pos = row.set_value(column_id, value);
        let row = &*row;
        self.client.save_cell(row, &row.cells[pos], false)?;
        Ok(())
    }

    pub fn update_cell_in_all_sheets(
        &self,
        row_number: i64,
        workspace: Option<&str>,
        column_index: Option<usize>,
        column_title: Option<&str>,
        value: Value,
    ) -> Result<(), BulkEditError> {
        self.for_each_in_workspace(workspace, |sheet| {
            self.update_cell(sheet, row_number, column_index, column_title, value.clone())
        })
    }

    /// Update the same cell in every listed sheet.
    ///
    /// Arguments are checked once up front and a bad selector fails the
    /// whole call. A column title is rejected here as well: it would have to
    /// be resolved before any sheet is loaded, so only `column_index` works
    /// for sheet lists.
    pub fn update_cell_in_sheet_list(
        &self,
        row_number: i64,
        column_index: Option<usize>,
        column_title: Option<&str>,
        value: Value,
        sheets: &[SheetInfo],
    ) -> Result<BatchResult, BulkEditError> {
        let column_index = match select_column(column_index, column_title)? {
            ColumnSelector::Index(index) => index,
            ColumnSelector::Title(title) => {
                return Err(BulkEditError::ColumnTitleBeforeSheetLoad(title.to_string()));
            }
        };

        Ok(self.for_each_in_list(sheets, |sheet| {
            self.update_cell(sheet, row_number, Some(column_index), None, value.clone())
        }))
    }
}
