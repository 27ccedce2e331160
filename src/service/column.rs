use crate::client::SheetClient;
use crate::error::BulkEditError;
use crate::model::{ColumnChanges, ColumnSpec, Sheet, SheetInfo};
use crate::service::{BatchResult, BulkEditService};

impl<C: SheetClient> BulkEditService<C> {
    pub fn add_column(&self, sheet: &mut Sheet, spec: &ColumnSpec) -> Result<(), BulkEditError> {
        let column = spec.build(sheet.columns.len());
        self.client.insert_column(sheet, column)?;
        Ok(())
    }

    pub fn add_column_in_all_sheets(
        &self,
        spec: &ColumnSpec,
        workspace: Option<&str>,
    ) -> Result<(), BulkEditError> {
        self.for_each_in_workspace(workspace, |sheet| self.add_column(sheet, spec))
    }

    pub fn add_column_in_sheet_list(&self, spec: &ColumnSpec, sheets: &[SheetInfo]) -> BatchResult {
        self.for_each_in_list(sheets, |sheet| self.add_column(sheet, spec))
    }

    /// Apply `changes` to the column titled `old_title` and save it.
    pub fn update_column(
        &self,
        sheet: &mut Sheet,
        old_title: &str,
        changes: &ColumnChanges,
    ) -> Result<(), BulkEditError> {
        let column = sheet.column_by_title_mut(old_title)?;
        changes.apply_to(column);
        let column = column.clone();
        self.client.update_column(sheet, &column)?;
        Ok(())
    }

    pub fn update_column_in_all_sheets(
        &self,
        old_title: &str,
        changes: &ColumnChanges,
        workspace: Option<&str>,
    ) -> Result<(), BulkEditError> {
        self.for_each_in_workspace(workspace, |sheet| {
            self.update_column(sheet, old_title, changes)
        })
    }

    pub fn update_column_in_sheet_list(
        &self,
        old_title: &str,
        changes: &ColumnChanges,
        sheets: &[SheetInfo],
    ) -> BatchResult {
        self.for_each_in_list(sheets, |sheet| self.update_column(sheet, old_title, changes))
    }
}
