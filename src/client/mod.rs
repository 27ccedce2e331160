mod rest;

pub use rest::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, RestClient, RestConfig};

use serde_json::Value;

use crate::error::ClientError;
use crate::model::{Cell, Column, NewRow, Row, RowPlacement, Sheet, SheetInfo};

/// The remote sheet service as seen by the bulk-edit layer.
///
/// Every network round trip and all persistence go through this trait.
/// Methods that change a sheet remotely also bring the passed-in local
/// [`Sheet`] up to date.
pub trait SheetClient {
    fn connect(&mut self) -> Result<(), ClientError>;

    fn fetch_sheet_list(&self) -> Result<Vec<SheetInfo>, ClientError>;

    /// `Ok(None)` when the service answers without a sheet.
    fn load_sheet(&self, info: &SheetInfo) -> Result<Option<Sheet>, ClientError>;

    /// Raw GET for endpoints the object model does not cover.
    fn get(&self, path: &str) -> Result<Value, ClientError>;

    /// Persist one cell. With `propagate` off only that cell is written,
    /// otherwise the whole row is saved along with it.
    fn save_cell(&self, row: &Row, cell: &Cell, propagate: bool) -> Result<(), ClientError>;

    fn insert_column(&self, sheet: &mut Sheet, column: Column) -> Result<(), ClientError>;

    fn update_column(&self, sheet: &Sheet, column: &Column) -> Result<(), ClientError>;

    fn add_row(
        &self,
        sheet: &mut Sheet,
        row: NewRow,
        placement: RowPlacement,
    ) -> Result<(), ClientError>;

    fn save_row(&self, sheet: &Sheet, row: &Row) -> Result<(), ClientError>;
}
