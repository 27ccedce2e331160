mod cell;
mod column;
mod row;
mod sheet;

pub use cell::Cell;
pub use column::{AutoNumberFormat, Column, ColumnChanges, ColumnSpec, ColumnType, SystemColumnType};
pub use row::{NewRow, Row, RowPlacement};
pub use sheet::{Sheet, SheetInfo, WorkspaceRef};
