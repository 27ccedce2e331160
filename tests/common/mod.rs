#![allow(dead_code)]

use std::cell::{Cell as StdCell, RefCell};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use log::{Level, Log, Metadata, Record};
use serde_json::{Value, json};

use smartsheet_bulkedit::logging::ServiceLog;
use smartsheet_bulkedit::model::{
    Cell, Column, NewRow, Row, RowPlacement, Sheet, SheetInfo, WorkspaceRef,
};
use smartsheet_bulkedit::{BulkEditService, ClientError, SheetClient};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Load(i64),
    Get(String),
    SaveCell {
        row_id: i64,
        column_id: Option<i64>,
        value: Value,
        propagate: bool,
    },
    InsertColumn {
        sheet_id: i64,
        column: Column,
    },
    UpdateColumn {
        sheet_id: i64,
        column: Column,
    },
    AddRow {
        sheet_id: i64,
        cells: Vec<Cell>,
        placement: RowPlacement,
    },
    SaveRow {
        sheet_id: i64,
        row_number: i64,
        expanded: bool,
    },
}

/// In-memory stand-in for the remote service.
#[derive(Default)]
pub struct FakeClient {
    pub sheets: Vec<Sheet>,
    pub failing_loads: HashSet<i64>,
    pub absent: HashSet<i64>,
    pub responses: HashMap<String, Value>,
    pub refuse_connect: bool,
    pub calls: RefCell<Vec<Call>>,
    next_id: StdCell<i64>,
}

impl FakeClient {
    pub fn with_sheets(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            next_id: StdCell::new(9000),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn loaded(&self) -> Vec<i64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Load(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !matches!(call, Call::Load(_) | Call::Get(_)))
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh_id(&self) -> i64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

fn refused(path: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        code: Some(1006),
        message: format!("Not Found: {}", path),
    }
}

impl SheetClient for FakeClient {
    fn connect(&mut self) -> Result<(), ClientError> {
        if self.refuse_connect {
            return Err(ClientError::Api {
                status: 401,
                code: Some(1002),
                message: "Your Access Token is invalid.".to_string(),
            });
        }
        Ok(())
    }

    fn fetch_sheet_list(&self) -> Result<Vec<SheetInfo>, ClientError> {
        Ok(self.sheets.iter().map(Sheet::info).collect())
    }

    fn load_sheet(&self, info: &SheetInfo) -> Result<Option<Sheet>, ClientError> {
        self.record(Call::Load(info.id));
        if self.failing_loads.contains(&info.id) {
            return Err(refused(&format!("/sheet/{}", info.id)));
        }
        if self.absent.contains(&info.id) {
            return Ok(None);
        }
        Ok(self.sheets.iter().find(|s| s.id == info.id).cloned())
    }

    fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.record(Call::Get(path.to_string()));
        self.responses.get(path).cloned().ok_or_else(|| refused(path))
    }

    fn save_cell(&self, row: &Row, cell: &Cell, propagate: bool) -> Result<(), ClientError> {
        self.record(Call::SaveCell {
            row_id: row.id.ok_or(ClientError::Unsaved("row"))?,
            column_id: cell.column_id,
            value: cell.value.clone(),
            propagate,
        });
        Ok(())
    }

    fn insert_column(&self, sheet: &mut Sheet, column: Column) -> Result<(), ClientError> {
        self.record(Call::InsertColumn {
            sheet_id: sheet.id,
            column: column.clone(),
        });
        let mut created = column;
        created.id = Some(self.fresh_id());
        sheet.insert_column(created);
        Ok(())
    }

    fn update_column(&self, sheet: &Sheet, column: &Column) -> Result<(), ClientError> {
        self.record(Call::UpdateColumn {
            sheet_id: sheet.id,
            column: column.clone(),
        });
        Ok(())
    }

    fn add_row(
        &self,
        sheet: &mut Sheet,
        row: NewRow,
        placement: RowPlacement,
    ) -> Result<(), ClientError> {
        self.record(Call::AddRow {
            sheet_id: sheet.id,
            cells: row.cells.clone(),
            placement,
        });
        let created = Row {
            id: Some(self.fresh_id()),
            row_number: 0,
            parent_row_number: None,
            expanded: true,
            cells: row.cells,
        };
        sheet.insert_row(created, placement)
    }

    fn save_row(&self, sheet: &Sheet, row: &Row) -> Result<(), ClientError> {
        self.record(Call::SaveRow {
            sheet_id: sheet.id,
            row_number: row.row_number,
            expanded: row.expanded,
        });
        Ok(())
    }
}

/// A sheet with columns "Name" and "Status" and five rows:
/// row 1 (collapsed) is the parent of row 2, row 3 (expanded) is the parent
/// of row 4, row 5 (collapsed) has no children.
pub fn sheet(id: i64, name: &str, workspace: Option<&str>) -> Sheet {
    let mut title = Column::new("Name");
    title.id = Some(id * 10 + 1);
    title.primary = Some(true);
    let mut status = Column::new("Status");
    status.id = Some(id * 10 + 2);
    status.index = 1;

    let rows = [(1, None, false), (2, Some(1), true), (3, None, true), (4, Some(3), true), (5, None, false)]
        .into_iter()
        .map(|(number, parent, expanded)| Row {
            id: Some(id * 100 + number),
            row_number: number,
            parent_row_number: parent,
            expanded,
            cells: vec![
                Cell::new(Some(id * 10 + 1), json!(format!("task {}", number))),
                Cell::new(Some(id * 10 + 2), json!("Open")),
            ],
        })
        .collect();

    Sheet {
        id,
        name: name.to_string(),
        columns: vec![title, status],
        rows,
        workspace: workspace.map(|name| WorkspaceRef {
            id: Some(77),
            name: name.to_string(),
        }),
    }
}

pub fn infos(client: &FakeClient) -> Vec<SheetInfo> {
    client.sheets.iter().map(Sheet::info).collect()
}

#[derive(Default)]
pub struct CaptureLog {
    pub records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLog {
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Log for CaptureLog {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub fn service(client: FakeClient) -> (BulkEditService<FakeClient>, Arc<CaptureLog>) {
    let log = Arc::new(CaptureLog::default());
    let service = BulkEditService::with_client(client, ServiceLog::new(log.clone()))
        .expect("fake client connects");
    (service, log)
}
