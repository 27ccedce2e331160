mod batch;
mod cell;
mod column;
mod row;

pub use batch::{BatchResult, SheetFailure};
pub use row::row_placement;

use serde_json::{Map, Value};

use crate::client::{RestClient, RestConfig, SheetClient};
use crate::error::{BulkEditError, ClientError};
use crate::logging::ServiceLog;
use crate::model::{Sheet, SheetInfo};

/// Bulk edits over the sheets reachable through one client connection.
///
/// Single-sheet operations return the first error they hit. The
/// `*_in_all_sheets` variants stop at the first failing sheet and return its
/// error, while the `*_in_sheet_list` variants keep going and report every
/// sheet's outcome in a [`BatchResult`].
pub struct BulkEditService<C: SheetClient = RestClient> {
    client: C,
    log: ServiceLog,
}

impl BulkEditService<RestClient> {
    /// Connect to the service with an API access token.
    pub fn new(token: &str) -> Result<Self, BulkEditError> {
        Self::with_config(RestConfig::new(token), ServiceLog::global())
    }

    pub fn with_config(config: RestConfig, log: ServiceLog) -> Result<Self, BulkEditError> {
        let client = RestClient::new(config, log.clone())?;
        Self::with_client(client, log)
    }
}

impl<C: SheetClient> BulkEditService<C> {
    pub fn with_client(mut client: C, log: ServiceLog) -> Result<Self, BulkEditError> {
        client.connect()?;
        Ok(Self { client, log })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Every sheet visible to the connection. The service cannot filter by
    /// workspace here; the fan-out methods do that after loading each sheet.
    pub fn sheet_infos(&self) -> Result<Vec<SheetInfo>, BulkEditError> {
        Ok(self.client.fetch_sheet_list()?)
    }

    /// Sheets in one workspace, read straight from the workspace endpoint.
    pub fn sheet_infos_in_workspace(
        &self,
        workspace_id: i64,
    ) -> Result<Vec<SheetInfo>, BulkEditError> {
        let path = format!("/workspace/{}", workspace_id);
        let listed = self.client.get(&path).and_then(|mut workspace| {
            let sheets = workspace
                .get_mut("sheets")
                .map(Value::take)
                .ok_or_else(|| ClientError::UnexpectedResponse {
                    path: path.clone(),
                    reason: "missing \"sheets\"".to_string(),
                })?;
            Ok(serde_json::from_value::<Vec<SheetInfo>>(sheets)?)
        });

        listed.map_err(|err| {
            self.log.error(format_args!(
                "Error getting list of sheets from workspace ID: {}: {}",
                workspace_id, err
            ));
            err.into()
        })
    }

    /// Workspaces whose name matches exactly, as the raw field maps the
    /// service returns. No match gives an empty list.
    pub fn workspaces_by_name(&self, name: &str) -> Result<Vec<Map<String, Value>>, BulkEditError> {
        let listing = self
            .client
            .get("/workspaces")
            .map_err(|source| BulkEditError::WorkspaceList { source })?;

        let entries = match listing {
            Value::Array(entries) => entries,
            Value::Object(mut page) => match page.remove("data") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(unexpected_workspace_listing("missing \"data\"")),
            },
            _ => return Err(unexpected_workspace_listing("not a list")),
        };

        Ok(entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(fields) => Some(fields),
                _ => None,
            })
            .filter(|fields| fields.get("name").and_then(Value::as_str) == Some(name))
            .collect())
    }

    /// Load the sheet behind `info` and keep it only if it sits in
    /// `workspace`. With no workspace (or an empty name) the loaded sheet is
    /// returned as is.
    pub fn sheet_if_in_workspace(
        &self,
        info: &SheetInfo,
        workspace: Option<&str>,
    ) -> Result<Option<Sheet>, BulkEditError> {
        let sheet = self.client.load_sheet(info)?;
        let wanted = match workspace {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(sheet),
        };

        match sheet {
            Some(sheet) if sheet.workspace_name() == Some(wanted) => Ok(Some(sheet)),
            Some(sheet) => {
                self.log.debug(format_args!(
                    "sheet {} workspace \"{}\" != \"{}\"",
                    info,
                    sheet.workspace_name().unwrap_or_default(),
                    wanted
                ));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn for_each_in_workspace<F>(&self, workspace: Option<&str>, mut op: F) -> Result<(), BulkEditError>
    where
        F: FnMut(&mut Sheet) -> Result<(), BulkEditError>,
    {
        for info in self.sheet_infos()? {
            if let Some(mut sheet) = self.sheet_if_in_workspace(&info, workspace)? {
                op(&mut sheet)?;
            }
        }
        Ok(())
    }

    fn for_each_in_list<F>(&self, sheets: &[SheetInfo], mut op: F) -> BatchResult
    where
        F: FnMut(&mut Sheet) -> Result<(), BulkEditError>,
    {
        let mut result = BatchResult::default();
        for info in sheets {
            let outcome = self
                .client
                .load_sheet(info)
                .map_err(BulkEditError::from)
                .and_then(|sheet| sheet.ok_or_else(|| BulkEditError::SheetNotLoaded(info.clone())))
                .and_then(|mut sheet| op(&mut sheet));

            match outcome {
                Ok(()) => result.record_success(info.clone()),
                Err(error) => {
                    self.log.debug(format_args!("sheet {} failed: {}", info, error));
                    result.record_failure(info.clone(), error);
                }
            }
        }
        result
    }
}

fn unexpected_workspace_listing(reason: &str) -> BulkEditError {
    BulkEditError::WorkspaceList {
        source: ClientError::UnexpectedResponse {
            path: "/workspaces".to_string(),
            reason: reason.to_string(),
        },
    }
}
