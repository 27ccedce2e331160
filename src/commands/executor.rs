use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::json;

use crate::client::SheetClient;
use crate::commands::Command;
use crate::commands::Targets;
use crate::commands::output::{print_json, render_batch, render_sheet_list};
use crate::error::BulkEditError;
use crate::model::{ColumnChanges, ColumnSpec, SheetInfo};
use crate::service::{BatchResult, BulkEditService};

enum Target {
    List(Vec<SheetInfo>),
    All(Option<String>),
}

impl Targets {
    fn resolve<C: SheetClient>(&self, service: &BulkEditService<C>) -> Result<Target> {
        if let Some(workspace_id) = self.workspace_id {
            let sheets = service
                .sheet_infos_in_workspace(workspace_id)
                .with_context(|| format!("Unable to list sheets in workspace {}", workspace_id))?;
            return Ok(Target::List(sheets));
        }

        if !self.sheet_ids.is_empty() {
            let visible = service.sheet_infos().context("Unable to list sheets")?;
            // Unknown ids are still attempted so they show up in the report
            let sheets = self
                .sheet_ids
                .iter()
                .map(|id| {
                    visible
                        .iter()
                        .find(|info| info.id == *id)
                        .cloned()
                        .unwrap_or_else(|| SheetInfo::new(*id, format!("sheet {}", id)))
                })
                .collect();
            return Ok(Target::List(sheets));
        }

        Ok(Target::All(self.workspace.clone()))
    }
}

/// Run one command. Returns `false` when some sheet in a sheet-list run failed.
pub fn execute<C: SheetClient>(
    service: &BulkEditService<C>,
    command: Command,
    json_output: bool,
) -> Result<bool> {
    match command {
        Command::UpdateCell {
            row,
            column_index,
            column_title,
            value,
            targets,
        } => fan_out(
            targets.resolve(service)?,
            json_output,
            |sheets| {
                service.update_cell_in_sheet_list(
                    row,
                    column_index,
                    column_title.as_deref(),
                    value.clone(),
                    sheets,
                )
            },
            |workspace| {
                service.update_cell_in_all_sheets(
                    row,
                    workspace,
                    column_index,
                    column_title.as_deref(),
                    value.clone(),
                )
            },
        ),

        Command::AddColumn {
            title,
            index,
            column_type,
            options,
            symbol,
            primary,
            system_column_type,
            auto_number,
            width,
            targets,
        } => {
            let spec = ColumnSpec {
                title,
                index,
                column_type,
                options,
                symbol,
                is_primary: primary.then_some(true),
                system_column_type,
                auto_number_format: auto_number.to_format(),
                width,
            };
            fan_out(
                targets.resolve(service)?,
                json_output,
                |sheets| Ok(service.add_column_in_sheet_list(&spec, sheets)),
                |workspace| service.add_column_in_all_sheets(&spec, workspace),
            )
        }

        Command::UpdateColumn {
            old_title,
            new_title,
            index,
            column_type,
            options,
            symbol,
            system_column_type,
            auto_number,
            width,
            format,
            targets,
        } => {
            let changes = ColumnChanges {
                new_title,
                index,
                column_type,
                options,
                symbol,
                system_column_type,
                auto_number_format: auto_number.to_format(),
                width,
                format,
            };
            if changes.is_empty() {
                anyhow::bail!("Nothing to change for column '{}'", old_title);
            }
            fan_out(
                targets.resolve(service)?,
                json_output,
                |sheets| Ok(service.update_column_in_sheet_list(&old_title, &changes, sheets)),
                |workspace| service.update_column_in_all_sheets(&old_title, &changes, workspace),
            )
        }

        Command::AddRow {
            fields,
            row,
            targets,
        } => {
            let fields: IndexMap<_, _> = fields.into_iter().collect();
            fan_out(
                targets.resolve(service)?,
                json_output,
                |sheets| Ok(service.add_row_in_sheet_list(&fields, row, sheets)),
                |workspace| service.add_row_in_all_sheets(&fields, workspace, row),
            )
        }

        Command::ExpandRows { targets } => expand(service, &targets, true, json_output),
        Command::CollapseRows { targets } => expand(service, &targets, false, json_output),

        Command::ListSheets { workspace_id } => {
            let sheets = match workspace_id {
                Some(id) => service.sheet_infos_in_workspace(id)?,
                None => service.sheet_infos()?,
            };
            if json_output {
                print_json(&sheets)?;
            } else {
                print!("{}", render_sheet_list(&sheets));
            }
            Ok(true)
        }

        Command::Workspaces { name } => {
            let workspaces = service.workspaces_by_name(&name)?;
            if json_output {
                print_json(&workspaces)?;
            } else if workspaces.is_empty() {
                println!("No workspace named '{}'", name);
            } else {
                for workspace in &workspaces {
                    let id = workspace.get("id").map(|v| v.to_string()).unwrap_or_default();
                    println!("{}  {}", id, name);
                }
            }
            Ok(!workspaces.is_empty())
        }
    }
}

fn expand<C: SheetClient>(
    service: &BulkEditService<C>,
    targets: &Targets,
    is_expanded: bool,
    json_output: bool,
) -> Result<bool> {
    fan_out(
        targets.resolve(service)?,
        json_output,
        |sheets| Ok(service.expand_all_rows_in_sheet_list(is_expanded, sheets)),
        |workspace| service.expand_all_rows_in_all_sheets(workspace, is_expanded),
    )
}

fn fan_out<L, A>(target: Target, json_output: bool, list: L, all: A) -> Result<bool>
where
    L: FnOnce(&[SheetInfo]) -> Result<BatchResult, BulkEditError>,
    A: FnOnce(Option<&str>) -> Result<(), BulkEditError>,
{
    match target {
        Target::List(sheets) => {
            let result = list(&sheets)?;
            if json_output {
                print_json(&result)?;
            } else {
                print!("{}", render_batch(&result));
            }
            Ok(result.is_complete())
        }
        Target::All(workspace) => {
            all(workspace.as_deref())?;
            if json_output {
                print_json(&json!({ "status": "ok", "workspace": workspace }))?;
            } else {
                match &workspace {
                    Some(name) => println!("Done: all sheets in workspace '{}'", name),
                    None => println!("Done: all sheets"),
                }
            }
            Ok(true)
        }
    }
}
