use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{AutoNumberFormat, ColumnType, SystemColumnType};

/// Which sheets an editing command runs against.
#[derive(Args, Clone, Debug, Default)]
pub struct Targets {
    /// Edit only these sheets; failures are reported per sheet
    #[arg(long = "sheet-id", num_args = 1.., conflicts_with = "workspace_id")]
    pub sheet_ids: Vec<i64>,

    /// Edit the sheets listed in this workspace; failures are reported per sheet
    #[arg(long)]
    pub workspace_id: Option<i64>,

    /// Edit every visible sheet in the workspace with this name (stops at the first failure)
    #[arg(long, conflicts_with_all = ["sheet_ids", "workspace_id"])]
    pub workspace: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct AutoNumberArgs {
    #[arg(long)]
    pub auto_number_prefix: Option<String>,

    #[arg(long)]
    pub auto_number_suffix: Option<String>,

    /// Zero padding, e.g. "0000"
    #[arg(long)]
    pub auto_number_fill: Option<String>,

    #[arg(long)]
    pub auto_number_start: Option<i64>,
}

impl AutoNumberArgs {
    pub fn to_format(&self) -> Option<AutoNumberFormat> {
        let format = AutoNumberFormat {
            prefix: self.auto_number_prefix.clone(),
            suffix: self.auto_number_suffix.clone(),
            fill: self.auto_number_fill.clone(),
            starting_number: self.auto_number_start,
        };
        (format != AutoNumberFormat::default()).then_some(format)
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Set one cell in every targeted sheet
    UpdateCell {
        /// Row number, 1-based; negative numbers count back from the last row
        #[arg(long, allow_negative_numbers = true)]
        row: i64,

        #[arg(long)]
        column_index: Option<usize>,

        #[arg(long)]
        column_title: Option<String>,

        /// Cell value; parsed as JSON when possible, otherwise taken as text
        #[arg(long, value_parser = parse_value, allow_hyphen_values = true)]
        value: Value,

        #[command(flatten)]
        targets: Targets,
    },

    /// Insert a new column
    AddColumn {
        title: String,

        #[arg(long)]
        index: Option<usize>,

        #[arg(long = "type", value_parser = parse_service_enum::<ColumnType>)]
        column_type: Option<ColumnType>,

        /// Picklist options, comma separated
        #[arg(long, value_delimiter = ',')]
        options: Option<Vec<String>>,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        primary: bool,

        #[arg(long, value_parser = parse_service_enum::<SystemColumnType>)]
        system_column_type: Option<SystemColumnType>,

        #[command(flatten)]
        auto_number: AutoNumberArgs,

        #[arg(long)]
        width: Option<u32>,

        #[command(flatten)]
        targets: Targets,
    },

    /// Change attributes of an existing column, found by title
    UpdateColumn {
        old_title: String,

        #[arg(long)]
        new_title: Option<String>,

        #[arg(long)]
        index: Option<usize>,

        #[arg(long = "type", value_parser = parse_service_enum::<ColumnType>)]
        column_type: Option<ColumnType>,

        #[arg(long, value_delimiter = ',')]
        options: Option<Vec<String>>,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long, value_parser = parse_service_enum::<SystemColumnType>)]
        system_column_type: Option<SystemColumnType>,

        #[command(flatten)]
        auto_number: AutoNumberArgs,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        format: Option<String>,

        #[command(flatten)]
        targets: Targets,
    },

    /// Add a row built from TITLE=VALUE fields
    AddRow {
        #[arg(long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, Value)>,

        /// Target row number; omit to append, 0 or 1 for the top
        #[arg(long, allow_negative_numbers = true)]
        row: Option<i64>,

        #[command(flatten)]
        targets: Targets,
    },

    /// Expand every parent row
    ExpandRows {
        #[command(flatten)]
        targets: Targets,
    },

    /// Collapse every parent row
    CollapseRows {
        #[command(flatten)]
        targets: Targets,
    },

    /// List the sheets visible to the token, or those in one workspace
    ListSheets {
        #[arg(long)]
        workspace_id: Option<i64>,
    },

    /// Show the workspaces with exactly this name
    Workspaces { name: String },
}

pub fn parse_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (title, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TITLE=VALUE, got '{}'", raw))?;
    if title.is_empty() {
        return Err(format!("missing column title in '{}'", raw));
    }
    Ok((title.to_string(), parse_value(value)?))
}

/// Parse names like `text-number` or `AUTO_NUMBER` into the service's enums.
pub fn parse_service_enum<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let name = raw.trim().to_uppercase().replace('-', "_");
    serde_json::from_value(Value::String(name)).map_err(|_| format!("unknown value '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_prefer_json() {
        assert_eq!(parse_value("42").unwrap(), json!(42));
        assert_eq!(parse_value("true").unwrap(), json!(true));
        assert_eq!(parse_value("Done").unwrap(), json!("Done"));
        assert_eq!(parse_value("\"42\"").unwrap(), json!("42"));
    }

    #[test]
    fn fields_split_on_first_equals() {
        assert_eq!(
            parse_field("Formula==SUM(A1)").unwrap(),
            ("Formula".to_string(), json!("=SUM(A1)"))
        );
        assert!(parse_field("NoEquals").is_err());
        assert!(parse_field("=7").is_err());
    }

    #[test]
    fn service_enums_accept_kebab_case() {
        let parsed: ColumnType = parse_service_enum("text-number").unwrap();
        assert_eq!(parsed, ColumnType::TextNumber);

        let parsed: SystemColumnType = parse_service_enum("modified_by").unwrap();
        assert_eq!(parsed, SystemColumnType::ModifiedBy);

        assert!(parse_service_enum::<ColumnType>("spreadsheet").is_err());
    }

    #[derive(clap::Parser)]
    struct Wrapper {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        use clap::Parser;
        Wrapper::try_parse_from(std::iter::once("bulkedit").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn update_cell_accepts_negative_row() {
        let command = parse(&["update-cell", "--row", "-1", "--column-index", "1", "--value", "x"]);

        let Command::UpdateCell { row, column_index, value, .. } = command else {
            panic!("expected update-cell");
        };
        assert_eq!(row, -1);
        assert_eq!(column_index, Some(1));
        assert_eq!(value, json!("x"));
    }

    #[test]
    fn add_row_accepts_negative_row() {
        let command = parse(&["add-row", "--field", "Name=x", "--row", "-2"]);

        let Command::AddRow { row, fields, .. } = command else {
            panic!("expected add-row");
        };
        assert_eq!(row, Some(-2));
        assert_eq!(fields, vec![("Name".to_string(), json!("x"))]);
    }

    #[test]
    fn empty_auto_number_args_give_no_format() {
        assert_eq!(AutoNumberArgs::default().to_format(), None);

        let args = AutoNumberArgs {
            auto_number_prefix: Some("T-".to_string()),
            ..AutoNumberArgs::default()
        };
        assert_eq!(args.to_format().and_then(|f| f.prefix), Some("T-".to_string()));
    }
}
