use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    #[default]
    TextNumber,
    Date,
    Datetime,
    ContactList,
    Checkbox,
    Picklist,
    Duration,
    Predecessor,
    AbstractDatetime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemColumnType {
    AutoNumber,
    CreatedBy,
    CreatedDate,
    ModifiedBy,
    ModifiedDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoNumberFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_number: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub index: usize,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_column_type: Option<SystemColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_number_format: Option<AutoNumberFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            index: 0,
            column_type: ColumnType::default(),
            options: None,
            symbol: None,
            primary: None,
            system_column_type: None,
            auto_number_format: None,
            width: None,
            format: None,
        }
    }
}

/// Attributes for a column about to be added to a sheet.
///
/// Only the fields that are set reach the new column; everything left as `None`
/// keeps the default from [`Column::new`]. An unset `index` appends the column
/// after the sheet's last one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnSpec {
    pub title: String,
    pub index: Option<usize>,
    pub column_type: Option<ColumnType>,
    pub options: Option<Vec<String>>,
    pub symbol: Option<String>,
    pub is_primary: Option<bool>,
    pub system_column_type: Option<SystemColumnType>,
    pub auto_number_format: Option<AutoNumberFormat>,
    pub width: Option<u32>,
}

impl ColumnSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn build(&self, default_index: usize) -> Column {
        let mut column = Column::new(self.title.clone());
        column.index = self.index.unwrap_or(default_index);
        if let Some(column_type) = self.column_type {
            column.column_type = column_type;
        }
        if let Some(options) = &self.options {
            column.options = Some(options.clone());
        }
        if let Some(symbol) = &self.symbol {
            column.symbol = Some(symbol.clone());
        }
        if let Some(primary) = self.is_primary {
            column.primary = Some(primary);
        }
        if let Some(system_column_type) = self.system_column_type {
            column.system_column_type = Some(system_column_type);
        }
        if let Some(format) = &self.auto_number_format {
            column.auto_number_format = Some(format.clone());
        }
        if let Some(width) = self.width {
            column.width = Some(width);
        }
        column
    }
}

/// Edits to an existing column. Each field that is `Some` overwrites the
/// column's attribute, `None` leaves the current value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnChanges {
    pub new_title: Option<String>,
    pub index: Option<usize>,
    pub column_type: Option<ColumnType>,
    pub options: Option<Vec<String>>,
    pub symbol: Option<String>,
    pub system_column_type: Option<SystemColumnType>,
    pub auto_number_format: Option<AutoNumberFormat>,
    pub width: Option<u32>,
    pub format: Option<String>,
}

impl ColumnChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, column: &mut Column) {
        if let Some(title) = &self.new_title {
            column.title = title.clone();
        }
        if let Some(index) = self.index {
            column.index = index;
        }
        if let Some(column_type) = self.column_type {
            column.column_type = column_type;
        }
        if let Some(options) = &self.options {
            column.options = Some(options.clone());
        }
        if let Some(symbol) = &self.symbol {
            column.symbol = Some(symbol.clone());
        }
        if let Some(system_column_type) = self.system_column_type {
            column.system_column_type = Some(system_column_type);
        }
        if let Some(format) = &self.auto_number_format {
            column.auto_number_format = Some(format.clone());
        }
        if let Some(width) = self.width {
            column.width = Some(width);
        }
        if let Some(format) = &self.format {
            column.format = Some(format.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_only_sets_given_fields() {
        let spec = ColumnSpec {
            column_type: Some(ColumnType::Picklist),
            options: Some(vec!["Red".to_string(), "Green".to_string()]),
            ..ColumnSpec::new("Status")
        };

        let column = spec.build(4);

        assert_eq!(column.title, "Status");
        assert_eq!(column.index, 4);
        assert_eq!(column.column_type, ColumnType::Picklist);
        assert_eq!(column.options.as_deref().map(|o| o.len()), Some(2));
        assert_eq!(column.primary, None);
        assert_eq!(column.width, None);
    }

    #[test]
    fn spec_index_overrides_default() {
        let spec = ColumnSpec {
            index: Some(1),
            width: Some(120),
            ..ColumnSpec::new("Owner")
        };

        let column = spec.build(9);

        assert_eq!(column.index, 1);
        assert_eq!(column.width, Some(120));
    }

    #[test]
    fn changes_keep_untouched_attributes() {
        let mut column = Column::new("Due");
        column.index = 3;
        column.column_type = ColumnType::Date;
        column.width = Some(80);

        let changes = ColumnChanges {
            new_title: Some("Due Date".to_string()),
            format: Some(",,,,,,,,,,,,,,,,".to_string()),
            ..ColumnChanges::default()
        };
        changes.apply_to(&mut column);

        assert_eq!(column.title, "Due Date");
        assert_eq!(column.index, 3);
        assert_eq!(column.column_type, ColumnType::Date);
        assert_eq!(column.width, Some(80));
        assert!(column.format.is_some());
    }

    #[test]
    fn column_type_uses_service_names() {
        let json = serde_json::to_string(&ColumnType::TextNumber).unwrap();
        assert_eq!(json, "\"TEXT_NUMBER\"");

        let parsed: SystemColumnType = serde_json::from_str("\"AUTO_NUMBER\"").unwrap();
        assert_eq!(parsed, SystemColumnType::AutoNumber);
    }
}
