use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::client::SheetClient;
use crate::error::ClientError;
use crate::logging::ServiceLog;
use crate::model::{Cell, Column, NewRow, Row, RowPlacement, Sheet, SheetInfo};

pub const DEFAULT_BASE_URL: &str = "https://api.smartsheet.com/1.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct RestConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Blocking HTTP client for the Smartsheet REST API.
pub struct RestClient {
    config: RestConfig,
    http: Client,
    log: ServiceLog,
}

impl RestClient {
    pub fn new(config: RestConfig, log: ServiceLog) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("smartsheet-bulkedit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http, log })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        self.log.debug(format_args!("{} {}", method, path));

        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(&self.config.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // Error bodies look like {"errorCode": 1006, "message": "Not Found"}
            let parsed: Option<Value> = serde_json::from_str(&text).ok();
            let code = parsed
                .as_ref()
                .and_then(|v| v.get("errorCode"))
                .and_then(Value::as_i64);
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| text.trim().to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let value = self.request(Method::GET, path, None)?;
        Ok(serde_json::from_value(value)?)
    }

    // Write calls wrap their payload as {"message": "SUCCESS", "result": ...}
    fn write_result(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> Result<Value, ClientError> {
        let mut response = self.request(method, path, Some(body))?;
        match response.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(ClientError::UnexpectedResponse {
                path: path.to_string(),
                reason: "missing \"result\"".to_string(),
            }),
        }
    }
}

impl SheetClient for RestClient {
    fn connect(&mut self) -> Result<(), ClientError> {
        let me: Value = self.fetch("/user/me")?;
        let who = me.get("email").and_then(Value::as_str).unwrap_or("unknown user");
        self.log.info(format_args!("connected to {} as {}", self.config.base_url, who));
        Ok(())
    }

    fn fetch_sheet_list(&self) -> Result<Vec<SheetInfo>, ClientError> {
        self.fetch("/sheets")
    }

    fn load_sheet(&self, info: &SheetInfo) -> Result<Option<Sheet>, ClientError> {
        self.fetch(&format!("/sheet/{}", info.id))
    }

    fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None)
    }

    fn save_cell(&self, row: &Row, cell: &Cell, propagate: bool) -> Result<(), ClientError> {
        let row_id = row.id.ok_or(ClientError::Unsaved("row"))?;
        if propagate {
            self.write_result(
                Method::PUT,
                &format!("/row/{}", row_id),
                json!({ "cells": row.cells }),
            )?;
        } else {
            let body = json!([{ "columnId": cell.column_id, "value": cell.value, "strict": false }]);
            self.write_result(Method::PUT, &format!("/row/{}/cells", row_id), body)?;
        }
        Ok(())
    }

    fn insert_column(&self, sheet: &mut Sheet, column: Column) -> Result<(), ClientError> {
        let path = format!("/sheet/{}/columns", sheet.id);
        let result = self.write_result(Method::POST, &path, serde_json::to_value(&column)?)?;
        // A single column comes back as an object, several as a list
        let created = match result {
            Value::Array(mut columns) if !columns.is_empty() => columns.swap_remove(0),
            object @ Value::Object(_) => object,
            _ => {
                return Err(ClientError::UnexpectedResponse {
                    path,
                    reason: "no column in result".to_string(),
                });
            }
        };
        sheet.insert_column(serde_json::from_value(created)?);
        Ok(())
    }

    fn update_column(&self, _sheet: &Sheet, column: &Column) -> Result<(), ClientError> {
        let column_id = column.id.ok_or(ClientError::Unsaved("column"))?;
        let mut body = serde_json::to_value(column)?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("id");
        }
        self.write_result(Method::PUT, &format!("/column/{}", column_id), body)?;
        Ok(())
    }

    fn add_row(
        &self,
        sheet: &mut Sheet,
        row: NewRow,
        placement: RowPlacement,
    ) -> Result<(), ClientError> {
        let mut body = match placement {
            RowPlacement::Bottom => json!({ "toBottom": true }),
            RowPlacement::Top => json!({ "toTop": true }),
            RowPlacement::Below { sibling_id } => json!({ "siblingId": sibling_id }),
        };
        body["rows"] = json!([row]);

        let result = self.write_result(Method::POST, &format!("/sheet/{}/rows", sheet.id), body)?;
        let created: Vec<Row> = serde_json::from_value(result)?;
        for row in created {
            sheet.insert_row(row, placement)?;
        }
        Ok(())
    }

    fn save_row(&self, _sheet: &Sheet, row: &Row) -> Result<(), ClientError> {
        let row_id = row.id.ok_or(ClientError::Unsaved("row"))?;
        self.write_result(
            Method::PUT,
            &format!("/row/{}", row_id),
            json!({ "expanded": row.expanded }),
        )?;
        Ok(())
    }
}
