use std::error::Error as StdError;

use serde::Serialize;
use thiserror::Error;

use crate::model::SheetInfo;

/// Errors raised by a [`SheetClient`](crate::client::SheetClient) or by the
/// sheet object model it hands out.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("unable to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response from {path}: {reason}")]
    UnexpectedResponse { path: String, reason: String },

    #[error("no column titled '{0}'")]
    ColumnNotFound(String),

    #[error("no column at index {0}")]
    ColumnIndexOutOfRange(usize),

    #[error("no row number {0}")]
    RowNotFound(i64),

    #[error("no row with id {0}")]
    RowIdNotFound(i64),

    #[error("{0} has not been saved to the service yet")]
    Unsaved(&'static str),
}

#[derive(Debug, Error)]
pub enum BulkEditError {
    #[error("{0}")]
    Validation(String),

    /// A column title was given to a sheet-list cell update. The title is
    /// resolved before any sheet is loaded, so it can never succeed; pass a
    /// column index instead.
    #[error("column title '{0}' cannot be resolved before a sheet is loaded; use a column index")]
    ColumnTitleBeforeSheetLoad(String),

    #[error("sheet {0} could not be loaded")]
    SheetNotLoaded(SheetInfo),

    #[error("Error getting workspace list")]
    WorkspaceList {
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Remote,
    Transport,
    Decode,
}

impl BulkEditError {
    pub fn validation(message: impl Into<String>) -> Self {
        BulkEditError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BulkEditError::Validation(_) | BulkEditError::ColumnTitleBeforeSheetLoad(_) => {
                ErrorKind::Validation
            }
            BulkEditError::SheetNotLoaded(_) => ErrorKind::NotFound,
            BulkEditError::WorkspaceList { source } | BulkEditError::Client(source) => {
                source.kind()
            }
        }
    }

    /// Messages of every error in the `source()` chain, outermost first,
    /// excluding this error itself.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = self.source();
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Http(_) => ErrorKind::Transport,
            ClientError::Api { .. } => ErrorKind::Remote,
            ClientError::Json(_) | ClientError::UnexpectedResponse { .. } => ErrorKind::Decode,
            ClientError::ColumnNotFound(_)
            | ClientError::ColumnIndexOutOfRange(_)
            | ClientError::RowNotFound(_)
            | ClientError::RowIdNotFound(_)
            | ClientError::Unsaved(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_wrapped_client_error() {
        let err = BulkEditError::from(ClientError::ColumnNotFound("Owner".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "no column titled 'Owner'");

        let err = BulkEditError::validation("bad");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn causes_walk_the_source_chain() {
        let err = BulkEditError::WorkspaceList {
            source: ClientError::Api {
                status: 403,
                code: Some(1004),
                message: "You are not authorized to perform this action.".to_string(),
            },
        };

        assert_eq!(err.to_string(), "Error getting workspace list");
        assert_eq!(
            err.causes(),
            vec!["service returned 403: You are not authorized to perform this action.".to_string()]
        );
        assert_eq!(err.kind(), ErrorKind::Remote);
    }
}
