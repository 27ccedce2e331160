use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::error::BulkEditError;
use crate::model::SheetInfo;

/// Outcome of a sheet-list fan-out. Each input sheet lands in exactly one of
/// the two lists, in input order.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    pub successes: Vec<SheetInfo>,
    pub failures: Vec<SheetFailure>,
}

#[derive(Debug)]
pub struct SheetFailure {
    pub sheet: SheetInfo,
    pub error: BulkEditError,
    /// Causal chain of `error`, outermost cause first.
    pub context: Vec<String>,
}

impl BatchResult {
    pub fn record_success(&mut self, sheet: SheetInfo) {
        self.successes.push(sheet);
    }

    pub fn record_failure(&mut self, sheet: SheetInfo, error: BulkEditError) {
        let context = error.causes();
        self.failures.push(SheetFailure {
            sheet,
            error,
            context,
        });
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for SheetFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SheetFailure", 4)?;
        state.serialize_field("sheet", &self.sheet)?;
        state.serialize_field("kind", &self.error.kind())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.serialize_field("context", &self.context)?;
        state.end()
    }
}
