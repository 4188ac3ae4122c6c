use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Per-entity transform run after validation and before the write.
#[async_trait]
pub trait WriteHook: Send + Sync {
    /// Write-only body keys the hook consumes. They pass validation untouched and never reach the store.
    fn inputs(&self) -> &'static [&'static str];

    async fn prepare(&self, body: &mut HashMap<String, Value>, mode: WriteMode) -> Result<(), AppError>;
}
