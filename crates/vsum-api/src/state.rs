//! Application state.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use vsum_table::{DynamoReportTable, ReportTable};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub reports: Arc<dyn ReportTable>,
}

impl AppState {
    pub fn new(config: ApiConfig, reports: Arc<dyn ReportTable>) -> Self {
        Self { config, reports }
    }

    /// State backed by the DynamoDB report table.
    pub async fn from_env(config: ApiConfig) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let table = DynamoReportTable::from_sdk_config(&sdk_config, config.table_name.clone());
        Self::new(config, Arc::new(table))
    }
}
