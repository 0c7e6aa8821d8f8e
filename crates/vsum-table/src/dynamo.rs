//! DynamoDB-backed report table.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::{debug, info};
use vsum_models::ReportRecord;

use crate::error::{TableError, TableResult};
use crate::{ReportTable, FILE_NAME_ATTR, PRESIGNED_URL_ATTR};

/// `ReportTable` stored in a DynamoDB table keyed on `fileName`.
#[derive(Clone)]
pub struct DynamoReportTable {
    client: Client,
    table_name: String,
}

impl DynamoReportTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, table_name: impl Into<String>) -> Self {
        Self::new(Client::new(config), table_name)
    }
}

/// Convert a table item into a row.
pub fn record_from_item(item: &HashMap<String, AttributeValue>) -> TableResult<ReportRecord> {
    let file_name = item
        .get(FILE_NAME_ATTR)
        .and_then(|v| v.as_s().ok())
        .ok_or(TableError::MalformedRow(FILE_NAME_ATTR))?;
    let presigned_url = item
        .get(PRESIGNED_URL_ATTR)
        .and_then(|v| v.as_s().ok())
        .ok_or(TableError::MalformedRow(PRESIGNED_URL_ATTR))?;

    Ok(ReportRecord {
        file_name: file_name.clone(),
        presigned_url: presigned_url.clone(),
    })
}

#[async_trait]
impl ReportTable for DynamoReportTable {
    async fn put_report(&self, record: &ReportRecord) -> TableResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(FILE_NAME_ATTR, AttributeValue::S(record.file_name.clone()))
            .item(
                PRESIGNED_URL_ATTR,
                AttributeValue::S(record.presigned_url.clone()),
            )
            .send()
            .await
            .map_err(|e| TableError::put_failed(e.to_string()))?;

        info!(
            "Stored report row for {} in {}",
            record.file_name, self.table_name
        );
        Ok(())
    }

    async fn list_reports(&self) -> TableResult<Vec<ReportRecord>> {
        let mut records = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| TableError::read_failed(e.to_string()))?;

            for item in response.items() {
                records.push(record_from_item(item)?);
            }

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!("Scanned {} report rows", records.len());
        Ok(records)
    }

    async fn get_report(&self, file_name: &str) -> TableResult<Option<ReportRecord>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(FILE_NAME_ATTR, AttributeValue::S(file_name.to_string()))
            .send()
            .await
            .map_err(|e| TableError::read_failed(e.to_string()))?;

        response.item.as_ref().map(record_from_item).transpose()
    }
}
