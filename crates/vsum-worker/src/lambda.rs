//! Shared wiring for the Lambda entry points.

use aws_config::{BehaviorVersion, SdkConfig};

use crate::logging::init_tracing;

/// Load `.env`, install tracing and load the AWS SDK configuration.
///
/// Called once per process; clients built from the returned config are
/// reused across invocations.
pub async fn bootstrap() -> SdkConfig {
    dotenvy::dotenv().ok();
    init_tracing();
    aws_config::load_defaults(BehaviorVersion::latest()).await
}
