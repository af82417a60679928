#![recursion_limit = "256"]

use std::sync::Arc;

use aws_config::BehaviorVersion;
use dynamodb_client::DynamodbClient;
use lambda_entrypoint::LambdaEntrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use sns_client::SNS;
use upload_metadata_handler::{
    config::{Config, FILE_UPLOADS_TABLE},
    domain::service::UploadEventServiceImpl,
    inbound::lambda::{S3UploadNotification, handler},
    outbound::{dynamodb::DynamoDbMetadataStore, sns::SnsUploadNotifier},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    LambdaEntrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env()?;

    tracing::trace!("initialized config");

    let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

    let store = DynamoDbMetadataStore::new(DynamodbClient::new(&aws_config, FILE_UPLOADS_TABLE));
    let notifier = SnsUploadNotifier::new(SNS::from_config(&aws_config), &config.sns_topic_arn);

    let service = Arc::new(UploadEventServiceImpl::new(store, notifier));

    tracing::trace!("initialized aws clients");

    let func = service_fn(move |event: LambdaEvent<S3UploadNotification>| {
        let service = service.clone();

        async move { handler(service.as_ref(), event).await }
    });

    run(func).await
}
