use lambda_runtime::{Error, LambdaEvent};

use crate::domain::{
    models::{BatchAcknowledgement, UploadEvent, UploadEventErr},
    ports::UploadEventService,
};

/// The s3 object created notification delivered to the lambda.
///
/// Only the fields the handler reads are modelled, everything else in a record is ignored.
/// `eventTime` stays a raw string as the handler normalizes it itself.
#[derive(serde::Deserialize, Debug)]
pub struct S3UploadNotification {
    #[serde(rename = "Records")]
    pub records: Vec<S3UploadRecord>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct S3UploadRecord {
    pub event_time: Option<String>,
    pub s3: S3Entity,
}

#[derive(serde::Deserialize, Debug)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(serde::Deserialize, Debug)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
pub struct S3Object {
    pub key: Option<String>,
    pub size: Option<i64>,
}

impl TryFrom<S3UploadRecord> for UploadEvent {
    type Error = UploadEventErr;

    fn try_from(record: S3UploadRecord) -> Result<Self, Self::Error> {
        let object_key = record
            .s3
            .object
            .key
            .ok_or_else(|| UploadEventErr::MalformedRecord("missing s3.object.key".to_string()))?;

        let storage_location = record.s3.bucket.name.ok_or_else(|| {
            UploadEventErr::MalformedRecord(format!("missing s3.bucket.name for {object_key}"))
        })?;

        let size_bytes = match record.s3.object.size {
            Some(size) => u64::try_from(size).map_err(|_| {
                UploadEventErr::MalformedRecord(format!("negative size {size} for {object_key}"))
            })?,
            None => {
                return Err(UploadEventErr::MalformedRecord(format!(
                    "missing s3.object.size for {object_key}"
                )));
            }
        };

        let event_timestamp = record.event_time.ok_or_else(|| {
            UploadEventErr::MalformedRecord(format!("missing eventTime for {object_key}"))
        })?;

        Ok(Self {
            storage_location,
            object_key,
            size_bytes,
            event_timestamp,
        })
    }
}

/// Processes the s3 event
#[tracing::instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler<T>(
    service: &T,
    event: LambdaEvent<S3UploadNotification>,
) -> Result<BatchAcknowledgement, Error>
where
    T: UploadEventService,
{
    tracing::info!(
        record_count = event.payload.records.len(),
        "processing s3 records"
    );

    let events = event
        .payload
        .records
        .into_iter()
        .map(UploadEvent::try_from)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| tracing::error!(error=?err, "malformed s3 record"))?;

    let acknowledgement = service
        .process_batch(events)
        .await
        .inspect_err(|err| tracing::error!(error=?err, "unable to process upload batch"))?;

    tracing::trace!("processing complete");

    Ok(acknowledgement)
}
