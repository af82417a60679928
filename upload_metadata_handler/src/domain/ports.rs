//! This module defines the ports the upload domain requires

use std::fmt::Debug;

use crate::domain::models::{
    BatchAcknowledgement, UploadAnnouncement, UploadEvent, UploadEventErr, UploadMetadataRecord,
};

/// Trait for persisting [UploadMetadataRecord]s
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait MetadataStore: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Debug + Send;

    /// write the record keyed by its object key, replacing any existing record for the same key
    fn put_upload_metadata(
        &self,
        record: UploadMetadataRecord,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// Trait for announcing uploads to subscribers
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait UploadNotifier: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Debug + Send;

    /// publish the announcement to the configured destination
    fn announce_upload(
        &self,
        announcement: UploadAnnouncement,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// The api for handling a batch of uploads
#[cfg_attr(test, mockall::automock)]
pub trait UploadEventService: Send + Sync + 'static {
    /// persist and announce every upload in the batch.
    /// Only malformed input fails the batch, store and publish failures are logged and skipped.
    fn process_batch(
        &self,
        events: Vec<UploadEvent>,
    ) -> impl Future<Output = Result<BatchAcknowledgement, UploadEventErr>> + Send;
}
