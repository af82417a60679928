use tracing::Instrument;

use crate::domain::{
    models::{
        BatchAcknowledgement, BatchReport, UploadEvent, UploadEventErr, UploadMetadataRecord,
    },
    ports::{MetadataStore, UploadEventService, UploadNotifier},
};

#[cfg(test)]
mod tests;

/// struct which handles upload batches with abstracted interfaces for mocking
pub struct UploadEventServiceImpl<S, N> {
    /// the interface for persisting metadata
    store: S,
    /// the interface for announcing uploads
    notifier: N,
}

impl<S, N> UploadEventServiceImpl<S, N>
where
    S: MetadataStore,
    N: UploadNotifier,
{
    pub fn new(store: S, notifier: N) -> Self {
        UploadEventServiceImpl { store, notifier }
    }

    /// Processes every event of the batch in order.
    ///
    /// All records are derived before any side effect, so a malformed event fails the batch
    /// without anything having been written or published.
    #[tracing::instrument(skip_all, fields(record_count = events.len()))]
    pub async fn process_events(
        &self,
        events: Vec<UploadEvent>,
    ) -> Result<BatchReport, UploadEventErr> {
        let records = events
            .iter()
            .map(UploadMetadataRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = BatchReport::default();

        for (event, record) in events.iter().zip(records) {
            let span = tracing::info_span!("process_record", object_key = %event.object_key);
            self.process_record(event, record, &mut report)
                .instrument(span)
                .await;
        }

        tracing::info!(
            records = report.records,
            store_failures = report.store_failures,
            publish_failures = report.publish_failures,
            "processed upload batch"
        );

        Ok(report)
    }

    async fn process_record(
        &self,
        event: &UploadEvent,
        record: UploadMetadataRecord,
        report: &mut BatchReport,
    ) {
        report.records += 1;

        tracing::trace!(record=?record, "storing upload metadata");
        if let Err(err) = self.store.put_upload_metadata(record).await {
            report.store_failures += 1;
            tracing::error!(error=?err, "failed to store upload metadata");
        }

        if let Err(err) = self.notifier.announce_upload(event.announcement()).await {
            report.publish_failures += 1;
            tracing::error!(error=?err, "failed to publish upload announcement");
        }
    }
}

impl<S, N> UploadEventService for UploadEventServiceImpl<S, N>
where
    S: MetadataStore,
    N: UploadNotifier,
{
    async fn process_batch(
        &self,
        events: Vec<UploadEvent>,
    ) -> Result<BatchAcknowledgement, UploadEventErr> {
        self.process_events(events).await?;

        Ok(BatchAcknowledgement::success())
    }
}
