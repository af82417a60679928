use dynamodb_client::{DynamodbClient, FileUploadItem};

use crate::domain::{models::UploadMetadataRecord, ports::MetadataStore};

/// [MetadataStore] backed by the file uploads DynamoDB table
#[derive(Debug, Clone)]
pub struct DynamoDbMetadataStore {
    client: DynamodbClient,
}

impl DynamoDbMetadataStore {
    pub fn new(client: DynamodbClient) -> Self {
        Self { client }
    }
}

fn file_upload_item(record: &UploadMetadataRecord) -> FileUploadItem<'_> {
    FileUploadItem {
        file_name: &record.object_key,
        bucket_name: &record.storage_location,
        size_bytes: record.size_bytes,
        upload_time: &record.upload_time,
        file_type: record.file_type.as_str(),
    }
}

impl MetadataStore for DynamoDbMetadataStore {
    type Err = anyhow::Error;

    async fn put_upload_metadata(&self, record: UploadMetadataRecord) -> anyhow::Result<()> {
        self.client
            .file_uploads
            .put_file_upload(&file_upload_item(&record))
            .await
    }
}
