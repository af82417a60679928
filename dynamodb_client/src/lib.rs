use aws_config::SdkConfig;

pub mod file_upload;

pub use file_upload::FileUploadItem;

#[derive(Debug, Clone)]
pub struct DynamodbClient {
    pub file_uploads: FileUploads,
}

impl DynamodbClient {
    pub fn new(aws_config: &SdkConfig, file_uploads_table: &str) -> Self {
        let client = aws_sdk_dynamodb::Client::new(aws_config);

        Self::new_from_client(client, file_uploads_table)
    }

    pub fn new_from_client(client: aws_sdk_dynamodb::Client, file_uploads_table: &str) -> Self {
        Self {
            file_uploads: FileUploads {
                table: file_uploads_table.to_string(),
                client,
            },
        }
    }
}

/// Access to the table holding one item per uploaded object
#[derive(Debug, Clone)]
pub struct FileUploads {
    table: String,
    client: aws_sdk_dynamodb::Client,
}

impl FileUploads {
    /// Writes the item for an uploaded file, replacing any item with the same file name
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    pub async fn put_file_upload(&self, item: &FileUploadItem<'_>) -> anyhow::Result<()> {
        file_upload::put_file_upload(&self.client, &self.table, item).await
    }
}
