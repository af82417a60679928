use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

/// The partition key of the file uploads table
pub const FILE_NAME: &str = "file_name";
pub const BUCKET_NAME: &str = "bucket_name";
pub const SIZE_BYTES: &str = "size_bytes";
pub const UPLOAD_TIME: &str = "upload_time";
pub const FILE_TYPE: &str = "file_type";

/// A single row of the file uploads table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadItem<'a> {
    pub file_name: &'a str,
    pub bucket_name: &'a str,
    pub size_bytes: u64,
    pub upload_time: &'a str,
    pub file_type: &'a str,
}

impl FileUploadItem<'_> {
    pub fn to_attributes(&self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (FILE_NAME.to_string(), AttributeValue::S(self.file_name.to_string())),
            (
                BUCKET_NAME.to_string(),
                AttributeValue::S(self.bucket_name.to_string()),
            ),
            (
                SIZE_BYTES.to_string(),
                AttributeValue::N(self.size_bytes.to_string()),
            ),
            (
                UPLOAD_TIME.to_string(),
                AttributeValue::S(self.upload_time.to_string()),
            ),
            (FILE_TYPE.to_string(), AttributeValue::S(self.file_type.to_string())),
        ])
    }
}

/// Unconditionally puts the item, there is no existence check on the file name
#[tracing::instrument(skip(client))]
pub async fn put_file_upload(
    client: &Client,
    table: &str,
    item: &FileUploadItem<'_>,
) -> anyhow::Result<()> {
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item.to_attributes()))
        .send()
        .await
        .context("failed to put file upload into DynamoDB")?;

    Ok(())
}
