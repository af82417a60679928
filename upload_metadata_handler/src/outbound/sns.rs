use sns_client::SNS;

use crate::domain::{models::UploadAnnouncement, ports::UploadNotifier};

/// [UploadNotifier] publishing to a single SNS topic
#[derive(Debug, Clone)]
pub struct SnsUploadNotifier {
    client: SNS,
    topic_arn: String,
}

impl SnsUploadNotifier {
    pub fn new(client: SNS, topic_arn: &str) -> Self {
        Self {
            client,
            topic_arn: topic_arn.to_string(),
        }
    }
}

impl UploadNotifier for SnsUploadNotifier {
    type Err = anyhow::Error;

    async fn announce_upload(&self, announcement: UploadAnnouncement) -> anyhow::Result<()> {
        let message_id = self
            .client
            .publish_with_subject(
                &self.topic_arn,
                announcement.subject,
                &announcement.message,
            )
            .await?;

        tracing::debug!(message_id=?message_id, "published upload announcement");

        Ok(())
    }
}
