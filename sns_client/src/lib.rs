use aws_config::SdkConfig;

#[derive(Clone, Debug)]
pub struct SNS {
    inner: aws_sdk_sns::Client,
}

impl SNS {
    pub fn new(inner: aws_sdk_sns::Client) -> Self {
        Self { inner }
    }

    pub fn from_config(aws_config: &SdkConfig) -> Self {
        Self::new(aws_sdk_sns::Client::new(aws_config))
    }

    /// Publishes a message with a subject line to the topic.
    ///
    /// The subject is used by email subscriptions as the mail subject and is included in
    /// the standard JSON envelope delivered to every other protocol.
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` if the topic accepted the message
    /// * `Err` if there was an error publishing the message
    #[tracing::instrument(skip(self, message))]
    pub async fn publish_with_subject(
        &self,
        topic_arn: &str,
        subject: &str,
        message: &str,
    ) -> anyhow::Result<Option<String>> {
        let output = self
            .inner
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await?;

        Ok(output.message_id().map(str::to_string))
    }
}
