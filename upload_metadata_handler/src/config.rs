use anyhow::Context;

/// The table every upload is recorded in
pub const FILE_UPLOADS_TABLE: &str = "FileUploads";

/// The configuration parameters for the lambda, pulled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// The topic upload announcements are published to
    pub sns_topic_arn: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&'static str) -> Result<String, std::env::VarError>,
    {
        let sns_topic_arn = lookup("SNS_TOPIC_ARN").context("SNS_TOPIC_ARN must be provided")?;

        Ok(Config { sns_topic_arn })
    }
}
