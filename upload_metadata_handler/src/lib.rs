//! Lambda which records metadata for every object uploaded to a bucket and announces the upload on an SNS topic

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
