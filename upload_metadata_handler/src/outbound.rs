pub mod dynamodb;
pub mod sns;
