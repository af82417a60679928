use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Subject line of every upload announcement
pub const UPLOAD_ANNOUNCEMENT_SUBJECT: &str = "File Upload Notification";

/// Confirmation returned to the invoker once a batch has been processed
pub const BATCH_PROCESSED_MESSAGE: &str = "File processed successfully!";

const FRACTIONAL_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const WHOLE_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const MAX_FRACTIONAL_DIGITS: usize = 6;

#[derive(Debug, Error)]
pub enum TimestampErr {
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
    #[error("second must be in 0..59")]
    LeapSecond,
    #[error("more than 6 fractional digits")]
    ExcessPrecision,
}

#[derive(Debug, Error)]
pub enum UploadEventErr {
    #[error("event time {raw:?} for {object_key} is not an ISO-8601 UTC timestamp")]
    MalformedTimestamp {
        object_key: String,
        raw: String,
        #[source]
        source: TimestampErr,
    },
    #[error("malformed upload record: {0}")]
    MalformedRecord(String),
}

/// A single object upload as reported by the storage service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    /// The bucket the object was uploaded to
    pub storage_location: String,
    pub object_key: String,
    pub size_bytes: u64,
    /// Raw event time, e.g. `2023-05-01T12:00:00.123Z`
    pub event_timestamp: String,
}

impl UploadEvent {
    /// The human readable message announcing this upload
    pub fn announcement(&self) -> UploadAnnouncement {
        UploadAnnouncement {
            subject: UPLOAD_ANNOUNCEMENT_SUBJECT,
            message: format!(
                "New file uploaded: {} ({} bytes) in bucket {}",
                self.object_key, self.size_bytes, self.storage_location
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAnnouncement {
    pub subject: &'static str,
    pub message: String,
}

/// The lowercased text after the last `.` of an object key.
///
/// This is purely lexical, `archive.tar.gz` is a `gz` and a key without any `.` is its own file type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType(String);

impl FileType {
    pub fn from_object_key(object_key: &str) -> Self {
        let extension = match object_key.rsplit_once('.') {
            Some((_, extension)) => extension,
            None => object_key,
        };

        Self(extension.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Normalizes the event time of an upload into an ISO-8601 string without a zone designator.
///
/// Fractional seconds are kept with microsecond precision and dropped entirely when they are zero,
/// so `2023-05-01T12:00:00.123456Z` becomes `2023-05-01T12:00:00.123456` and
/// `2023-05-01T12:00:00.000Z` becomes `2023-05-01T12:00:00`.
///
/// Leap seconds and fractions finer than a microsecond are rejected.
pub fn normalize_event_timestamp(raw: &str) -> Result<String, TimestampErr> {
    let timestamp = NaiveDateTime::parse_from_str(raw, FRACTIONAL_SECONDS_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, WHOLE_SECONDS_FORMAT))?;

    // chrono encodes a leap second as nanoseconds past 1e9
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(TimestampErr::LeapSecond);
    }

    let fractional_digits = raw
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.trim_end_matches('Z').len());
    if fractional_digits > MAX_FRACTIONAL_DIGITS {
        return Err(TimestampErr::ExcessPrecision);
    }

    Ok(to_iso_format(&timestamp))
}

fn to_iso_format(timestamp: &NaiveDateTime) -> String {
    let seconds = timestamp.format("%Y-%m-%dT%H:%M:%S");
    let micros = timestamp.nanosecond() / 1_000;

    if micros == 0 {
        seconds.to_string()
    } else {
        format!("{seconds}.{micros:06}")
    }
}

/// The metadata persisted for every uploaded object, keyed by the object key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadataRecord {
    pub object_key: String,
    pub storage_location: String,
    pub size_bytes: u64,
    pub upload_time: String,
    pub file_type: FileType,
}

impl TryFrom<&UploadEvent> for UploadMetadataRecord {
    type Error = UploadEventErr;

    fn try_from(event: &UploadEvent) -> Result<Self, Self::Error> {
        let upload_time = normalize_event_timestamp(&event.event_timestamp).map_err(|source| {
            UploadEventErr::MalformedTimestamp {
                object_key: event.object_key.clone(),
                raw: event.event_timestamp.clone(),
                source,
            }
        })?;

        Ok(Self {
            object_key: event.object_key.clone(),
            storage_location: event.storage_location.clone(),
            size_bytes: event.size_bytes,
            upload_time,
            file_type: FileType::from_object_key(&event.object_key),
        })
    }
}

/// Counters describing what happened to a batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub records: usize,
    pub store_failures: usize,
    pub publish_failures: usize,
}

/// The acknowledgement returned to the lambda invoker
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchAcknowledgement {
    pub status_code: u16,
    /// JSON encoded confirmation message
    pub body: String,
}

impl BatchAcknowledgement {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::from(BATCH_PROCESSED_MESSAGE).to_string(),
        }
    }
}
