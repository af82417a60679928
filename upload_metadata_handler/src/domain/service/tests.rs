use std::sync::{Arc, Mutex};

use cool_asserts::assert_matches;

use crate::domain::{
    models::FileType,
    ports::{MockMetadataStore, MockUploadNotifier},
};

use super::*;

fn upload_event(object_key: &str, size_bytes: u64) -> UploadEvent {
    UploadEvent {
        storage_location: "uploads-bucket".to_string(),
        object_key: object_key.to_string(),
        size_bytes,
        event_timestamp: "2023-05-01T12:00:00.000Z".to_string(),
    }
}

fn accepting_store(times: usize) -> MockMetadataStore {
    let mut store = MockMetadataStore::new();
    store
        .expect_put_upload_metadata()
        .times(times)
        .returning(|_record| Box::pin(async move { Ok(()) }));
    store
}

fn accepting_notifier(times: usize) -> MockUploadNotifier {
    let mut notifier = MockUploadNotifier::new();
    notifier
        .expect_announce_upload()
        .times(times)
        .returning(|_announcement| Box::pin(async move { Ok(()) }));
    notifier
}

#[tokio::test]
async fn it_should_store_and_announce_the_upload() {
    let mut store = MockMetadataStore::new();
    store
        .expect_put_upload_metadata()
        .times(1)
        .withf(|record| {
            assert_eq!(
                record,
                &UploadMetadataRecord {
                    object_key: "report.final.pdf".to_string(),
                    storage_location: "uploads-bucket".to_string(),
                    size_bytes: 2048,
                    upload_time: "2023-05-01T12:00:00".to_string(),
                    file_type: FileType::from_object_key("pdf"),
                }
            );
            true
        })
        .returning(|_record| Box::pin(async move { Ok(()) }));

    let mut notifier = MockUploadNotifier::new();
    notifier
        .expect_announce_upload()
        .times(1)
        .withf(|announcement| {
            assert_eq!(announcement.subject, "File Upload Notification");
            assert_eq!(
                announcement.message,
                "New file uploaded: report.final.pdf (2048 bytes) in bucket uploads-bucket"
            );
            true
        })
        .returning(|_announcement| Box::pin(async move { Ok(()) }));

    let res = UploadEventServiceImpl::new(store, notifier)
        .process_batch(vec![upload_event("report.final.pdf", 2048)])
        .await
        .unwrap();

    assert_eq!(res.status_code, 200);
    assert_eq!(res, BatchAcknowledgement::success());
}

#[tokio::test]
async fn it_should_attempt_every_record_when_every_call_fails() {
    let mut store = MockMetadataStore::new();
    store
        .expect_put_upload_metadata()
        .times(3)
        .returning(|_record| Box::pin(async move { Err(anyhow::anyhow!("throttled")) }));

    let mut notifier = MockUploadNotifier::new();
    notifier
        .expect_announce_upload()
        .times(3)
        .returning(|_announcement| Box::pin(async move { Err(anyhow::anyhow!("unavailable")) }));

    let service = UploadEventServiceImpl::new(store, notifier);
    let events = vec![
        upload_event("a.txt", 1),
        upload_event("b.png", 2),
        upload_event("c", 3),
    ];

    let report = service.process_events(events.clone()).await.unwrap();

    assert_eq!(
        report,
        BatchReport {
            records: 3,
            store_failures: 3,
            publish_failures: 3,
        }
    );
}

#[tokio::test]
async fn it_should_succeed_when_the_store_write_fails() {
    let mut store = MockMetadataStore::new();
    store
        .expect_put_upload_metadata()
        .times(1)
        .returning(|_record| Box::pin(async move { Err(anyhow::anyhow!("access denied")) }));

    let res = UploadEventServiceImpl::new(store, accepting_notifier(1))
        .process_batch(vec![upload_event("report.final.pdf", 2048)])
        .await
        .unwrap();

    assert_eq!(res.status_code, 200);
}

#[tokio::test]
async fn it_should_succeed_when_the_publish_fails() {
    let mut notifier = MockUploadNotifier::new();
    notifier
        .expect_announce_upload()
        .times(1)
        .returning(|_announcement| Box::pin(async move { Err(anyhow::anyhow!("topic not found")) }));

    let res = UploadEventServiceImpl::new(accepting_store(1), notifier)
        .process_batch(vec![upload_event("report.final.pdf", 2048)])
        .await
        .unwrap();

    assert_eq!(res.status_code, 200);
}

#[tokio::test]
async fn it_should_keep_the_batch_order() {
    let stored = Arc::new(Mutex::new(Vec::new()));
    let announced = Arc::new(Mutex::new(Vec::new()));

    let mut store = MockMetadataStore::new();
    let store_log = stored.clone();
    store
        .expect_put_upload_metadata()
        .times(3)
        .returning(move |record| {
            store_log.lock().unwrap().push(record.object_key);
            Box::pin(async move { Ok(()) })
        });

    let mut notifier = MockUploadNotifier::new();
    let notifier_log = announced.clone();
    notifier
        .expect_announce_upload()
        .times(3)
        .returning(move |announcement| {
            notifier_log.lock().unwrap().push(announcement.message);
            Box::pin(async move { Ok(()) })
        });

    UploadEventServiceImpl::new(store, notifier)
        .process_batch(vec![
            upload_event("first.csv", 10),
            upload_event("second.csv", 20),
            upload_event("third.csv", 30),
        ])
        .await
        .unwrap();

    assert_eq!(
        *stored.lock().unwrap(),
        vec!["first.csv", "second.csv", "third.csv"]
    );
    assert_eq!(
        *announced.lock().unwrap(),
        vec![
            "New file uploaded: first.csv (10 bytes) in bucket uploads-bucket",
            "New file uploaded: second.csv (20 bytes) in bucket uploads-bucket",
            "New file uploaded: third.csv (30 bytes) in bucket uploads-bucket",
        ]
    );
}

#[tokio::test]
async fn it_should_not_touch_anything_when_a_timestamp_is_malformed() {
    let mut malformed = upload_event("second.csv", 20);
    malformed.event_timestamp = "01/05/2023 12:00".to_string();

    let res = UploadEventServiceImpl::new(accepting_store(0), accepting_notifier(0))
        .process_batch(vec![upload_event("first.csv", 10), malformed])
        .await;

    assert_matches!(
        res,
        Err(UploadEventErr::MalformedTimestamp { object_key, .. }) => {
            assert_eq!(object_key, "second.csv");
        }
    );
}

#[tokio::test]
async fn it_should_acknowledge_an_empty_batch() {
    let service = UploadEventServiceImpl::new(accepting_store(0), accepting_notifier(0));

    let report = service.process_events(vec![]).await.unwrap();
    assert_eq!(report, BatchReport::default());

    let res = service.process_batch(vec![]).await.unwrap();
    assert_eq!(res.status_code, 200);
}
