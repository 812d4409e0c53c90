use std::{io::Cursor, sync::Arc};

use serde_json::json;

use super::*;
use crate::{
    config::ProcessingConfig,
    store::{FixedOrientation, MemoryBlobStore, MemoryRecordStore, RecordStore},
};

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 60, 60, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn dispatcher() -> (Dispatcher, Arc<MemoryBlobStore>, Arc<MemoryRecordStore>) {
    let blobs = Arc::new(MemoryBlobStore::new());
    let records = Arc::new(MemoryRecordStore::new());
    let cfg = ProcessingConfig {
        trimmed_height: 64,
        thumb_size: 32,
        ..Default::default()
    };
    let ctx = PipelineContext::new(
        blobs.clone(),
        records.clone(),
        Arc::new(FixedOrientation(None)),
        cfg,
    )
    .unwrap();
    (Dispatcher::new(ctx), blobs, records)
}

fn created(collection: &str, id: &str, data: serde_json::Value) -> RecordEvent {
    RecordEvent::Created {
        collection: collection.to_string(),
        id: id.to_string(),
        data,
    }
}

#[test]
fn base_picture_lifecycle() {
    let (d, blobs, records) = dispatcher();
    let data = json!({ "originalPath": "g/a.png", "rotation": 0 });
    blobs.insert("g/a.png", png(128, 64), "image/png").unwrap();
    records.insert(BASE_PICTURES, "b1", data.clone()).unwrap();

    let out = d.handle(&created(BASE_PICTURES, "b1", data)).unwrap();
    assert_eq!(out.action, DispatchAction::ProcessedBasePicture);
    assert_eq!(out.message, "trimmed picture at g/trimmed_a.png");

    let after = records.get(BASE_PICTURES, "b1").unwrap().unwrap();
    let updated = RecordEvent::Updated {
        collection: BASE_PICTURES.to_string(),
        id: "b1".to_string(),
        data: after.clone(),
    };
    let out = d.handle(&updated).unwrap();
    assert_eq!(out.action, DispatchAction::Ignored);
    assert_eq!(out.message, "base pictures are immutable once created");

    let deleted = RecordEvent::Deleted {
        collection: BASE_PICTURES.to_string(),
        id: "b1".to_string(),
        data: after,
    };
    let out = d.handle(&deleted).unwrap();
    assert_eq!(out.action, DispatchAction::CleanedUp);
    assert_eq!(out.message, "deleted trimmed image, deleted thumbnail");
    assert!(blobs.paths().is_empty());
}

#[test]
fn problems_run_only_when_an_image_is_required() {
    let (d, blobs, records) = dispatcher();
    blobs.insert("g/trimmed_a.png", png(64, 64), "image/png").unwrap();
    let data = json!({ "basePicturePath": "g/trimmed_a.png", "imageRequired": false });
    records.insert(PROBLEMS, "p1", data.clone()).unwrap();

    let out = d.handle(&created(PROBLEMS, "p1", data)).unwrap();
    assert_eq!(out.action, DispatchAction::Ignored);

    let data = json!({ "basePicturePath": "g/trimmed_a.png", "imageRequired": true });
    let out = d
        .handle(&RecordEvent::Updated {
            collection: PROBLEMS.to_string(),
            id: "p1".to_string(),
            data,
        })
        .unwrap();
    assert_eq!(out.action, DispatchAction::ProcessedProblem);
    assert_eq!(out.message, "drew 0 primitives into problemImages/completed_p1.jpg");
    assert!(blobs.contains("problemImages/thumb_p1.jpg"));

    let out = d
        .handle(&RecordEvent::Deleted {
            collection: PROBLEMS.to_string(),
            id: "p1".to_string(),
            data: json!({}),
        })
        .unwrap();
    assert_eq!(out.message, "deleted completed image, deleted thumbnail");
}

#[test]
fn unknown_collections_are_ignored() {
    let (d, _, _) = dispatcher();
    let out = d.handle(&created("users", "u1", json!({}))).unwrap();
    assert_eq!(out.action, DispatchAction::Ignored);
    assert_eq!(out.message, "no handler for collection 'users'");
}

#[test]
fn events_deserialize_from_tagged_json() {
    let ev: RecordEvent = serde_json::from_value(json!({
        "event": "deleted",
        "collection": "problems",
        "id": "p9",
        "data": {}
    }))
    .unwrap();
    assert_eq!(ev.collection(), "problems");
    assert_eq!(ev.id(), "p9");
    assert!(matches!(ev, RecordEvent::Deleted { .. }));
}

#[test]
fn batch_results_keep_input_order_in_parallel() {
    let (d, blobs, records) = dispatcher();
    let mut events = Vec::new();
    for i in 0..6 {
        let path = format!("g/w{i}.png");
        blobs.insert(&path, png(40 + i * 8, 40), "image/png").unwrap();
        let data = json!({ "originalPath": path });
        records.insert(BASE_PICTURES, &format!("b{i}"), data.clone()).unwrap();
        events.push(created(BASE_PICTURES, &format!("b{i}"), data));
    }
    events.push(created(BASE_PICTURES, "missing", json!({ "originalPath": "g/none.png" })));

    let opts = DispatchOpts {
        parallel: true,
        threads: Some(3),
    };
    let results = d.handle_all(&events, &opts).unwrap();
    assert_eq!(results.len(), 7);
    for (i, r) in results.iter().take(6).enumerate() {
        assert_eq!(r.as_ref().unwrap().id, format!("b{i}"));
    }
    assert!(matches!(results[6], Err(WallprintError::SourceNotFound(_))));
    assert!(blobs.contains("g/trimmed_w5.png"));
}

#[test]
fn zero_threads_is_rejected() {
    let (d, _, _) = dispatcher();
    let opts = DispatchOpts {
        parallel: true,
        threads: Some(0),
    };
    assert!(matches!(
        d.handle_all(&[], &opts),
        Err(WallprintError::Validation(_))
    ));
}
