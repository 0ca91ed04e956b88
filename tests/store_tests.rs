use image::DynamicImage;
use qrcraft::reader::{ContentType, Decoded, Decoder, FallbackDecoder};
use qrcraft::store::{GeneratedCodeRecord, MemoryStore, RecordStore, ScanRecord};
use qrcraft::{BarcodeFormat, BlankRenderer, CodeBuilder, CodeError, ErrorKind};

fn camera(_: &DynamicImage) -> Option<Decoded> {
    None
}

fn still_image(_: &DynamicImage) -> Option<Decoded> {
    Some(Decoded::new("MECARD:N:Grace Hopper;TEL:+15550100;EMAIL:grace@navy.mil;;", BarcodeFormat::QrCode))
}

#[test]
fn test_scan_to_history() {
    let img = DynamicImage::new_luma8(32, 32);
    let decoder = FallbackDecoder::new(camera, still_image);
    let store = MemoryStore::new();
    let mut rx = store.subscribe();

    for _ in 0..3 {
        let decoded = decoder.decode(&img).unwrap();
        store.record_scan(ScanRecord::from_scan(&decoded), true).unwrap();
    }

    assert_eq!(store.count().unwrap(), 1);
    let history = rx.borrow_and_update().clone();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content_type, ContentType::Contact);
    assert_eq!(history[0].display_text, "Grace Hopper");
    assert_eq!(history[0].metadata["email"], "grace@navy.mil");
    assert_eq!(store.get_by_type("contact").unwrap().len(), 1);
    assert_eq!(store.search("hopper").unwrap().len(), 1);
}

#[test]
fn test_generated_code_lifecycle() {
    let store: MemoryStore<GeneratedCodeRecord> = MemoryStore::new();
    let generated = CodeBuilder::from_id("location")
        .unwrap()
        .value("latitude", "48.8584")
        .value("longitude", "2.2945")
        .render(&BlankRenderer)
        .unwrap();
    assert_eq!(generated.content(), "geo:48.8584,2.2945");

    let id = store.insert(generated.to_record()).unwrap();
    let mut saved = store.get_by_id(id).unwrap();
    saved.increment_scan_count();
    store.update(saved).unwrap();
    assert_eq!(store.get_by_id(id).unwrap().scan_count, 1);
    assert!(store.toggle_favorite(id).unwrap());

    let mut builder = CodeBuilder::from_record(&store.get_by_id(id).unwrap()).unwrap();
    builder.value("latitude", "91");
    let err = builder.compose().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.field_errors().contains_key("latitude"));

    store.delete(id).unwrap();
    let err = store.get_by_id(id).unwrap_err();
    assert_eq!(err, CodeError::RecordNotFound(id));
    assert!(!err.kind().is_recoverable());
}

#[test]
fn test_clear_notifies() {
    let store = MemoryStore::new();
    let rx = store.subscribe();
    store.insert(ScanRecord::new("https://example.com", BarcodeFormat::QrCode)).unwrap();
    store.insert(ScanRecord::new("5901234123457", BarcodeFormat::Ean13)).unwrap();
    assert_eq!(rx.borrow().len(), 2);
    assert_eq!(store.get_by_type("PRODUCT").unwrap().len(), 1);
    store.clear().unwrap();
    assert!(rx.borrow().is_empty());
    assert_eq!(store.count().unwrap(), 0);
}
