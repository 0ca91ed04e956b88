use std::error::Error;

use qrcraft::reader::{Decoded, ScannedContent};
use qrcraft::store::{MemoryStore, RecordStore, ScanRecord};
use qrcraft::BarcodeFormat;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init();

    let store = MemoryStore::new();
    let rx = store.subscribe();

    // Stand-ins for what a camera decoder would report
    let scans = [
        Decoded::new(r"WIFI:T:WPA;S:Cafe\;Bar;P:espresso!;H:false;;", BarcodeFormat::QrCode),
        Decoded::new("geo:35.6586,139.7454", BarcodeFormat::QrCode),
        Decoded::new("4006381333931", BarcodeFormat::Ean13),
        Decoded::new("geo:35.6586,139.7454", BarcodeFormat::QrCode),
    ];
    for decoded in &scans {
        store.record_scan(ScanRecord::from_scan(decoded), true)?;
    }

    println!("{} scans in history", store.count()?);
    for rec in rx.borrow().iter() {
        println!("[{}] {} ({})", rec.content_type, rec.display_text, rec.format);
        for (k, v) in &rec.metadata {
            println!("    {k} = {v}");
        }
    }

    let parsed = ScannedContent::parse("mailto:hello@example.com?subject=Hi", BarcodeFormat::QrCode);
    println!("\n{:?}", parsed);
    Ok(())
}
