use std::sync::Arc;
use std::thread;

use imgwatch::slot::ImageSlot;

mod common;
use common::solid_decoded;

#[test]
fn snapshot_is_empty_before_first_publish() {
    let slot = ImageSlot::new();
    assert!(slot.snapshot().is_none());
}

#[test]
fn publish_replaces_image_and_bumps_generation() {
    let slot = ImageSlot::new();
    slot.publish(solid_decoded(2, 2, 10));
    let (gen1, img1) = slot.snapshot().expect("image after publish");
    assert_eq!(img1.width, 2);

    slot.publish(solid_decoded(3, 3, 20));
    let (gen2, img2) = slot.snapshot().expect("image after second publish");
    assert!(gen2 > gen1);
    assert_eq!(img2.width, 3);
    assert_eq!(img2.pixels.pixels[0].r(), 20);
}

#[test]
fn old_snapshot_stays_valid_after_publish() {
    let slot = ImageSlot::new();
    slot.publish(solid_decoded(2, 2, 10));
    let (_, old) = slot.snapshot().unwrap();
    slot.publish(solid_decoded(4, 4, 30));
    // The superseded image is kept alive by the outstanding Arc.
    assert_eq!(old.width, 2);
    assert_eq!(old.pixels.pixels[0].r(), 10);
}

#[test]
fn concurrent_reader_never_observes_torn_image() {
    let slot = Arc::new(ImageSlot::new());

    let writer = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || {
            for step in 1..=500u32 {
                let side = 1 + (step % 8);
                // Pixel value encodes the side length, so a mismatched
                // width/pixel pairing is detectable from a snapshot.
                slot.publish(solid_decoded(side, side, side as u8));
            }
        })
    };

    for _ in 0..5000 {
        if let Some((_, image)) = slot.snapshot() {
            assert_eq!(
                image.pixels.size,
                [image.width as usize, image.height as usize]
            );
            let expected = image.width as u8;
            assert!(image.pixels.pixels.iter().all(|p| p.r() == expected));
        }
    }

    writer.join().unwrap();
}
