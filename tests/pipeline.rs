//! End-to-end checks: encoded image in, edited pattern and PNG files out.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use beadgen::{
    apply_edit, export_filename, quantize_bytes, render_export, write_png, BeadError, ColorEntry,
    EditRequest, ExportOptions, Palette, Pattern, TargetHeight,
};

fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn checker(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([10, 10, 10, 255])
        } else {
            Rgba([250, 250, 250, 255])
        }
    })
}

fn assert_counts_consistent(pattern: &Pattern) {
    let sum: usize = pattern.counts().values().sum();
    assert_eq!(sum, (pattern.width() * pattern.height()) as usize);
    for cell in pattern.grid().iter().flatten() {
        assert!(pattern.count(&cell.id) >= 1);
    }
}

#[test]
fn test_builtin_palette_checkerboard() {
    let palette = Palette::perler();
    let bytes = png_bytes(checker(6, 4));

    let pattern = quantize_bytes(&bytes, 6, TargetHeight::Auto, &palette).unwrap();

    assert_eq!((pattern.width(), pattern.height()), (6, 4));
    assert_eq!(pattern.get(0, 0).unwrap().id, "P01");
    assert_eq!(pattern.get(1, 0).unwrap().id, "P02");
    assert_eq!(pattern.count("P01"), 12);
    assert_eq!(pattern.count("P02"), 12);
    assert_counts_consistent(&pattern);
}

#[test]
fn test_quantize_is_deterministic() {
    let palette = Palette::perler();
    let img = RgbaImage::from_fn(37, 23, |x, y| {
        Rgba([(x * 7) as u8, (y * 11) as u8, ((x * y) % 256) as u8, 255])
    });
    let bytes = png_bytes(img);

    let a = quantize_bytes(&bytes, 12, TargetHeight::Auto, &palette).unwrap();
    let b = quantize_bytes(&bytes, 12, TargetHeight::Auto, &palette).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.height(), 7);
    assert_counts_consistent(&a);
}

#[test]
fn test_edit_sequence_keeps_counts_consistent() {
    let palette = Palette::perler();
    let pattern = quantize_bytes(&png_bytes(checker(4, 4)), 4, TargetHeight::Auto, &palette).unwrap();
    let yellow = palette.get("P05").unwrap().clone();

    let edits = [
        EditRequest::Global {
            target_id: "P01".to_string(),
            replacement: yellow.clone(),
        },
        EditRequest::Single {
            x: 1,
            y: 0,
            replacement: yellow.clone(),
        },
        EditRequest::Single {
            x: 3,
            y: 3,
            replacement: palette.get("P01").unwrap().clone(),
        },
    ];

    let mut edited = pattern.clone();
    for edit in &edits {
        edited = apply_edit(&edited, edit).unwrap();
        assert_counts_consistent(&edited);
    }

    assert_eq!(edited.count(&yellow.id), 8);
    assert_eq!(edited.count("P02"), 7);
    assert_eq!(edited.count("P01"), 1);
    // Original untouched
    assert_eq!(pattern.count("P01"), 8);
    assert_eq!(pattern.count(&yellow.id), 0);
}

#[test]
fn test_out_of_bounds_edit_is_rejected() {
    let palette = Palette::perler();
    let pattern = quantize_bytes(&png_bytes(checker(3, 2)), 3, TargetHeight::Auto, &palette).unwrap();
    let before = pattern.clone();

    let err = apply_edit(
        &pattern,
        &EditRequest::Single {
            x: 3,
            y: 0,
            replacement: palette.get("P05").unwrap().clone(),
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        BeadError::OutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 2
        }
    ));
    assert_eq!(pattern, before);
}

#[test]
fn test_transparent_pixels_without_white() {
    let palette = Palette::new(
        "dark",
        "Dark",
        vec![
            ColorEntry::new("N", "Navy", "#101040").unwrap(),
            ColorEntry::new("G", "Green", "#10A010").unwrap(),
        ],
    )
    .unwrap();
    let bytes = png_bytes(RgbaImage::from_pixel(2, 2, Rgba([0, 200, 0, 0])));

    let pattern = quantize_bytes(&bytes, 2, TargetHeight::Fixed(2), &palette).unwrap();

    assert_eq!(pattern.count("N"), 4);
}

#[test]
fn test_empty_palette_and_bad_bytes() {
    let empty = Palette::new("none", "None", Vec::new()).unwrap();
    let err = quantize_bytes(b"not an image", 4, TargetHeight::Auto, &empty).unwrap_err();
    assert!(matches!(err, BeadError::EmptyPalette));

    let err = quantize_bytes(b"not an image", 4, TargetHeight::Auto, &Palette::perler()).unwrap_err();
    assert!(matches!(err, BeadError::Decode { .. }));
}

#[test]
fn test_export_written_to_disk() {
    let dir = tempdir().unwrap();
    let pattern = quantize_bytes(
        &png_bytes(checker(10, 5)),
        10,
        TargetHeight::Auto,
        &Palette::perler(),
    )
    .unwrap();

    let path = dir.path().join(export_filename(&pattern));
    let sheet = render_export(&pattern, &ExportOptions::default()).unwrap();
    write_png(&sheet, &path).unwrap();

    let reloaded = image::open(&path).unwrap();
    assert_eq!(reloaded.width(), sheet.width());
    assert_eq!(reloaded.height(), sheet.height());
    assert!(path.ends_with("perler-pattern-10x5.png"));
}
