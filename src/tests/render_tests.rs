use super::digest_with_leading_ones;
use crate::canvas::Canvas;
use crate::error::Result;
use crate::pixel::Rgb;
use crate::render::{render_rgb, ImageEncoder, RenderCache, RenderKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Passes the raw grid through, prefixed with the dimensions.
#[derive(Default)]
struct RawEncoder {
    calls: AtomicUsize,
}

impl ImageEncoder for RawEncoder {
    fn encode(&self, width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out = vec![width as u8, height as u8];
        out.extend_from_slice(rgb);
        Ok(out)
    }
}

type Small = Canvas<2, 2>;

#[test]
fn test_true_color_grid() {
    let canvas = Small::blank();
    canvas.overwrite(1, 0, Rgb::new(1, 2, 3)).unwrap();
    let rgb = render_rgb(RenderKind::TrueColor, &canvas);
    assert_eq!(rgb, vec![255, 255, 255, 1, 2, 3, 255, 255, 255, 255, 255, 255]);
}

#[test]
fn test_heatmap_grid() {
    let canvas = Small::blank();
    canvas.try_set(0, 1, Rgb::WHITE, digest_with_leading_ones(19)).unwrap();
    let rgb = render_rgb(RenderKind::Heatmap, &canvas);
    assert_eq!(&rgb[6..9], &[255, 0, 0]);
    assert_eq!(&rgb[0..3], &[0, 0, 0]);
}

#[test]
fn test_memoized_until_mutation() {
    let canvas = Small::blank();
    let cache = RenderCache::new();
    let encoder = RawEncoder::default();

    let first = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    let again = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    assert_eq!(first, again);
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);

    cache.get(RenderKind::Heatmap, &canvas, &encoder).unwrap();
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_fresh(RenderKind::TrueColor, &canvas));
    assert!(cache.is_fresh(RenderKind::Heatmap, &canvas));

    // Rejected writes leave the cache alone.
    assert!(canvas.try_set(0, 0, Rgb::new(0, 0, 0), crate::pixel::Digest::ZERO).unwrap().is_some());
    assert!(cache.is_fresh(RenderKind::TrueColor, &canvas));

    // Any accepted write stales both, whichever cell it touched.
    canvas.try_set(1, 1, Rgb::new(0, 0, 0), digest_with_leading_ones(1)).unwrap();
    assert!(!cache.is_fresh(RenderKind::TrueColor, &canvas));
    assert!(!cache.is_fresh(RenderKind::Heatmap, &canvas));

    let updated = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    assert_ne!(updated, first);
    assert_eq!(&updated[2 + 9..], &[0, 0, 0]);
    assert_eq!(cache.render_count(), 3);
}

#[test]
fn test_overwrite_invalidates() {
    let canvas = Small::blank();
    let cache = RenderCache::new();
    let encoder = RawEncoder::default();
    cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    canvas.overwrite(0, 0, Rgb::new(5, 5, 5)).unwrap();
    let bytes = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    assert_eq!(&bytes[2..5], &[5, 5, 5]);
}

#[test]
fn test_explicit_invalidate() {
    let canvas = Small::blank();
    let cache = RenderCache::new();
    let encoder = RawEncoder::default();
    cache.get(RenderKind::Heatmap, &canvas, &encoder).unwrap();
    cache.invalidate();
    assert!(!cache.is_fresh(RenderKind::Heatmap, &canvas));
    cache.get(RenderKind::Heatmap, &canvas, &encoder).unwrap();
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_readers_racing_writers_see_whole_artifacts() {
    let canvas = Canvas::<8, 8>::blank();
    let cache = RenderCache::new();
    let encoder = RawEncoder::default();

    thread::scope(|s| {
        s.spawn(|| {
            for i in 1..=64u32 {
                let x = (i % 8) as usize;
                let y = (i / 8 % 8) as usize;
                canvas.try_set(x, y, Rgb::new(i as u8, 0, 0), digest_with_leading_ones(i)).unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    let bytes = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
                    assert_eq!(bytes.len(), 2 + 8 * 8 * 3);
                }
            });
        }
    });

    let last = cache.get(RenderKind::TrueColor, &canvas, &encoder).unwrap();
    assert_eq!(&last[2..], render_rgb(RenderKind::TrueColor, &canvas).as_slice());
}
