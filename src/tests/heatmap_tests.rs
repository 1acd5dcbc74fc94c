use super::digest_with_leading_ones;
use crate::heatmap::{band, band_index, heat_color, heat_value};
use crate::pixel::{Digest, Rgb};

#[test]
fn test_leading_ones() {
    assert_eq!(Digest::ZERO.leading_ones(), 0);
    assert_eq!(Digest::MAX.leading_ones(), 256);
    for n in [1u32, 7, 8, 9, 23, 64, 255] {
        assert_eq!(digest_with_leading_ones(n).leading_ones(), n);
    }
    // Bits after the first zero do not count.
    let mut bytes = [0u8; 32];
    bytes[0] = 0b1101_1111;
    bytes[1] = 0xff;
    assert_eq!(Digest(bytes).leading_ones(), 2);
}

#[test]
fn test_band_boundaries() {
    let cases = [
        (0, Rgb::new(0, 0, 0)),
        (1, Rgb::new(17, 0, 0)),
        (15, Rgb::new(255, 0, 0)),
        (16, Rgb::new(255, 17, 0)),
        (30, Rgb::new(255, 255, 0)),
        (31, Rgb::new(255, 255, 17)),
        (45, Rgb::new(255, 255, 255)),
        (46, Rgb::new(0, 0, 255)),
        (50, Rgb::new(0, 0, 255)),
        (60, Rgb::new(0, 0, 255)),
        (61, Rgb::new(255, 0, 255)),
        (252, Rgb::new(255, 0, 255)),
    ];
    for (v, expected) in cases {
        assert_eq!(band(v), expected, "v = {}", v);
    }
}

#[test]
fn test_offset_clamps_at_zero() {
    for ones in 0..=4 {
        assert_eq!(heat_color(&digest_with_leading_ones(ones)), Rgb::new(0, 0, 0));
    }
    assert_eq!(heat_color(&digest_with_leading_ones(19)), Rgb::new(255, 0, 0));
    assert_eq!(heat_color(&Digest::MAX), Rgb::new(255, 0, 255));
}

#[test]
fn test_same_leading_ones_same_color() {
    for ones in [4u32, 19, 20, 34, 35, 49, 50, 64, 65] {
        let a = digest_with_leading_ones(ones);
        let mut b = a;
        // Flip a bit well after the terminating zero.
        b.0[31] ^= 0x01;
        if ones < 255 {
            assert_eq!(b.leading_ones(), ones);
        }
        assert_eq!(heat_color(&a), heat_color(&b));
    }
}

#[test]
fn test_band_index_matches_band() {
    let expected = [(0, 0), (15, 0), (16, 1), (30, 1), (31, 2), (45, 2), (46, 3), (60, 3), (61, 4), (252, 4)];
    for (v, index) in expected {
        assert_eq!(band_index(v), index, "v = {}", v);
    }
    assert_eq!(heat_value(&digest_with_leading_ones(2)), 0);
    assert_eq!(heat_value(&digest_with_leading_ones(50)), 46);
}
