//! Affine transform regression test
//!
//! Random and fixed affine transforms of synthetic pages: identity,
//! invertibility of rotation on a linear ramp, translation and range.

use ocrodeg_core::FPix;
use ocrodeg_test::{RegParams, make_ramp, make_text_page, seeded_rng};
use ocrodeg_transform::{
    InterpolationOrder, TransformParams, TransformRanges, apply_affine, sample_transform,
    transform_image,
};

#[test]
fn affine_reg() {
    let mut rp = RegParams::new("affine");
    let page = make_text_page(90, 60);

    // --- Test 1: Identity parameters leave the page unchanged ---
    let same = apply_affine(&page, &TransformParams::identity(), InterpolationOrder::Linear)
        .expect("identity");
    rp.compare_fpix(&page, &same, 0.0);

    // --- Test 2: Random transforms keep shape and range ---
    let mut rng = seeded_rng(2024);
    let ranges = TransformRanges::default();
    for i in 0..5 {
        let params = sample_transform(&ranges, &mut rng).expect("sample_transform");
        let out = apply_affine(&page, &params, InterpolationOrder::Linear)
            .unwrap_or_else(|e| panic!("apply_affine {}: {}", i, e));
        rp.compare_values(90.0, out.width() as f64, 0.0);
        rp.compare_values(60.0, out.height() as f64, 0.0);
        rp.compare_range(0.0, 1.0, out.min_value() as f64);
        rp.compare_range(0.0, 1.0, out.max_value() as f64);
        eprintln!(
            "  params {}: angle={:.4} scale={:.4} aniso={:.4} t=({:.4}, {:.4})",
            i, params.angle, params.scale, params.aniso, params.translation.0, params.translation.1
        );
        rp.write_fpix(&out).expect("write transformed");
    }

    // --- Test 3: Rotation is undone by the opposite rotation ---
    // Bilinear interpolation reproduces a linear ramp exactly, so the
    // center of the round trip matches away from the clamped corners.
    let ramp = make_ramp(61, 61);
    let there = transform_image(&ramp, 0.1, 1.0, 1.0, (0.0, 0.0), InterpolationOrder::Linear)
        .expect("rotate");
    let back = transform_image(&there, -0.1, 1.0, 1.0, (0.0, 0.0), InterpolationOrder::Linear)
        .expect("rotate back");
    rp.compare_fpix(&crop(&ramp, 20, 20, 21), &crop(&back, 20, 20, 21), 1e-4);

    // --- Test 4: Column translation by a tenth of the width ---
    let ramp = make_ramp(50, 10);
    let shifted = transform_image(&ramp, 0.0, 1.0, 1.0, (0.0, 0.1), InterpolationOrder::Linear)
        .expect("translate");
    rp.compare_values(15.0 / 49.0, shifted.get_pixel(10, 4).unwrap() as f64, 1e-6);
    // Past the right edge the last column is repeated
    rp.compare_values(1.0, shifted.get_pixel(47, 4).unwrap() as f64, 1e-6);

    assert!(rp.cleanup(), "affine regression test failed");
}

fn crop(fpix: &FPix, x0: u32, y0: u32, size: u32) -> FPix {
    FPix::from_fn(size, size, |x, y| fpix.get_pixel_unchecked(x0 + x, y0 + y)).expect("crop")
}
