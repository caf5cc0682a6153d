//! Elastic distortion regression test
//!
//! Field bounds, smoothness against sigma, line noise and distortion of a
//! synthetic page.

use ocrodeg_core::DisplacementField;
use ocrodeg_test::{RegParams, make_text_page, roughness, seeded_rng};
use ocrodeg_transform::{
    InterpolationOrder, bounded_noise_field, distort_with_field, line_noise_field,
};

#[test]
fn elastic_reg() {
    let mut rp = RegParams::new("elastic");
    let mut rng = seeded_rng(77);
    let page = make_text_page(80, 64);

    // --- Test 1: Unsmoothed field stays within the bound ---
    let field = bounded_noise_field(80, 64, 0.0, 5.0, &mut rng).expect("sigma 0 field");
    rp.compare_range(0.0, 5.0 + 1e-5, field.max_abs() as f64);
    rp.compare_values(5.0, field.max_abs() as f64, 1e-5);

    // --- Test 2: Larger sigma gives a smoother field ---
    let mut last = f64::INFINITY;
    for &sigma in &[1.0f32, 3.0, 10.0] {
        let field = bounded_noise_field(80, 64, sigma, 1.0, &mut rng).expect("field");
        let r = roughness(field.rows());
        rp.compare_values(1.0, if r < last { 1.0 } else { 0.0 }, 0.0);
        eprintln!("  sigma={}: roughness={:.5}", sigma, r);
        last = r;
    }

    // --- Test 3: Zero field is the identity ---
    let zero = DisplacementField::zeros(80, 64).expect("zeros");
    for order in [
        InterpolationOrder::Nearest,
        InterpolationOrder::Linear,
    ] {
        let out = distort_with_field(&page, &zero, order).expect("zero distortion");
        rp.compare_fpix(&page, &out, 0.0);
    }

    // --- Test 4: Distortion keeps shape and range ---
    let field = bounded_noise_field(80, 64, 5.0, 2.0, &mut rng).expect("field");
    let out = distort_with_field(&page, &field, InterpolationOrder::Linear).expect("distort");
    rp.compare_values(80.0, out.width() as f64, 0.0);
    rp.compare_values(64.0, out.height() as f64, 0.0);
    rp.compare_range(0.0, 1.0, out.min_value() as f64);
    rp.compare_range(0.0, 1.0, out.max_value() as f64);
    rp.write_fpix(&out).expect("write distorted");

    // --- Test 5: Line noise moves columns vertically ---
    let field = line_noise_field(80, 64, 10.0, 3.0, &mut rng).expect("line field");
    rp.compare_values(3.0, field.max_abs() as f64, 1e-5);
    rp.compare_values(0.0, field.cols().max_value() as f64, 0.0);
    let out = distort_with_field(&page, &field, InterpolationOrder::Linear).expect("distort");
    rp.write_fpix(&out).expect("write line distorted");

    // --- Test 6: Mismatched field shape is rejected ---
    let small = DisplacementField::zeros(10, 10).expect("zeros");
    let err = distort_with_field(&page, &small, InterpolationOrder::Linear);
    rp.compare_values(1.0, if err.is_err() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "elastic regression test failed");
}
