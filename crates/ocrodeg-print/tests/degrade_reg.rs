//! Degrade pipeline regression test
//!
//! Output shapes and ranges under the default configuration, a zero-strength
//! configuration that leaves the page untouched, configuration updates and
//! sample field handling.

use ocrodeg_core::FPix;
use ocrodeg_print::{
    DEFAULT_EXTENSIONS, Degrade, DegradeConfig, DegradeParam, FIELD_BLURRED, FIELD_DISTORTED,
    FIELD_PRINTLIKE_FIBROUS, FIELD_PRINTLIKE_MULTISCALE, PrintError, Sample,
};
use ocrodeg_test::{RegParams, init_tracing, make_text_page, seeded_rng};

#[test]
fn degrade_reg() {
    init_tracing();
    let mut rp = RegParams::new("degrade");
    let mut rng = seeded_rng(101);
    let page = make_text_page(120, 90);

    // --- Test 1: Default pipeline ---
    let degrade = Degrade::default();
    let out = degrade.degrade(&page, &mut rng).expect("degrade");
    for img in [
        &out.distorted,
        &out.blurred,
        &out.printlike_multiscale,
        &out.printlike_fibrous,
    ] {
        rp.compare_values(120.0, img.width() as f64, 0.0);
        rp.compare_values(90.0, img.height() as f64, 0.0);
        rp.write_fpix(img).expect("write output");
    }
    // Distortion and blur keep values inside the page's range
    rp.compare_range(-1e-5, 1.0 + 1e-5, out.distorted.min_value() as f64);
    rp.compare_range(-1e-5, 1.0 + 1e-5, out.blurred.max_value() as f64);
    // Print outputs are shifted so the darkest pixel is 0
    rp.compare_values(0.0, out.printlike_multiscale.min_value() as f64, 0.0);
    rp.compare_values(0.0, out.printlike_fibrous.min_value() as f64, 0.0);
    rp.compare_range(0.0, 1.0, out.printlike_multiscale.max_value() as f64);
    rp.compare_range(0.0, 1.0, out.printlike_fibrous.max_value() as f64);

    // --- Test 2: Zero distortion and blur leave the page unchanged ---
    let config = DegradeConfig::new()
        .with_blur(0.0, 0.0)
        .with_distort(0.0, 0.0)
        .with_distort_sigma(1.0, 1.0);
    let still = Degrade::new(config).expect("zero config");
    let out = still.degrade(&page, &mut rng).expect("zero degrade");
    rp.compare_fpix(&page, &out.distorted, 1e-5);
    rp.compare_fpix(&page, &out.blurred, 1e-5);

    // --- Test 3: Configuration updates are validated ---
    let mut config = DegradeConfig::default();
    let accepted = config.set(DegradeParam::Blur1, 2.0);
    rp.compare_values(1.0, if accepted.is_ok() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(2.0, config.get(DegradeParam::Blur1) as f64, 0.0);
    let rejected = config.set(DegradeParam::Blur0, 2.5);
    rp.compare_values(1.0, if rejected.is_err() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.5, config.blur.0 as f64, 0.0);
    let bad = Degrade::new(DegradeConfig::new().with_distort(5.0, 1.0));
    rp.compare_values(1.0, if bad.is_err() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: Samples gain the degraded fields and keep the originals ---
    let binary = page.map(|v| if v < 0.5 { 0.0 } else { 1.0 });
    let sample = Sample::new("page-0001")
        .with_field("bin.png", binary)
        .with_field("page.png", page.clone());
    let result = degrade
        .degrade_sample(&sample, &DEFAULT_EXTENSIONS, &mut rng)
        .expect("degrade_sample");
    rp.compare_values(6.0, result.fields.len() as f64, 0.0);
    for name in [
        FIELD_DISTORTED,
        FIELD_BLURRED,
        FIELD_PRINTLIKE_MULTISCALE,
        FIELD_PRINTLIKE_FIBROUS,
    ] {
        let present = result.get(name).is_some_and(|img| img.dimensions() == (120, 90));
        rp.compare_values(1.0, if present { 1.0 } else { 0.0 }, 0.0);
    }
    rp.compare_fpix(&page, result.get("page.png").expect("original kept"), 0.0);

    // --- Test 5: Missing page field is reported ---
    let empty = Sample::new("page-0002").with_field("gt.txt", FPix::new(4, 4).expect("fpix"));
    let missing = degrade.degrade_sample(&empty, &DEFAULT_EXTENSIONS, &mut rng);
    let is_missing = matches!(missing, Err(PrintError::MissingField { .. }));
    rp.compare_values(1.0, if is_missing { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "degrade regression test failed");
}
