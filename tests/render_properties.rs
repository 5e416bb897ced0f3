use approx::assert_abs_diff_eq;
use gaborgrid::core::gabor::{normalize_peak, raw_signal, render};
use gaborgrid::core::stimulus::{Carrier, StimulusParams};

fn reference() -> StimulusParams {
    StimulusParams::new(128)
        .with_cycles(6.0)
        .with_orientation(0.0)
        .with_phase(0.0)
        .with_sigma_ratio(0.22)
        .with_gamma(1.0)
        .with_contrast(0.9)
        .with_background(127)
        .with_carrier(Carrier::Cos)
        .with_normalize(true)
}

#[test]
fn render_is_deterministic() {
    let p = reference().with_orientation(37.5).with_phase(120.0).with_gamma(1.4);
    assert_eq!(render(&p), render(&p));
}

#[test]
fn reference_center_pixel_matches_peak_luma() {
    let img = render(&reference());
    assert_eq!(img.size, 128);
    assert_eq!(img.pixels.len(), 128 * 128);
    let expected = 127 + (127.0f64 * 0.9).round() as i32;
    let center = img.get(63, 63) as i32;
    assert!((center - expected).abs() <= 1, "center {center} vs {expected}");
}

#[test]
fn mirror_symmetric_at_zero_orientation_and_phase() {
    for size in [64u32, 65, 128] {
        let p = reference().with_cycles(4.5);
        let p = StimulusParams { size, ..p };
        let img = render(&p);
        let last = size - 1;
        for y in 0..size {
            for x in 0..size {
                let v = img.get(x, y) as i32;
                let h = img.get(last - x, y) as i32;
                let vv = img.get(x, last - y) as i32;
                assert!((v - h).abs() <= 1, "horizontal mirror at ({x},{y}) size {size}");
                assert!((v - vv).abs() <= 1, "vertical mirror at ({x},{y}) size {size}");
            }
        }
    }
}

#[test]
fn normalized_signal_has_unit_peak() {
    let p = reference().with_orientation(30.0).with_phase(45.0).with_gamma(1.3);
    let raw = raw_signal(&p);

    // Recompute the peak independently of normalize_peak.
    let mut peak = 0.0f64;
    for v in &raw {
        if v.abs() > peak {
            peak = v.abs();
        }
    }
    assert!(peak > 1e-8);

    let mut normalized = raw.clone();
    let reported = normalize_peak(&mut normalized);
    assert_abs_diff_eq!(reported, peak, epsilon = 1e-15);

    let max_abs = normalized.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert_abs_diff_eq!(max_abs, 1.0, epsilon = 1e-12);
    for (n, r) in normalized.iter().zip(&raw) {
        assert_abs_diff_eq!(*n, r / peak, epsilon = 1e-12);
    }
}

#[test]
fn extreme_parameters_render_full_grids() {
    let extremes = [
        reference().with_contrast(1.0).with_background(255),
        reference().with_contrast(1.0).with_background(0),
        reference().with_normalize(false).with_cycles(32.0).with_sigma_ratio(0.9),
        reference().with_gamma(3.0).with_carrier(Carrier::Sin).with_phase(359.9),
        StimulusParams::new(1),
        StimulusParams::new(2).with_sigma_ratio(0.02),
    ];
    for p in extremes {
        let img = render(&p);
        assert_eq!(img.pixels.len(), (p.size * p.size) as usize);
        assert_eq!(render(&p), img);
    }
}

#[test]
fn contrast_increases_deviation_from_background() {
    let mut last = -1i32;
    for step in 1..=10 {
        let contrast = step as f64 / 10.0;
        let img = render(&reference().with_contrast(contrast));
        let dev = img
            .pixels
            .iter()
            .map(|&v| (v as i32 - 127).abs())
            .max()
            .unwrap();
        assert!(dev > last, "contrast {contrast}: {dev} <= {last}");
        last = dev;
    }
}

#[test]
fn unnormalized_signal_keeps_raw_amplitude() {
    // Sine carrier at phase 0 vanishes on x' = 0, so the raw peak is below 1.
    let p = reference()
        .with_carrier(Carrier::Sin)
        .with_sigma_ratio(0.05)
        .with_normalize(false);
    let raw_peak = raw_signal(&p).iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(raw_peak < 1.0);

    let normalized = render(&p.with_normalize(true));
    let raw = render(&p);
    let spread = |img: &gaborgrid::core::LumaImage| {
        img.pixels.iter().map(|&v| (v as i32 - 127).abs()).max().unwrap()
    };
    assert!(spread(&normalized) > spread(&raw));
}

#[test]
fn orientation_rotates_the_carrier() {
    // A 90 degree turn transposes the patch when gamma = 1 and the grid is centred.
    let p = reference().with_cycles(5.0);
    let a = render(&p);
    let b = render(&p.with_orientation(90.0));
    let mut max_diff = 0;
    for y in 0..128 {
        for x in 0..128 {
            max_diff = max_diff.max((a.get(x, y) as i32 - b.get(y, x) as i32).abs());
        }
    }
    assert!(max_diff <= 1, "transpose mismatch {max_diff}");
}
