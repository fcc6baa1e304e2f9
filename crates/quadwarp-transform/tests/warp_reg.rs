//! Perspective warp regression test
//!
//! Test structure:
//!   1. A 100x100 image shifted by (10, 10) onto a 110x110 canvas
//!   2. Forward mapping is deterministic and leaves holes when magnifying;
//!      inverse mapping covers the destination
//!   3. A blue square on black pulled into a quadrilateral, written as
//!      input/output PNG files

use quadwarp_core::{Pix, PixelDepth, color};
use quadwarp_io::ImageFormat;
use quadwarp_test::{RegParams, coordinate_pattern, square_on_background};
use quadwarp_transform::{
    Point, ProjectiveCoeffs, WarpFill, WarpMethod, WarpOptions, warp_perspective,
    warp_perspective_pta,
};

fn corners(w: f32, h: f32) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ]
}

#[test]
fn warp_reg_translate_onto_canvas() {
    let mut rp = RegParams::new("warp_translate");

    let red = color::compose_rgb(255, 0, 0);
    let pixs = Pix::new_filled(100, 100, PixelDepth::Bit32, red).expect("source");
    let src = corners(99.0, 99.0);
    let dst = src.map(|p| Point::new(p.x + 10.0, p.y + 10.0));

    let pixd = warp_perspective_pta(&pixs, src, dst, (110, 110), &WarpOptions::default())
        .expect("warp_perspective_pta");
    rp.compare_values(110.0, pixd.width() as f64, 0.0);
    rp.compare_values(110.0, pixd.height() as f64, 0.0);
    rp.compare_values(10000.0, pixd.count_value(red) as f64, 0.0);
    rp.compare_values(2100.0, pixd.count_value(0) as f64, 0.0);

    let mut inside_ok = true;
    let mut outside_ok = true;
    for y in 0..110 {
        for x in 0..110 {
            let v = pixd.get_pixel(x, y).unwrap_or(1);
            if (10..110).contains(&x) && (10..110).contains(&y) {
                inside_ok &= v == red;
            } else {
                outside_ok &= v == 0;
            }
        }
    }
    rp.check(inside_ok, "shifted square covers [10, 110)^2");
    rp.check(outside_ok, "band outside the square keeps the background");

    // Inverse mapping agrees for a pure shift
    let pixi = warp_perspective_pta(
        &pixs,
        src,
        dst,
        (110, 110),
        &WarpOptions::with_method(WarpMethod::Inverse),
    )
    .expect("inverse warp");
    rp.compare_pix(&pixd, &pixi);

    rp.write_pix_and_check(&pixd, ImageFormat::Png)
        .expect("write translated");

    assert!(rp.cleanup(), "warp_translate regression test failed");
}

#[test]
fn warp_reg_hundred_square_shift() {
    let mut rp = RegParams::new("warp_shift100");

    let src = corners(100.0, 100.0);
    let dst = src.map(|p| Point::new(p.x + 10.0, p.y + 10.0));
    let h = ProjectiveCoeffs::from_four_points(src, dst).expect("shift by (10, 10)");
    let want = [[1.0, 0.0, 10.0], [0.0, 1.0, 10.0], [0.0, 0.0, 1.0]];
    for (got_row, want_row) in h.to_matrix().iter().zip(&want) {
        for (got, want) in got_row.iter().zip(want_row) {
            rp.compare_values(*want, *got, 1e-9);
        }
    }

    let green = color::compose_rgb(0, 200, 0);
    let pixs = Pix::new_filled(100, 100, PixelDepth::Bit32, green).expect("source");
    let pixd = warp_perspective(&pixs, &h, (110, 110), &WarpOptions::default()).expect("warp");
    rp.compare_values(110.0, pixd.width() as f64, 0.0);
    rp.compare_values(110.0, pixd.height() as f64, 0.0);

    let mut mismatches = 0;
    for y in 0..110 {
        for x in 0..110 {
            let inside = (10..110).contains(&x) && (10..110).contains(&y);
            let want = if inside { green } else { 0 };
            if pixd.get_pixel(x, y) != Some(want) {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);

    rp.write_pix_and_check(&pixd, ImageFormat::Png)
        .expect("write shifted");

    assert!(rp.cleanup(), "warp_shift100 regression test failed");
}

#[test]
fn warp_reg_forward_vs_inverse() {
    let mut rp = RegParams::new("warp_methods");

    let pixs = coordinate_pattern(50, 50).expect("pattern");
    let fill = WarpFill::Color(0xffff_ffff);
    let src = corners(49.0, 49.0);
    let dst = corners(98.0, 98.0);
    let h = ProjectiveCoeffs::from_four_points(src, dst).expect("2x scale");

    let fwd_opts = WarpOptions::with_fill(fill);
    let fwd1 = warp_perspective(&pixs, &h, (100, 100), &fwd_opts).expect("forward 1");
    let fwd2 = warp_perspective(&pixs, &h, (100, 100), &fwd_opts).expect("forward 2");
    rp.compare_pix(&fwd1, &fwd2);

    // Each of the 2500 source pixels lands on its own even location
    rp.compare_values(7500.0, fwd1.count_value(0xffff_ffff) as f64, 0.0);
    rp.compare_values(((49 << 16) | 49) as f64, fwd1.get_pixel(98, 98).unwrap_or(0) as f64, 0.0);

    let inv_opts = fwd_opts.method(WarpMethod::Inverse);
    let inv = warp_perspective(&pixs, &h, (100, 100), &inv_opts).expect("inverse");
    let mut covered = true;
    for y in 0..99 {
        for x in 0..99 {
            covered &= inv.get_pixel(x, y) != Some(0xffff_ffff);
        }
    }
    rp.check(covered, "inverse mapping leaves no holes");
    rp.check(
        inv.count_value(0xffff_ffff) <= 199,
        "inverse background limited to last row and column",
    );

    // Every even location agrees between the two methods
    let mut agree = true;
    for y in (0..99).step_by(2) {
        for x in (0..99).step_by(2) {
            agree &= fwd1.get_pixel(x, y) == inv.get_pixel(x, y);
        }
    }
    rp.check(agree, "forward and inverse agree on landed pixels");

    assert!(rp.cleanup(), "warp_methods regression test failed");
}

#[test]
fn warp_reg_square_to_quad() {
    let mut rp = RegParams::new("warp_quad");

    let black = color::compose_rgb(0, 0, 0);
    let blue = color::compose_rgb(0, 0, 255);
    let pixs = square_on_background(200, 200, PixelDepth::Bit32, black, blue, (50, 50), 100)
        .expect("input");
    rp.write_pix_and_check(&pixs, ImageFormat::Png)
        .expect("write input");

    let src = [
        Point::new(50.0, 50.0),
        Point::new(150.0, 50.0),
        Point::new(50.0, 150.0),
        Point::new(150.0, 150.0),
    ];
    let dst = [
        Point::new(20.0, 30.0),
        Point::new(130.0, 30.0),
        Point::new(30.0, 170.0),
        Point::new(170.0, 170.0),
    ];
    let opts = WarpOptions::with_fill(WarpFill::Color(black));
    let pixd = warp_perspective_pta(&pixs, src, dst, (200, 200), &opts).expect("warp");
    rp.write_pix_and_check(&pixd, ImageFormat::Png)
        .expect("write output");

    // Control points carry their pixel across
    let h = ProjectiveCoeffs::from_four_points(src, dst).expect("coeffs");
    for (s, d) in src.iter().zip(&dst) {
        let mapped = h.transform_point_sampled(s.x as i32, s.y as i32);
        rp.check(
            mapped == Some((d.x as i32, d.y as i32)),
            "control point maps onto its destination",
        );
    }
    rp.compare_values(blue as f64, pixd.get_pixel(20, 30).unwrap_or(0) as f64, 0.0);
    rp.compare_values(blue as f64, pixd.get_pixel(100, 100).unwrap_or(0) as f64, 0.0);
    rp.compare_values(black as f64, pixd.get_pixel(5, 5).unwrap_or(1) as f64, 0.0);
    rp.compare_values(black as f64, pixd.get_pixel(199, 5).unwrap_or(1) as f64, 0.0);

    assert!(rp.cleanup(), "warp_quad regression test failed");
}
