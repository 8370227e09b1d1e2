use super::*;

const WHITE: Color = Color::WHITE;
const RED: Color = Color::rgb(255, 0, 0);
const INK: Color = Color::rgb(10, 10, 10);

// =============================================================
// Helpers
// =============================================================

fn canvas(w: u32, h: u32, color: Color) -> PixelBuffer {
    PixelBuffer::filled(w, h, color).unwrap()
}

fn at(x: i32, y: i32) -> BufferPoint {
    BufferPoint::new(x, y)
}

/// Square ring of ink with its outer edge at `[x0, x1] x [y0, y1]`.
fn draw_box(buf: &mut PixelBuffer, x0: i64, y0: i64, x1: i64, y1: i64) {
    for x in x0..=x1 {
        buf.set(x, y0, INK);
        buf.set(x, y1, INK);
    }
    for y in y0..=y1 {
        buf.set(x0, y, INK);
        buf.set(x1, y, INK);
    }
}

/// Coordinates of every pixel that differs between two same-sized buffers.
fn changed(before: &PixelBuffer, after: &PixelBuffer) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for y in 0..i64::from(before.height()) {
        for x in 0..i64::from(before.width()) {
            if before.get(x, y) != after.get(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

/// Horizontal gradient: column `x` has gray level `base + x * step`.
fn gradient(w: u32, h: u32, base: u8, step: u8) -> PixelBuffer {
    let mut buf = canvas(w, h, WHITE);
    for y in 0..i64::from(h) {
        for x in 0..i64::from(w) {
            let level = base + u8::try_from(x).unwrap() * step;
            buf.set(x, y, Color::rgb(level, level, level));
        }
    }
    buf
}

// =============================================================
// Documented examples
// =============================================================

#[test]
fn open_canvas_with_single_ink_pixel() {
    let mut buf = canvas(4, 4, WHITE);
    buf.set(2, 2, Color::rgba(0, 0, 0, 255));

    let outcome = flood_fill(&mut buf, at(0, 0), RED, 10);

    assert_eq!(outcome, FillOutcome::Filled { pixels: 15 });
    assert_eq!(buf.get(2, 2), Some(Color::rgba(0, 0, 0, 255)));
    for y in 0..4 {
        for x in 0..4 {
            if (x, y) != (2, 2) {
                assert_eq!(buf.get(x, y), Some(RED), "({x},{y}) not filled");
            }
        }
    }
}

#[test]
fn outline_seed_writes_nothing() {
    let mut buf = canvas(5, 5, Color::rgba(10, 10, 10, 255));
    let before = buf.clone();

    assert_eq!(flood_fill(&mut buf, at(2, 2), RED, 10), FillOutcome::OutlineSeed);
    assert_eq!(buf, before);
}

// =============================================================
// No-op preconditions
// =============================================================

#[test]
fn seed_out_of_bounds_is_noop() {
    let mut buf = canvas(3, 3, WHITE);
    let before = buf.clone();
    assert_eq!(flood_fill(&mut buf, at(3, 0), RED, 10), FillOutcome::OutOfBounds);
    assert_eq!(flood_fill(&mut buf, at(-1, 1), RED, 10), FillOutcome::OutOfBounds);
    assert_eq!(buf, before);
}

#[test]
fn transparent_seed_is_noop() {
    let mut buf = canvas(3, 3, Color::TRANSPARENT);
    let before = buf.clone();
    assert_eq!(flood_fill(&mut buf, at(1, 1), RED, 10), FillOutcome::TransparentSeed);
    assert_eq!(buf, before);
}

#[test]
fn seed_already_fill_color_is_noop() {
    let mut buf = canvas(3, 3, RED);
    assert_eq!(flood_fill(&mut buf, at(0, 0), RED, 10), FillOutcome::AlreadyFilled);
}

#[test]
fn outcome_pixel_counts() {
    assert_eq!(FillOutcome::Filled { pixels: 7 }.pixels(), 7);
    assert!(FillOutcome::Filled { pixels: 7 }.changed());
    assert_eq!(FillOutcome::OutlineSeed.pixels(), 0);
    assert!(!FillOutcome::AlreadyFilled.changed());
}

// =============================================================
// Properties
// =============================================================

#[test]
fn refilling_same_color_is_byte_identical() {
    let mut buf = canvas(8, 8, WHITE);
    draw_box(&mut buf, 2, 2, 6, 6);
    flood_fill(&mut buf, at(4, 4), RED, 10);
    let once = buf.clone();

    flood_fill(&mut buf, at(4, 4), RED, 10);
    assert_eq!(buf.as_bytes(), once.as_bytes());
}

#[test]
fn enclosed_fill_stays_inside_outline() {
    let mut buf = canvas(12, 12, WHITE);
    draw_box(&mut buf, 3, 3, 8, 8);
    let before = buf.clone();

    let outcome = flood_fill(&mut buf, at(5, 5), RED, 10);

    // Interior of a 6x6 ring is 4x4.
    assert_eq!(outcome, FillOutcome::Filled { pixels: 16 });
    for (x, y) in changed(&before, &buf) {
        assert!((4..=7).contains(&x) && (4..=7).contains(&y), "({x},{y}) written outside enclosure");
    }
}

#[test]
fn fill_never_touches_barriers() {
    let mut buf = canvas(10, 10, WHITE);
    buf.set(3, 3, Color::TRANSPARENT);
    buf.set(4, 4, Color::rgba(200, 200, 200, 0));
    buf.set(5, 5, INK);
    buf.set(6, 6, Color::rgba(29, 0, 29, 1));
    let before = buf.clone();

    flood_fill(&mut buf, at(0, 0), RED, 255);

    for (x, y) in [(3, 3), (4, 4), (5, 5), (6, 6)] {
        assert_eq!(buf.get(x, y), before.get(x, y), "barrier ({x},{y}) was written");
    }
}

#[test]
fn wider_tolerance_fills_superset() {
    let base = gradient(20, 3, 100, 2);
    let mut narrow = base.clone();
    let mut wide = base.clone();

    flood_fill(&mut narrow, at(0, 1), RED, 4);
    flood_fill(&mut wide, at(0, 1), RED, 12);

    let narrow_set = changed(&base, &narrow);
    let wide_set = changed(&base, &wide);
    // Columns 0..=2 are within 4 of the seed; columns 0..=6 are within 12.
    assert_eq!(narrow_set.len(), 9);
    assert_eq!(wide_set.len(), 21);
    assert!(narrow_set.iter().all(|p| wide_set.contains(p)));
}

#[test]
fn tolerance_compares_against_seed_not_neighbor() {
    // Each column is 5 lighter than the last; chaining would fill the whole row.
    let mut buf = gradient(10, 1, 150, 5);
    let outcome = flood_fill(&mut buf, at(0, 0), RED, 10);
    assert_eq!(outcome, FillOutcome::Filled { pixels: 3 });
}

#[test]
fn diagonal_gaps_do_not_leak() {
    let mut buf = canvas(3, 3, WHITE);
    buf.set(1, 0, INK);
    buf.set(0, 1, INK);
    let outcome = flood_fill(&mut buf, at(0, 0), RED, 10);
    assert_eq!(outcome, FillOutcome::Filled { pixels: 1 });
}

#[test]
fn fill_alpha_is_forced_opaque() {
    let mut buf = canvas(2, 2, WHITE);
    flood_fill(&mut buf, at(0, 0), Color::rgba(0, 0, 255, 40), 10);
    assert_eq!(buf.get(1, 1), Some(Color::rgb(0, 0, 255)));
}

#[test]
fn translucent_region_becomes_opaque() {
    let mut buf = canvas(2, 1, Color::rgba(250, 250, 250, 128));
    let outcome = flood_fill(&mut buf, at(0, 0), Color::rgb(0, 200, 0), 10);
    assert_eq!(outcome.pixels(), 2);
    assert_eq!(buf.get(1, 0), Some(Color::rgb(0, 200, 0)));
}

#[test]
fn black_fill_color_still_terminates() {
    let mut buf = canvas(6, 6, WHITE);
    let outcome = flood_fill(&mut buf, at(0, 0), Color::BLACK, 10);
    assert_eq!(outcome.pixels(), 36);
}

#[test]
fn large_uniform_region_does_not_overflow() {
    let mut buf = canvas(512, 512, WHITE);
    let outcome = flood_fill(&mut buf, at(256, 256), RED, 10);
    assert_eq!(outcome.pixels(), 512 * 512);
}

#[test]
fn work_list_is_reused_across_fills() {
    let mut filler = FloodFill::new();
    let mut buf = canvas(5, 5, WHITE);
    draw_box(&mut buf, 0, 0, 4, 4);

    assert_eq!(filler.fill(&mut buf, at(2, 2), RED, 10).pixels(), 9);
    assert_eq!(filler.fill(&mut buf, at(2, 2), Color::rgb(0, 0, 255), 10).pixels(), 9);
    assert_eq!(filler.fill(&mut buf, at(0, 0), RED, 10), FillOutcome::OutlineSeed);
}
