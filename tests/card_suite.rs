use std::f64::consts::{PI, TAU};
use std::path::Path;

use nps_card_renderer::geometry::{START_ANGLE, card_segments};
use nps_card_renderer::overlay::card_labels;
use nps_card_renderer::{CardLayout, compose_scene, load_portfolio, render_card_svg, validate};

fn fixture(name: &str) -> nps_card_renderer::PortfolioSnapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_portfolio(&path).expect("fixture load failed")
}

#[test]
fn standard_card_geometry_and_text() {
    let portfolio = fixture("portfolio.json");
    assert!(validate(&portfolio).is_valid());
    let layout = CardLayout::new(400, 300).unwrap();

    let segments = card_segments(&portfolio.categories, &layout);
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].start_angle, START_ANGLE);
    assert!((segments[1].start_angle - (-PI / 2.0 + 0.6 * TAU)).abs() < 1e-9);
    assert!((segments[2].start_angle - (-PI / 2.0 + 0.9 * TAU)).abs() < 1e-9);
    let total: f64 = segments.iter().map(|s| s.sweep).sum();
    assert!((total - TAU).abs() < 1e-9);

    let labels = card_labels(&portfolio, &layout);
    assert_eq!(labels[2].text, "XIRR : 9.5% in last 2 years");
    let legend_y: Vec<i32> = labels[3..].iter().map(|l| l.y).collect();
    let base = (300.0 * 0.567) as i32;
    assert_eq!(legend_y, [base + 12, base + 25 + 12, base + 50 + 12]);
}

#[test]
fn index_alignment_across_chart_legend_and_labels() {
    let portfolio = fixture("portfolio.json");
    let layout = CardLayout::default();
    let scene = compose_scene(&portfolio, &layout);
    let labels = card_labels(&portfolio, &layout);

    let segments: Vec<_> = scene.segments().collect();
    let swatches: Vec<_> = scene.swatches().collect();
    assert_eq!(segments.len(), portfolio.categories.len());
    assert_eq!(swatches.len(), portfolio.categories.len());
    for (idx, category) in portfolio.categories.iter().enumerate() {
        assert_eq!(segments[idx].fill, category.fill_color);
        assert_eq!(swatches[idx].fill, category.fill_color);
        assert!(labels[3 + idx].text.starts_with(&category.label));
        assert!(labels[3 + idx].y as f64 > swatches[idx].y);
    }
}

#[test]
fn overfull_allocation_wraps_without_error() {
    let portfolio = fixture("overfull.json");
    let report = validate(&portfolio);
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);

    let layout = CardLayout::default();
    let segments = card_segments(&portfolio.categories, &layout);
    let total: f64 = segments.iter().map(|s| s.sweep).sum();
    assert!((total - 2.8 * PI).abs() < 1e-9);
    assert!(segments.iter().all(|s| s.large_arc));

    let svg = render_card_svg(&portfolio, &layout);
    assert_eq!(svg.matches("<path ").count(), 2);
    assert_eq!(card_labels(&portfolio, &layout)[2].text, "XIRR : 11.3% in last 5 years");
}

#[test]
fn full_and_empty_allocations_keep_their_slots() {
    let portfolio = fixture("single.json");
    let layout = CardLayout::default();
    let segments = card_segments(&portfolio.categories, &layout);
    assert_eq!(segments.len(), 2);
    assert!(segments[0].large_arc);
    assert_eq!(segments[1].sweep, 0.0);
    assert_eq!(segments[1].start_angle, segments[0].end_angle);

    let scene = compose_scene(&portfolio, &layout);
    assert_eq!(scene.segments().count(), 2);
    assert_eq!(scene.swatches().count(), 2);
    let labels = card_labels(&portfolio, &layout);
    assert_eq!(labels[4].text, "Gold : 0%");
}

#[test]
fn scene_svg_is_deterministic() {
    let portfolio = fixture("portfolio.json");
    let layout = CardLayout::new(600, 450).unwrap();
    assert_eq!(render_card_svg(&portfolio, &layout), render_card_svg(&portfolio, &layout));
}

#[cfg(feature = "png")]
#[test]
fn rasterized_fixture_has_expected_colors() {
    use nps_card_renderer::rasterize;

    let portfolio = fixture("portfolio.json");
    let layout = CardLayout::default();
    let card = rasterize(&compose_scene(&portfolio, &layout)).unwrap();
    let near = |x: u32, y: u32, expected: [u8; 4]| {
        let px = card.pixel(x, y).unwrap();
        px.iter()
            .zip(expected.iter())
            .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 2)
    };
    assert!(near(150, 201, [0x42, 0x85, 0xF4, 255]));
    assert!(near(50, 201, [0x34, 0xA8, 0x53, 255]));
    assert!(near(100, 201, [255, 255, 255, 255]));
}
