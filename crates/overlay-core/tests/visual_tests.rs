// Tests for the pure visual derivation functions and the layer compositor.

use glam::Vec2;
use overlay_core::{
    bilinear_hsl, blend_mode_for, build_layers, compose, compose_particles, compose_static,
    layer_color, opacity_factor, BlendMode, Hsl, BLEND_DODGE_THRESHOLD, BLEND_SCREEN_THRESHOLD,
    LAYER_COUNT, LAYER_OFFSETS, LAYER_PALETTES, LAYER_SPEEDS, PARTICLE_COUNT,
};

fn assert_hsl_eq(a: Hsl, b: Hsl) {
    assert!(
        (a.h - b.h).abs() < 1e-4 && (a.s - b.s).abs() < 1e-4 && (a.l - b.l).abs() < 1e-4,
        "{a:?} != {b:?}"
    );
}

#[test]
fn bilinear_returns_corner_colors_at_corners() {
    let palette = &LAYER_PALETTES[0];
    assert_hsl_eq(bilinear_hsl(palette, 0.0, 0.0), palette[0]); // top-left
    assert_hsl_eq(bilinear_hsl(palette, 1.0, 0.0), palette[1]); // top-right
    assert_hsl_eq(bilinear_hsl(palette, 0.0, 1.0), palette[2]); // bottom-left
    assert_hsl_eq(bilinear_hsl(palette, 1.0, 1.0), palette[3]); // bottom-right
}

#[test]
fn bilinear_center_is_average_of_corners() {
    let palette = &LAYER_PALETTES[1];
    let center = bilinear_hsl(palette, 0.5, 0.5);
    let expected_h = (palette[0].h + palette[1].h + palette[2].h + palette[3].h) / 4.0;
    assert!(
        (center.h - expected_h).abs() < 1e-3,
        "center hue {} != mean {}",
        center.h,
        expected_h
    );
}

#[test]
fn bilinear_is_continuous_along_an_edge() {
    // Sweeping tx along the top edge must move hue monotonically between
    // the two corner hues for these palettes.
    let palette = &LAYER_PALETTES[0];
    let mut prev = bilinear_hsl(palette, 0.0, 0.0).h;
    for i in 1..=10 {
        let h = bilinear_hsl(palette, i as f32 / 10.0, 0.0).h;
        assert!(h >= prev, "hue not monotonic along top edge at step {i}");
        prev = h;
    }
}

#[test]
fn layer_color_clamps_out_of_range_positions() {
    // Parallax offsets can push a layer past [0, 100]; the color lookup
    // clamps instead of extrapolating.
    let inside = layer_color(0, Vec2::new(100.0, 0.0));
    let outside = layer_color(0, Vec2::new(140.0, -20.0));
    assert_hsl_eq(inside, outside);
}

#[test]
fn blend_mode_threshold_table() {
    assert_eq!(blend_mode_for(0.0), BlendMode::Normal);
    assert_eq!(
        blend_mode_for(BLEND_SCREEN_THRESHOLD - 0.01),
        BlendMode::Normal
    );
    assert_eq!(blend_mode_for(BLEND_SCREEN_THRESHOLD), BlendMode::Screen);
    assert_eq!(
        blend_mode_for(BLEND_DODGE_THRESHOLD - 0.01),
        BlendMode::Screen
    );
    assert_eq!(blend_mode_for(BLEND_DODGE_THRESHOLD), BlendMode::ColorDodge);
    assert_eq!(blend_mode_for(1000.0), BlendMode::ColorDodge);
}

#[test]
fn opacity_scales_with_velocity_up_to_double() {
    let resting = opacity_factor(false, 0.0, false);
    let moving = opacity_factor(false, 50.0, false);
    assert!(moving > resting);
    // The velocity multiplier caps at 2x.
    let capped = opacity_factor(false, 10_000.0, false);
    assert!(
        (capped - resting * 2.0).abs() < 1e-4 || capped == 1.0,
        "velocity multiplier must cap at 2x (got {capped})"
    );
}

#[test]
fn opacity_hovering_exceeds_resting() {
    assert!(opacity_factor(true, 0.0, false) > opacity_factor(false, 0.0, false));
}

#[test]
fn high_contrast_boosts_opacity_but_never_past_one() {
    let normal = opacity_factor(false, 0.0, false);
    let boosted = opacity_factor(false, 0.0, true);
    assert!((boosted - normal * 1.5).abs() < 1e-4);
    for magnitude in [0.0, 25.0, 100.0, 500.0] {
        for hovering in [false, true] {
            let o = opacity_factor(hovering, magnitude, true);
            assert!(o <= 1.0, "opacity {o} escaped [0,1]");
        }
    }
}

#[test]
fn layers_scale_with_viewport_and_keep_speed_order() {
    let layers = build_layers(1920.0, 1080.0);
    assert_eq!(layers.len(), LAYER_COUNT);
    for (i, layer) in layers.iter().enumerate() {
        assert_eq!(layer.speed_multiplier, LAYER_SPEEDS[i]);
        assert!(layer.size_px <= 1080.0, "layer sizes derive from min dimension");
    }
    // Far layers render larger, near layers smaller.
    assert!(layers[0].size_px > layers[1].size_px);
    assert!(layers[1].size_px > layers[2].size_px);
}

#[test]
fn compose_applies_parallax_without_reclamping() {
    let layers = build_layers(1000.0, 1000.0);
    let current = Vec2::new(100.0, 100.0);
    let frame = compose(current, &layers, 0.0, false, false);
    for (i, primitive) in frame.iter().enumerate() {
        let expected = current * LAYER_SPEEDS[i] + Vec2::new(LAYER_OFFSETS[i][0], LAYER_OFFSETS[i][1]);
        assert_eq!(primitive.position, expected, "layer {i} parallax mismatch");
    }
    // Edge bleed: the near layer legitimately exceeds the 0-100 box.
    assert!(frame[2].position.x > 100.0);
}

#[test]
fn compose_orders_primitives_far_to_near() {
    let layers = build_layers(1000.0, 1000.0);
    let frame = compose(Vec2::splat(50.0), &layers, 0.0, false, false);
    for (i, primitive) in frame.iter().enumerate() {
        assert_eq!(primitive.layer, i);
    }
}

#[test]
fn static_presentation_is_centered_and_normal_blended() {
    let layers = build_layers(1000.0, 1000.0);
    let frame = compose_static(&layers, false);
    assert_eq!(frame.len(), LAYER_COUNT);
    for (i, primitive) in frame.iter().enumerate() {
        assert_eq!(primitive.blend, BlendMode::Normal);
        let expected = Vec2::splat(50.0) + Vec2::new(LAYER_OFFSETS[i][0], LAYER_OFFSETS[i][1]);
        assert_eq!(primitive.position, expected);
    }
    // Stability: composing again yields the identical frame.
    let again = compose_static(&layers, false);
    for (a, b) in frame.iter().zip(again.iter()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.opacity, b.opacity);
    }
}

#[test]
fn particle_scatter_is_seeded_and_bounded() {
    let a = compose_particles(7);
    let b = compose_particles(7);
    let c = compose_particles(8);
    assert_eq!(a.len(), PARTICLE_COUNT);
    for (pa, pb) in a.iter().zip(b.iter()) {
        assert_eq!(pa.position, pb.position, "same seed must reproduce the scatter");
    }
    assert!(
        a.iter()
            .zip(c.iter())
            .any(|(pa, pc)| pa.position != pc.position),
        "different seeds should differ"
    );
    for p in a.iter() {
        assert!(
            (0.0..=100.0).contains(&p.position.x) && (0.0..=100.0).contains(&p.position.y),
            "particles stay in the normalized box"
        );
    }
}
