//! Integration tests for the Tofts and extended Tofts models
//!
//! Tests cover:
//! - Degenerate parameters (Ktrans <= 0, ve <= 0)
//! - Output length for every path
//! - Arterial delay
//! - Extended model with vp = 0
//! - Invalid input handling

use approx::assert_relative_eq;
use tracersol::data::resampled_grid;
use tracersol::numerics::{convolve_full, Interp1d, InterpolationKind};
use tracersol::prelude::simulator::shift_arterial;
use tracersol::prelude::*;
use tracersol::simulator::engine::impulse_response;

// ============================================================================
// Test inputs
// ============================================================================

fn uniform_times(n: usize, dt: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * dt).collect()
}

/// Irregular protocol: dense sampling around the bolus, sparse afterwards
fn irregular_times() -> Vec<f64> {
    let mut times: Vec<f64> = (0..60).map(|i| i as f64 * 2.0).collect();
    times.extend((0..30).map(|i| 120.0 + i as f64 * 5.0));
    times.extend((0..10).map(|i| 270.0 + i as f64 * 10.0));
    times
}

/// Bi-exponential arterial curve with a short rise, peak around 6 mM
fn arterial_curve(times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| {
            if t < 10.0 {
                0.0
            } else {
                let s = t - 10.0;
                (1.0 - (-s / 4.0).exp()) * (4.0 * (-s / 30.0).exp() + 2.0 * (-s / 400.0).exp())
            }
        })
        .collect()
}

fn all_options() -> Vec<SimulationOptions> {
    let mut options = Vec::new();
    for delay in [0.0, 12.5, 30.0] {
        for method in [
            DiscretizationMethod::Convolution,
            DiscretizationMethod::Exponential,
        ] {
            options.push(
                SimulationOptions::default()
                    .with_arterial_delay(delay)
                    .with_method(method),
            );
        }
    }
    options
}

// ============================================================================
// Degenerate parameters
// ============================================================================

#[test]
fn zero_ktrans_gives_zero_or_plasma_curve() {
    for times in [uniform_times(100, 1.0), irregular_times()] {
        let ca = arterial_curve(&times);
        for options in all_options() {
            let ct = tofts(&times, &ca, 0.0, 0.25, &options).unwrap();
            assert!(ct.values().iter().all(|c| *c == 0.0));

            let ct = extended_tofts(&times, &ca, 0.0, 0.25, 0.07, &options).unwrap();
            for (c, a) in ct.values().iter().zip(ca.iter()) {
                assert_eq!(*c, 0.07 * a);
            }
        }
    }
}

#[test]
fn non_positive_ve_gives_zero_or_plasma_curve() {
    let times = uniform_times(100, 1.0);
    let ca = arterial_curve(&times);
    for ve in [0.0, -0.3] {
        for ktrans in [0.1, 2.0] {
            let ct = tofts(&times, &ca, ktrans, ve, &SimulationOptions::default()).unwrap();
            assert!(ct.values().iter().all(|c| *c == 0.0));

            let ct =
                extended_tofts(&times, &ca, ktrans, ve, 0.1, &SimulationOptions::default())
                    .unwrap();
            for (c, a) in ct.values().iter().zip(ca.iter()) {
                assert_eq!(*c, 0.1 * a);
            }
            assert!(ct
                .warnings()
                .iter()
                .any(|w| matches!(w, Warning::DegenerateParameters { .. })));
        }
    }
}

// ============================================================================
// Shape invariants
// ============================================================================

#[test]
fn output_length_matches_input() {
    for times in [uniform_times(37, 0.5), irregular_times(), vec![0.0, 1.0]] {
        let ca = arterial_curve(&times);
        for options in all_options() {
            assert_eq!(tofts(&times, &ca, 0.4, 0.3, &options).unwrap().len(), times.len());
            assert_eq!(
                extended_tofts(&times, &ca, 0.4, 0.3, 0.05, &options)
                    .unwrap()
                    .len(),
                times.len()
            );
        }
    }
}

#[test]
fn tissue_stays_zero_before_delayed_arrival() {
    // The arterial curve is zero before 10 s, so with Ta = 30 s nothing
    // reaches the tissue before 40 s
    let times = uniform_times(200, 1.0);
    let ca = arterial_curve(&times);
    let options = SimulationOptions::default();
    assert_eq!(options.arterial_delay, 30.0);

    let shifted = shift_arterial(&times, &ca, 30.0).unwrap();
    for (t, c) in times.iter().zip(shifted.iter()) {
        if *t <= 30.0 {
            assert_eq!(*c, 0.0);
        }
    }

    let ct = tofts(&times, &ca, 0.5, 0.2, &options).unwrap();
    for (t, c) in times.iter().zip(ct.values()) {
        if *t <= 40.0 {
            assert_eq!(*c, 0.0, "t = {}", t);
        }
    }
    assert!(ct.values()[100] > 0.0);
}

#[test]
fn delay_shifts_tissue_curve() {
    let times = uniform_times(400, 1.0);
    let ca = arterial_curve(&times);
    let exp = DiscretizationMethod::Exponential;

    let base = tofts(
        &times,
        &ca,
        0.5,
        0.2,
        &SimulationOptions::default().with_arterial_delay(0.0).with_method(exp),
    )
    .unwrap();
    let delayed = tofts(
        &times,
        &ca,
        0.5,
        0.2,
        &SimulationOptions::default().with_arterial_delay(20.0).with_method(exp),
    )
    .unwrap();

    for i in 20..times.len() {
        assert_relative_eq!(delayed.values()[i], base.values()[i - 20], epsilon = 1e-10);
    }
}

// ============================================================================
// Extended vs standard model
// ============================================================================

#[test]
fn extended_with_zero_vp_matches_tofts() {
    for times in [uniform_times(150, 1.0), irregular_times()] {
        let ca = arterial_curve(&times);
        for options in all_options() {
            let base = tofts(&times, &ca, 0.35, 0.25, &options).unwrap();
            let ext = extended_tofts(&times, &ca, 0.35, 0.25, 0.0, &options).unwrap();
            for (b, e) in base.values().iter().zip(ext.values()) {
                assert_relative_eq!(*b, *e, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn plasma_term_raises_curve() {
    let times = irregular_times();
    let ca = arterial_curve(&times);
    let options = SimulationOptions::default().with_arterial_delay(0.0);

    let base = tofts(&times, &ca, 0.35, 0.25, &options).unwrap();
    let ext = extended_tofts(&times, &ca, 0.35, 0.25, 0.1, &options).unwrap();
    let peak_gain = ext
        .values()
        .iter()
        .zip(base.values())
        .map(|(e, b)| e - b)
        .fold(f64::MIN, f64::max);

    // vp * max(ca), up to interpolation error on the resampled grid
    let ca_peak = ca.iter().cloned().fold(f64::MIN, f64::max);
    assert_relative_eq!(peak_gain, 0.1 * ca_peak, max_relative = 0.05);
}

#[test]
fn plasma_term_is_added_before_restoring_irregular_grid() {
    let times = irregular_times();
    let ca = arterial_curve(&times);
    let (ktrans, ve, vp) = (0.35, 0.25, 0.1);
    let delay = 12.5;
    let options = SimulationOptions::default().with_arterial_delay(delay);

    let ct = extended_tofts(&times, &ca, ktrans, ve, vp, &options).unwrap();

    // Same computation spelled out step by step
    let arterial = shift_arterial(&times, &ca, delay).unwrap();
    let impulse = impulse_response(ktrans / 60.0, ve, &times);
    let grid = resampled_grid(&times).unwrap();
    let dt = grid[1] - grid[0];
    let quadratic = |y: &[f64]| {
        Interp1d::new(&times, y, InterpolationKind::Quadratic)
            .unwrap()
            .eval_many(&grid)
    };
    let arterial_resampled = quadratic(&arterial[..]);
    let impulse_resampled = quadratic(&impulse[..]);

    let mut tissue = convolve_full(&arterial_resampled, &impulse_resampled);
    tissue.truncate(grid.len());
    for (c, a) in tissue.iter_mut().zip(&arterial_resampled) {
        *c = *c * dt + vp * a;
    }
    let expected = Interp1d::new(&grid, &tissue, InterpolationKind::Quadratic)
        .unwrap()
        .eval_many(&times);

    assert_eq!(ct.len(), expected.len());
    for (c, e) in ct.values().iter().zip(expected.iter()) {
        assert_relative_eq!(*c, *e, epsilon = 1e-12);
    }
}

// ============================================================================
// Warnings and errors
// ============================================================================

#[test]
fn non_uniform_grid_is_reported_not_rejected() {
    let times = irregular_times();
    let ca = arterial_curve(&times);
    let ct = tofts(&times, &ca, 0.3, 0.2, &SimulationOptions::default()).unwrap();
    assert_eq!(
        ct.warnings(),
        &[Warning::NonUniformGrid { min_spacing: 2.0 }]
    );
    assert!(ct.values().iter().all(|c| c.is_finite()));

    let times = uniform_times(100, 0.5);
    let ca = arterial_curve(&times);
    let ct = tofts(&times, &ca, 0.3, 0.2, &SimulationOptions::default()).unwrap();
    assert!(!ct.has_warnings());
}

#[test]
fn invalid_inputs_fail_fast() {
    let options = SimulationOptions::default();
    assert!(matches!(
        tofts(&[0.0, 1.0, 2.0], &[0.0, 1.0], 0.3, 0.2, &options),
        Err(TracerError::LengthMismatch { .. })
    ));
    assert!(matches!(
        extended_tofts(&[], &[], 0.3, 0.2, 0.1, &options),
        Err(TracerError::InsufficientData { .. })
    ));
    assert!(matches!(
        tofts(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0], 0.3, 0.2, &options),
        Err(TracerError::InvalidTimeSequence)
    ));
    assert!(matches!(
        "linear".parse::<DiscretizationMethod>(),
        Err(TracerError::InvalidMethod(_))
    ));
}

#[test]
fn tiny_step_on_irregular_grid_is_an_error() {
    let times = [0.0, 1e-300, 1.0];
    let ca = [0.0, 1.0, 2.0];
    let options = SimulationOptions::default().with_arterial_delay(0.0);

    assert!(matches!(
        tofts(&times, &ca, 0.5, 0.2, &options),
        Err(TracerError::ResampledGridTooLarge { .. })
    ));

    // The exponential path never resamples
    let exp = options.with_method(DiscretizationMethod::Exponential);
    assert_eq!(tofts(&times, &ca, 0.5, 0.2, &exp).unwrap().len(), 3);
}

#[test]
fn vanishing_ktrans_stays_finite() {
    let times = uniform_times(50, 1.0);
    let ca = arterial_curve(&times);
    for options in all_options() {
        let ct = extended_tofts(&times, &ca, 1e-310, 0.2, 0.05, &options).unwrap();
        assert!(ct.values().iter().all(|c| c.is_finite()));
    }
}

#[test]
fn arterial_input_round_trips_through_json() {
    let times = uniform_times(10, 1.0);
    let aif = ArterialInput::new(times.clone(), arterial_curve(&times)).unwrap();
    let text = serde_json::to_string(&aif).unwrap();
    let back: ArterialInput = serde_json::from_str(&text).unwrap();
    assert_eq!(back.times(), aif.times());
    assert_eq!(back.concentrations(), aif.concentrations());

    // Validation still applies when deserializing
    let bad = r#"{"times": [0.0, 2.0, 1.0], "concentrations": [0.0, 1.0, 2.0]}"#;
    assert!(serde_json::from_str::<ArterialInput>(bad).is_err());
}
