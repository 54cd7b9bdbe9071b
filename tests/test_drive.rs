#![allow(non_snake_case)]

//! Tests for laser drive terms and their pulse records.

use ndarray as nd;
use num_complex::Complex64 as C64;
use rydberg_pulse::{
    Coefficient, Error, Observable, Pulse, Wires, rydberg_drive,
};

fn close(a: &nd::Array2<C64>, b: &nd::Array2<C64>) -> bool {
    a.dim() == b.dim() && a.iter().zip(b).all(|(x, y)| (x - y).norm() < 1e-12)
}

/// `Ω (cos φ X - sin φ Y) - Δ Z` on a single qubit.
fn single_qubit_drive(amp: f64, det: f64, phase: f64) -> nd::Array2<C64> {
    let (sin, cos) = phase.sin_cos();
    let off_diag = C64::new(amp * cos, amp * sin);
    nd::array![
        [C64::from(-det), off_diag],
        [off_diag.conj(), C64::from(det)],
    ]
}

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

#[test]
fn fixed_drive_has_two_terms_and_one_pulse() {
    let H = rydberg_drive(3.0, 2.0, 0.0, vec![0_usize, 1]).unwrap();
    assert_eq!(H.len(), 2);
    assert_eq!(H.coeffs(), &[Coefficient::from(2.0), Coefficient::from(3.0)]);
    assert_eq!(
        H.ops()[0],
        Observable::Sum(vec![(-1.0, Observable::PauliZ(0)), (-1.0, Observable::PauliZ(1))]),
    );
    assert_eq!(
        H.ops()[1],
        Observable::Sum(vec![
            (1.0, Observable::PauliX(0)),
            (-0.0, Observable::PauliY(0)),
            (1.0, Observable::PauliX(1)),
            (-0.0, Observable::PauliY(1)),
        ]),
    );
    assert_eq!(H.pulses(), &[Pulse::new(3.0, 2.0, 0.0, vec![0_usize, 1])]);
    assert!(H.register().is_none());
}

#[test]
fn one_pulse_regardless_of_wire_count() {
    let H = rydberg_drive(1.0, 2.0, 3.0, vec![1_usize, 2]).unwrap();
    assert_eq!(H.len(), 2);
    assert_eq!(H.pulses(), &[Pulse::new(1.0, 2.0, 3.0, vec![1_usize, 2])]);
}

#[test]
fn callable_amplitude_keeps_its_identity() {
    let f = Coefficient::callable(|p, t| p[0] * t);
    let H = rydberg_drive(f.clone(), 0.5, 0.25, 2_usize).unwrap();
    assert_eq!(H.coeffs_fixed(), &[Coefficient::from(0.5)]);
    assert!(H.coeffs_parametrized()[0].same_callable(&f));
    assert!(H.pulses()[0].amplitude().same_callable(&f));
}

#[test]
fn multiple_local_drives() {
    let fa = Coefficient::callable(|p, t| p[0] * t.sin());
    let fb = Coefficient::callable(|p, t| p[0] * t.cos());
    let Ha = rydberg_drive(fa.clone(), 3.0, 0.0, vec![0_usize, 3]).unwrap();
    let Hb = rydberg_drive(fb.clone(), 1.0, 0.0, vec![1_usize, 2]).unwrap();
    let H = (Ha + Hb).unwrap();

    assert_eq!(H.coeffs_fixed(), &[Coefficient::from(3.0), Coefficient::from(1.0)]);
    assert!(H.coeffs_parametrized()[0].same_callable(&fa));
    assert!(H.coeffs_parametrized()[1].same_callable(&fb));
    assert_eq!(H.wires(), &Wires::from(vec![0_usize, 3, 1, 2]));
    assert_eq!(H.pulses().len(), 2);
    assert_eq!(H.pulses()[0].wires(), &Wires::from(vec![0_usize, 3]));
    assert_eq!(H.pulses()[1].wires(), &Wires::from(vec![1_usize, 2]));
}

#[test]
fn empty_wires_are_rejected() {
    let res = rydberg_drive(1.0, 0.0, 0.0, Vec::<usize>::new());
    assert!(matches!(res, Err(Error::NoWires)));
}

// ---------------------------------------------------------------------------
// Matrices
// ---------------------------------------------------------------------------

#[test]
fn fixed_drive_matrix_matches_closed_form() {
    let H = rydberg_drive(2.0, 0.5, 0.3, 0_usize).unwrap();
    let m = H.call(&[], 0.0).unwrap().matrix();
    assert!(close(&m, &single_qubit_drive(2.0, 0.5, 0.3)));
}

#[test]
fn callable_phase_splits_quadratures() {
    let amp = Coefficient::callable(|p, _| p[0]);
    let phase = Coefficient::callable(|p, _| p[1]);
    let H = rydberg_drive(amp, 0.5, phase.clone(), 0_usize).unwrap();
    assert_eq!(H.len(), 3);
    assert_eq!(H.num_parametrized(), 2);
    assert_eq!(H.ops_parametrized(), &[
        Observable::Sum(vec![(1.0, Observable::PauliX(0))]),
        Observable::Sum(vec![(1.0, Observable::PauliY(0))]),
    ]);
    assert!(H.pulses()[0].phase().same_callable(&phase));

    let params = vec![vec![2.0, 0.3], vec![2.0, 0.3]];
    let m = H.call(&params, 0.0).unwrap().matrix();
    assert!(close(&m, &single_qubit_drive(2.0, 0.5, 0.3)));
}

#[test]
fn drive_acts_identically_on_every_wire() {
    let H = rydberg_drive(1.0, 0.0, 0.0, vec![0_usize, 1]).unwrap();
    let m = H.call(&[], 0.0).unwrap().matrix();
    let x0 = Observable::PauliX(0).matrix_on(H.wires()).unwrap();
    let x1 = Observable::PauliX(1).matrix_on(H.wires()).unwrap();
    assert!(close(&m, &(x0 + x1)));
}

// ---------------------------------------------------------------------------
// Pulse
// ---------------------------------------------------------------------------

#[test]
fn pulse_equality() {
    let f = Coefficient::callable(|p, t| p[0] * t);
    let p1 = Pulse::new(f.clone(), 1.0, 0.0, vec![0_usize, 1]);
    let p2 = Pulse::new(f.clone(), 1.0, 0.0, vec![0_usize, 1]);
    assert_eq!(p1, p2);
    assert!(p1.is_parametrized());

    assert_ne!(p1, Pulse::new(f.clone(), 2.0, 0.0, vec![0_usize, 1]));
    assert_ne!(p1, Pulse::new(f.clone(), 1.0, 0.0, vec![1_usize, 0]));
    let g = Coefficient::callable(|p, t| p[0] * t);
    assert_ne!(p1, Pulse::new(g, 1.0, 0.0, vec![0_usize, 1]));

    assert_eq!(
        Pulse::new(1.0, 2.0, 3.0, vec![0_usize, 1]),
        Pulse::new(1.0, 2.0, 3.0, vec![0_usize, 1]),
    );
    assert_ne!(
        Pulse::new(1.0, 2.0, 3.0, vec![0_usize, 1]),
        Pulse::new(1.0, 2.0, 3.0, 0_usize),
    );

    let fixed = Pulse::new(1.0, 2.0, 3.0, 4_usize);
    assert!(!fixed.is_parametrized());
    assert_eq!(fixed.amplitude(), &Coefficient::from(1.0));
    assert_eq!(fixed.detuning(), &Coefficient::from(2.0));
    assert_eq!(fixed.phase(), &Coefficient::from(3.0));
    assert_eq!(fixed.wires(), &Wires::from(4_usize));
}
