//! Reference scenarios for G-CMCY.
//!
//! Figures here come from the aircraft's weight & balance data. If any
//! of these fail, the engine no longer matches the certified sheet.

use loadmaster_engine::arithmetic::approx_eq;
use loadmaster_engine::domain::{FlightPhase, FlightPreparation, MassField, SeatType};
use loadmaster_engine::engine::WeightBalanceEngine;
use loadmaster_engine::envelope::centroid;
use loadmaster_engine::hashing::canonical_hash;
use loadmaster_engine::loading::LoadConfiguration;
use loadmaster_engine::profile::AircraftProfile;
use loadmaster_engine::ENGINE_VERSION;
use strum::IntoEnumIterator;

fn engine() -> WeightBalanceEngine {
    WeightBalanceEngine::reference().expect("reference profile is valid")
}

fn prep() -> FlightPreparation {
    FlightPreparation {
        timestamp: "16 Oct 2026 | 07:45".to_string(),
        captain: "J. Smith".to_string(),
        prepared_by: "K. Jones".to_string(),
    }
}

#[test]
fn empty_aircraft_matches_basic_figures() {
    let r = engine().recompute(&LoadConfiguration::new(), &prep());

    assert!(approx_eq(r.zero_fuel.mass, 2563.7, 1e-12));
    assert!(approx_eq(r.zero_fuel.moment, 2563.7 * 0.389, 1e-12));
    assert!((r.zero_fuel.moment - 997.3).abs() < 0.05);
    let expected_mac = (r.zero_fuel.moment / r.zero_fuel.mass) * 100.0 / 1.839;
    assert!(approx_eq(r.zero_fuel.cg_percent_mac, expected_mac, 1e-9));
    assert!((r.zero_fuel.cg_percent_mac - 21.16).abs() < 0.01);
    assert!(r.is_safe);
}

#[test]
fn ramp_fuel_adds_at_fuel_arm() {
    let mut cfg = LoadConfiguration::new();
    cfg.set_mass_text(MassField::RampFuel, "540").unwrap();
    let r = engine().recompute(&cfg, &prep());

    assert!(approx_eq(r.takeoff.mass, 3103.7, 1e-12));
    assert!(r.takeoff.mass <= 3680.0);
    assert!(approx_eq(
        r.takeoff.moment - r.zero_fuel.moment,
        540.0 * 0.787,
        1e-9
    ));
    assert!((r.takeoff.moment - r.zero_fuel.moment - 425.0).abs() < 0.05);
    assert!(r.verdict.takeoff_ok);
}

#[test]
fn full_cabin_with_second_pilot_is_within_limits() {
    let mut cfg = LoadConfiguration::new();
    cfg.set_second_pilot(true);
    for station in 0..9 {
        cfg.set_seat(station, SeatType::Male).unwrap();
    }
    let r = engine().recompute(&cfg, &prep());

    assert!(approx_eq(r.zero_fuel.mass, 3458.7, 1e-12));
    assert!(r.zero_fuel.mass <= 3560.0);
    assert!(r.verdict.zero_fuel_ok);
    // 22.76 %MAC sits aft of the sloped forward limit at this mass.
    assert!((r.zero_fuel.cg_percent_mac - 22.76).abs() < 0.01);
    assert!(r.verdict.polygon_ok);
    assert!(r.is_safe);
}

#[test]
fn cg_formula_holds_for_every_phase() {
    let mut cfg = LoadConfiguration::new();
    cfg.set_mass(MassField::ForwardBaggage, 80.0).unwrap();
    cfg.set_mass(MassField::AftBaggage, 120.0).unwrap();
    cfg.set_mass(MassField::DeicingFluid, 45.0).unwrap();
    cfg.set_mass(MassField::RampFuel, 400.0).unwrap();
    cfg.set_mass(MassField::PlannedBurn, 180.0).unwrap();
    cfg.set_seat(2, SeatType::Female).unwrap();
    cfg.set_seat(5, SeatType::Child).unwrap();
    let r = engine().recompute(&cfg, &prep());

    for phase in FlightPhase::iter() {
        let p = r.phase(phase);
        assert!(p.mass > 0.0);
        assert!(p.cg_percent_mac.is_finite());
        let expected = (p.moment / p.mass) * 100.0 / 1.839;
        assert!(approx_eq(p.cg_percent_mac, expected, 1e-9), "{phase}");
    }
}

#[test]
fn recompute_is_bit_identical() {
    let mut cfg = LoadConfiguration::new();
    cfg.set_mass(MassField::RampFuel, 333.3).unwrap();
    cfg.set_mass(MassField::PlannedBurn, 111.1).unwrap();
    cfg.set_seat(7, SeatType::Female).unwrap();
    let e = engine();

    let a = e.recompute(&cfg, &prep());
    let b = e.recompute(&cfg, &prep());
    assert_eq!(a, b);
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(a.zero_fuel.cg_percent_mac.to_bits(), b.zero_fuel.cg_percent_mac.to_bits());
}

#[test]
fn more_burn_lowers_landing_mass_and_fuel_equally() {
    let e = engine();
    let mut cfg = LoadConfiguration::new();
    cfg.set_mass(MassField::RampFuel, 540.0).unwrap();

    let mut previous: Option<(f64, f64, f64)> = None;
    for burn in [0.0, 50.0, 120.5, 300.0, 540.0, 700.0] {
        cfg.set_mass(MassField::PlannedBurn, burn).unwrap();
        let r = e.recompute(&cfg, &prep());
        if let Some((mass, fuel, prev_burn)) = previous {
            let delta = burn - prev_burn;
            assert!(r.landing.mass < mass);
            assert!(r.landing_fuel_mass < fuel);
            assert!(((mass - r.landing.mass) - delta).abs() < 1e-9);
            assert!(((fuel - r.landing_fuel_mass) - delta).abs() < 1e-9);
        }
        previous = Some((r.landing.mass, r.landing_fuel_mass, burn));
    }
    // Burn beyond ramp fuel is reported, not clamped.
    let (_, fuel, _) = previous.unwrap();
    assert_eq!(fuel, -160.0);
}

#[test]
fn centroid_inside_far_point_outside() {
    let e = engine();
    let c = centroid(&e.profile().envelope).unwrap();
    assert!(e.envelope_contains(c.mac_percent, c.mass));
    assert!(e.envelope_contains(c.mac_percent - 0.25, c.mass + 25.0));
    assert!(!e.envelope_contains(100.0, 10_000.0));
    assert!(!e.envelope_contains(-50.0, 0.0));
}

#[test]
fn zero_fuel_mass_equal_to_limit_passes() {
    let mut cfg = LoadConfiguration::new();
    cfg.set_mass(MassField::AftBaggage, 100.0).unwrap();
    let baseline = engine().recompute(&cfg, &prep());

    let mut profile = AircraftProfile::g_cmcy();
    profile.mass_limits.zero_fuel = baseline.zero_fuel.mass;
    let e = WeightBalanceEngine::new(profile).unwrap();
    let r = e.recompute(&cfg, &prep());
    assert_eq!(r.zero_fuel.mass, baseline.zero_fuel.mass);
    assert!(r.verdict.zero_fuel_ok);
}

#[test]
fn preparation_passes_through() {
    let r = engine().recompute(&LoadConfiguration::new(), &prep());
    assert_eq!(r.preparation, prep());
    assert_eq!(r.inputs, LoadConfiguration::new());
}

#[test]
fn engine_version_is_one() {
    assert_eq!(ENGINE_VERSION, 1);
}
