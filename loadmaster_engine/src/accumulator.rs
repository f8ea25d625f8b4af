//! Loadmaster Engine: Mass & Moment Accumulator
//!
//! Folds the profile and a load configuration into mass/moment totals
//! for the zero-fuel phase, then derives ramp and landing from it.
//! Pure: the inputs are never mutated.

use serde::{Deserialize, Serialize};

use crate::domain::{row_of_station, MassField, MassMoment};
use crate::loading::LoadConfiguration;
use crate::profile::{AircraftProfile, StationArms};

/// Mass/moment totals for all three phases plus derived landing fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseTotals {
    pub zero_fuel: MassMoment,
    pub ramp: MassMoment,
    pub landing: MassMoment,
    /// `ramp_fuel - planned_burn`; negative when burn exceeds fuel.
    pub landing_fuel_mass: f64,
}

/// Accumulate all three phases.
pub fn accumulate(profile: &AircraftProfile, config: &LoadConfiguration) -> PhaseTotals {
    let arms = &profile.station_arms;
    let zero_fuel = zero_fuel_totals(profile, config);

    let ramp_fuel = config.mass(MassField::RampFuel);
    let planned_burn = config.mass(MassField::PlannedBurn);
    let ramp = zero_fuel.add(ramp_fuel, arms.fuel);
    let landing = ramp.remove(planned_burn, arms.fuel);

    PhaseTotals {
        zero_fuel,
        ramp,
        landing,
        landing_fuel_mass: ramp_fuel - planned_burn,
    }
}

/// Basic aircraft, baggage, de-icing fluid, crew and passengers.
pub fn zero_fuel_totals(profile: &AircraftProfile, config: &LoadConfiguration) -> MassMoment {
    let arms = &profile.station_arms;

    let basic = MassMoment {
        mass: profile.basic_mass,
        moment: profile.basic_moment(),
    };
    let mut totals = basic
        .add(config.mass(MassField::ForwardBaggage), arms.forward_baggage)
        .add(config.mass(MassField::AftBaggage), arms.aft_baggage)
        .add(config.mass(MassField::DeicingFluid), arms.deicing_fluid);

    if config.second_pilot {
        totals = totals.add(profile.second_pilot_mass, arms.second_pilot);
    }

    for (station, seat) in config.seats.iter().enumerate() {
        totals = totals.add(seat.mass_kg(), passenger_arm(arms, station));
    }

    totals
}

/// Row arm for a passenger station. The seat array and the row table are
/// both sized from `PASSENGER_STATIONS`, so the index is always in range.
fn passenger_arm(arms: &StationArms, station: usize) -> f64 {
    arms.passenger_rows[row_of_station(station)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SeatType, PASSENGER_STATIONS};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_aircraft_is_basic_mass() {
        let p = AircraftProfile::g_cmcy();
        let t = accumulate(&p, &LoadConfiguration::new());
        assert!(close(t.zero_fuel.mass, 2563.7));
        assert!(close(t.zero_fuel.moment, 2563.7 * 0.389));
        assert_eq!(t.zero_fuel.moment, p.basic_moment());
        assert_eq!(t.ramp, t.zero_fuel);
        assert_eq!(t.landing, t.zero_fuel);
        assert_eq!(t.landing_fuel_mass, 0.0);
    }

    #[test]
    fn baggage_and_fluid_at_their_arms() {
        let p = AircraftProfile::g_cmcy();
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::ForwardBaggage, 50.0).unwrap();
        cfg.set_mass(MassField::AftBaggage, 100.0).unwrap();
        cfg.set_mass(MassField::DeicingFluid, 60.0).unwrap();
        let t = accumulate(&p, &cfg);
        assert!(close(t.zero_fuel.mass, 2563.7 + 210.0));
        let expected = 2563.7 * 0.389 + 50.0 * -3.345 + 100.0 * 3.539 + 60.0 * 1.495;
        assert!(close(t.zero_fuel.moment, expected));
    }

    #[test]
    fn stations_pair_onto_row_arms() {
        let p = AircraftProfile::g_cmcy();
        let base = accumulate(&p, &LoadConfiguration::new()).zero_fuel;
        for station in 0..PASSENGER_STATIONS {
            let mut cfg = LoadConfiguration::new();
            cfg.set_seat(station, SeatType::Child).unwrap();
            let t = accumulate(&p, &cfg).zero_fuel;
            let row_arm = p.station_arms.passenger_rows[station / 2];
            assert!(close(t.mass - base.mass, 35.0));
            assert!(close(t.moment - base.moment, 35.0 * row_arm));
        }
    }

    #[test]
    fn second_pilot_adds_fixed_mass() {
        let p = AircraftProfile::g_cmcy();
        let mut cfg = LoadConfiguration::new();
        cfg.set_second_pilot(true);
        let t = accumulate(&p, &cfg);
        assert!(close(t.zero_fuel.mass, 2563.7 + 85.0));
        assert!(close(t.zero_fuel.moment, 2563.7 * 0.389 + 85.0 * -1.739));
    }

    #[test]
    fn fuel_and_burn_at_fuel_arm() {
        let p = AircraftProfile::g_cmcy();
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::RampFuel, 540.0).unwrap();
        cfg.set_mass(MassField::PlannedBurn, 200.0).unwrap();
        let t = accumulate(&p, &cfg);
        assert!(close(t.ramp.mass, 3103.7));
        assert!(close(t.ramp.moment - t.zero_fuel.moment, 540.0 * 0.787));
        assert!(close(t.landing.mass, 2903.7));
        assert!(close(t.ramp.moment - t.landing.moment, 200.0 * 0.787));
        assert_eq!(t.landing_fuel_mass, 340.0);
    }

    #[test]
    fn excess_burn_goes_negative() {
        let p = AircraftProfile::g_cmcy();
        let mut cfg = LoadConfiguration::new();
        cfg.set_mass(MassField::RampFuel, 100.0).unwrap();
        cfg.set_mass(MassField::PlannedBurn, 300.0).unwrap();
        let t = accumulate(&p, &cfg);
        assert_eq!(t.landing_fuel_mass, -200.0);
        assert!(t.landing.mass < t.zero_fuel.mass);
    }
}
