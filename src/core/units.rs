// units.rs -- Length unit conversion between SI and imperial.
//
// Each unit's flag value carries its measurement system in the high bits,
// so the system can be tested with `EnumFlags::is_enabled`. Conversion
// goes unit -> base (metre or foot) -> other system's base -> unit.

use serde::{Deserialize, Serialize};

use crate::core::flags::{EnumFlags, Flag};

const SYSTEM_SI: u32 = 1 << 8;
const SYSTEM_IMPERIAL: u32 = 1 << 9;

const FOOT_TO_METRES: f64 = 0.3048;

/// Measurement system flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    Si,
    Imperial,
}

impl Flag for UnitSystem {
    fn bits(self) -> u32 {
        match self {
            UnitSystem::Si => SYSTEM_SI,
            UnitSystem::Imperial => SYSTEM_IMPERIAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Nanometre,
    Micrometre,
    Millimetre,
    Centimetre,
    Decimetre,
    Metre,
    Decametre,
    Hectometre,
    Kilometre,
    Inch,
    Foot,
    Yard,
    Chain,
    Furlong,
    Mile,
}

impl Flag for LengthUnit {
    fn bits(self) -> u32 {
        use LengthUnit::*;
        let (system, id) = match self {
            Nanometre => (SYSTEM_SI, 0),
            Micrometre => (SYSTEM_SI, 1),
            Millimetre => (SYSTEM_SI, 2),
            Centimetre => (SYSTEM_SI, 3),
            Decimetre => (SYSTEM_SI, 4),
            Metre => (SYSTEM_SI, 5),
            Decametre => (SYSTEM_SI, 6),
            Hectometre => (SYSTEM_SI, 7),
            Kilometre => (SYSTEM_SI, 8),
            Inch => (SYSTEM_IMPERIAL, 0),
            Foot => (SYSTEM_IMPERIAL, 1),
            Yard => (SYSTEM_IMPERIAL, 2),
            Chain => (SYSTEM_IMPERIAL, 3),
            Furlong => (SYSTEM_IMPERIAL, 4),
            Mile => (SYSTEM_IMPERIAL, 5),
        };
        system | (id + 1)
    }
}

impl LengthUnit {
    pub fn system(self) -> UnitSystem {
        let flags = EnumFlags::<UnitSystem>::from_bits(self.bits());
        if flags.is_enabled(UnitSystem::Si) {
            UnitSystem::Si
        } else {
            UnitSystem::Imperial
        }
    }

    /// Size of one unit in its system's base (metres or feet).
    fn to_base(self) -> f64 {
        use LengthUnit::*;
        match self {
            Nanometre => 1e-9,
            Micrometre => 1e-6,
            Millimetre => 1e-3,
            Centimetre => 1e-2,
            Decimetre => 1e-1,
            Metre => 1.0,
            Decametre => 1e1,
            Hectometre => 1e2,
            Kilometre => 1e3,
            Inch => 1.0 / 12.0,
            Foot => 1.0,
            Yard => 3.0,
            Chain => 66.0,
            Furlong => 660.0,
            Mile => 5280.0,
        }
    }
}

pub struct LengthConverter;

impl LengthConverter {
    pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
        if from == to {
            return value;
        }
        let mut factor = from.to_base();
        match (from.system(), to.system()) {
            (UnitSystem::Si, UnitSystem::Imperial) => factor /= FOOT_TO_METRES,
            (UnitSystem::Imperial, UnitSystem::Si) => factor *= FOOT_TO_METRES,
            _ => {}
        }
        value * factor / to.to_base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_system() {
        let v = LengthConverter::convert(1.5, LengthUnit::Kilometre, LengthUnit::Metre);
        assert!((v - 1500.0).abs() < 1e-9);
        let v = LengthConverter::convert(250.0, LengthUnit::Millimetre, LengthUnit::Decimetre);
        assert!((v - 2.5).abs() < 1e-12);
        let v = LengthConverter::convert(1.0, LengthUnit::Mile, LengthUnit::Yard);
        assert!((v - 1760.0).abs() < 1e-9);
    }

    #[test]
    fn test_cross_system() {
        let v = LengthConverter::convert(1.0, LengthUnit::Foot, LengthUnit::Metre);
        assert!((v - 0.3048).abs() < 1e-12);
        let v = LengthConverter::convert(1.0, LengthUnit::Inch, LengthUnit::Centimetre);
        assert!((v - 2.54).abs() < 1e-9);
        let v = LengthConverter::convert(1.0, LengthUnit::Kilometre, LengthUnit::Mile);
        assert!((v - 0.621371192).abs() < 1e-8);
    }

    #[test]
    fn test_identity_and_systems() {
        assert_eq!(LengthConverter::convert(3.3, LengthUnit::Chain, LengthUnit::Chain), 3.3);
        assert_eq!(LengthUnit::Furlong.system(), UnitSystem::Imperial);
        assert_eq!(LengthUnit::Nanometre.system(), UnitSystem::Si);
    }
}
