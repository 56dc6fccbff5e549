//! Unit table and physical dimensions

/// Number of base dimensions tracked
pub const BASE_DIMENSIONS: usize = 8;

/// Accept a checked exponent result unless it overflowed or is `i32::MIN`,
/// keeping every stored exponent negatable
pub fn exponent_in_range(exp: Option<i32>) -> Option<i32> {
    exp.filter(|&e| e != i32::MIN)
}

/// Exponent vector over the base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension([i32; BASE_DIMENSIONS]);

impl Dimension {
    pub const NONE: Dimension = Dimension([0; BASE_DIMENSIONS]);

    pub const fn new(exponents: [i32; BASE_DIMENSIONS]) -> Self {
        Self(exponents)
    }

    /// Exponent of one base dimension
    pub fn exponent(&self, axis: usize) -> i32 {
        self.0[axis]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Raise every exponent to an integer power, `None` on overflow
    pub fn checked_powi(self, n: i32) -> Option<Self> {
        let mut exps = self.0;
        for e in exps.iter_mut() {
            *e = exponent_in_range(e.checked_mul(n))?;
        }
        Some(Self(exps))
    }

    /// Product of two dimensions, `None` on overflow
    pub fn checked_add(self, other: Dimension) -> Option<Self> {
        let mut exps = self.0;
        for (e, o) in exps.iter_mut().zip(other.0.iter()) {
            *e = exponent_in_range(e.checked_add(*o))?;
        }
        Some(Self(exps))
    }

    /// Divide every exponent, if all of them divide evenly
    pub fn root(self, n: i32) -> Option<Self> {
        let mut exps = self.0;
        for e in exps.iter_mut() {
            if *e % n != 0 {
                return None;
            }
            *e /= n;
        }
        Some(Self(exps))
    }
}

/// A named unit with its scale factor to the coherent SI unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Canonical display name
    pub name: &'static str,
    /// Alternative spellings accepted on input
    pub aliases: &'static [&'static str],
    /// Multiply by this to get the SI value
    pub factor: f64,
    pub dimension: Dimension,
}

const fn dim(
    length: i32,
    mass: i32,
    time: i32,
    current: i32,
    temperature: i32,
    amount: i32,
    luminosity: i32,
    information: i32,
) -> Dimension {
    Dimension::new([
        length,
        mass,
        time,
        current,
        temperature,
        amount,
        luminosity,
        information,
    ])
}

const LENGTH: Dimension = dim(1, 0, 0, 0, 0, 0, 0, 0);
const AREA: Dimension = dim(2, 0, 0, 0, 0, 0, 0, 0);
const VOLUME: Dimension = dim(3, 0, 0, 0, 0, 0, 0, 0);
const MASS: Dimension = dim(0, 1, 0, 0, 0, 0, 0, 0);
const TIME: Dimension = dim(0, 0, 1, 0, 0, 0, 0, 0);
const FREQUENCY: Dimension = dim(0, 0, -1, 0, 0, 0, 0, 0);
const CURRENT: Dimension = dim(0, 0, 0, 1, 0, 0, 0, 0);
const TEMPERATURE: Dimension = dim(0, 0, 0, 0, 1, 0, 0, 0);
const AMOUNT: Dimension = dim(0, 0, 0, 0, 0, 1, 0, 0);
const LUMINOSITY: Dimension = dim(0, 0, 0, 0, 0, 0, 1, 0);
const INFORMATION: Dimension = dim(0, 0, 0, 0, 0, 0, 0, 1);
const SPEED: Dimension = dim(1, 0, -1, 0, 0, 0, 0, 0);
const FORCE: Dimension = dim(1, 1, -2, 0, 0, 0, 0, 0);
const ENERGY: Dimension = dim(2, 1, -2, 0, 0, 0, 0, 0);
const POWER: Dimension = dim(2, 1, -3, 0, 0, 0, 0, 0);
const PRESSURE: Dimension = dim(-1, 1, -2, 0, 0, 0, 0, 0);
const CHARGE: Dimension = dim(0, 0, 1, 1, 0, 0, 0, 0);
const VOLTAGE: Dimension = dim(2, 1, -3, -1, 0, 0, 0, 0);
const RESISTANCE: Dimension = dim(2, 1, -3, -2, 0, 0, 0, 0);

macro_rules! unit {
    ($name:expr, [$($alias:expr),*], $factor:expr, $dim:expr) => {
        Unit {
            name: $name,
            aliases: &[$($alias),*],
            factor: $factor,
            dimension: $dim,
        }
    };
}

/// Every unit the evaluator understands
pub static UNITS: &[Unit] = &[
    // Length
    unit!("m", ["meter", "meters", "metre", "metres"], 1.0, LENGTH),
    unit!("km", ["kilometer", "kilometers"], 1e3, LENGTH),
    unit!("cm", ["centimeter", "centimeters"], 1e-2, LENGTH),
    unit!("mm", ["millimeter", "millimeters"], 1e-3, LENGTH),
    unit!("µm", ["um", "μm", "micrometer", "micrometers"], 1e-6, LENGTH),
    unit!("nm", ["nanometer", "nanometers"], 1e-9, LENGTH),
    unit!("in", ["inch", "inches"], 0.0254, LENGTH),
    unit!("ft", ["foot", "feet"], 0.3048, LENGTH),
    unit!("yd", ["yard", "yards"], 0.9144, LENGTH),
    unit!("mi", ["mile", "miles"], 1609.344, LENGTH),
    unit!("au", ["astronomicalunit"], 1.495978707e11, LENGTH),
    unit!("ly", ["lightyear", "lightyears"], 9.4607304725808e15, LENGTH),
    // Area and volume
    unit!("ha", ["hectare", "hectares"], 1e4, AREA),
    unit!("acre", ["acres"], 4046.8564224, AREA),
    unit!("L", ["l", "liter", "liters", "litre", "litres"], 1e-3, VOLUME),
    unit!("mL", ["ml", "milliliter", "milliliters"], 1e-6, VOLUME),
    unit!("gal", ["gallon", "gallons"], 3.785411784e-3, VOLUME),
    // Mass
    unit!("kg", ["kilogram", "kilograms"], 1.0, MASS),
    unit!("g", ["gram", "grams"], 1e-3, MASS),
    unit!("mg", ["milligram", "milligrams"], 1e-6, MASS),
    unit!("t", ["tonne", "tonnes"], 1e3, MASS),
    unit!("lb", ["lbs", "pound", "pounds"], 0.45359237, MASS),
    unit!("oz", ["ounce", "ounces"], 0.028349523125, MASS),
    // Time
    unit!("s", ["sec", "second", "seconds"], 1.0, TIME),
    unit!("ms", ["millisecond", "milliseconds"], 1e-3, TIME),
    unit!("µs", ["us", "μs", "microsecond", "microseconds"], 1e-6, TIME),
    unit!("ns", ["nanosecond", "nanoseconds"], 1e-9, TIME),
    unit!("min", ["minute", "minutes"], 60.0, TIME),
    unit!("h", ["hr", "hour", "hours"], 3600.0, TIME),
    unit!("d", ["day", "days"], 86400.0, TIME),
    unit!("week", ["weeks"], 604800.0, TIME),
    unit!("year", ["years", "yr"], 31557600.0, TIME),
    unit!("Hz", ["hertz"], 1.0, FREQUENCY),
    unit!("kHz", ["kilohertz"], 1e3, FREQUENCY),
    unit!("MHz", ["megahertz"], 1e6, FREQUENCY),
    unit!("GHz", ["gigahertz"], 1e9, FREQUENCY),
    // Speed
    unit!("mph", [], 0.44704, SPEED),
    unit!("kph", ["kmh"], 1.0 / 3.6, SPEED),
    unit!("knot", ["knots", "kn"], 1852.0 / 3600.0, SPEED),
    // Mechanics
    unit!("N", ["newton", "newtons"], 1.0, FORCE),
    unit!("J", ["joule", "joules"], 1.0, ENERGY),
    unit!("kJ", ["kilojoule", "kilojoules"], 1e3, ENERGY),
    unit!("cal", ["calorie", "calories"], 4.184, ENERGY),
    unit!("kcal", ["kilocalorie", "kilocalories"], 4184.0, ENERGY),
    unit!("Wh", ["watthour"], 3600.0, ENERGY),
    unit!("kWh", ["kilowatthour"], 3.6e6, ENERGY),
    unit!("eV", ["electronvolt", "electronvolts"], 1.602176634e-19, ENERGY),
    unit!("W", ["watt", "watts"], 1.0, POWER),
    unit!("kW", ["kilowatt", "kilowatts"], 1e3, POWER),
    unit!("hp", ["horsepower"], 745.69987158227022, POWER),
    unit!("Pa", ["pascal", "pascals"], 1.0, PRESSURE),
    unit!("bar", ["bars"], 1e5, PRESSURE),
    unit!("atm", ["atmosphere", "atmospheres"], 101325.0, PRESSURE),
    unit!("psi", [], 6894.757293168361, PRESSURE),
    // Electromagnetism
    unit!("A", ["ampere", "amperes", "amp", "amps"], 1.0, CURRENT),
    unit!("mA", ["milliampere", "milliamperes"], 1e-3, CURRENT),
    unit!("C", ["coulomb", "coulombs"], 1.0, CHARGE),
    unit!("mAh", [], 3.6, CHARGE),
    unit!("V", ["volt", "volts"], 1.0, VOLTAGE),
    unit!("Ω", ["ohm", "ohms"], 1.0, RESISTANCE),
    // Remaining base units
    unit!("K", ["kelvin"], 1.0, TEMPERATURE),
    unit!("mol", ["mole", "moles"], 1.0, AMOUNT),
    unit!("cd", ["candela"], 1.0, LUMINOSITY),
    // Information
    unit!("bit", ["bits"], 1.0, INFORMATION),
    unit!("B", ["byte", "bytes"], 8.0, INFORMATION),
    unit!("kB", ["kilobyte", "kilobytes"], 8e3, INFORMATION),
    unit!("MB", ["megabyte", "megabytes"], 8e6, INFORMATION),
    unit!("GB", ["gigabyte", "gigabytes"], 8e9, INFORMATION),
    unit!("TB", ["terabyte", "terabytes"], 8e12, INFORMATION),
    unit!("KiB", ["kibibyte", "kibibytes"], 8.0 * 1024.0, INFORMATION),
    unit!("MiB", ["mebibyte", "mebibytes"], 8.0 * 1048576.0, INFORMATION),
    unit!("GiB", ["gibibyte", "gibibytes"], 8.0 * 1073741824.0, INFORMATION),
    // Dimensionless
    unit!("percent", ["pct"], 1e-2, Dimension::NONE),
    unit!("rad", ["radian", "radians"], 1.0, Dimension::NONE),
    unit!("deg", ["degree", "degrees"], std::f64::consts::PI / 180.0, Dimension::NONE),
];

/// Look a unit up by canonical name or alias
pub fn lookup(name: &str) -> Option<&'static Unit> {
    UNITS
        .iter()
        .find(|u| u.name == name || u.aliases.contains(&name))
}

/// All names accepted for units, canonical names first
pub fn supported_units() -> Vec<String> {
    let canonical = UNITS.iter().map(|u| u.name.to_string());
    let aliases = UNITS
        .iter()
        .flat_map(|u| u.aliases.iter().map(|a| a.to_string()));
    canonical.chain(aliases).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_alias() {
        let unit = lookup("meters").unwrap();
        assert_eq!(unit.name, "m");
        assert!(lookup("furlong").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let names = supported_units();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }

    #[test]
    fn test_dimension_arithmetic() {
        assert_eq!(LENGTH.checked_add(LENGTH), Some(AREA));
        assert_eq!(LENGTH.checked_powi(3), Some(VOLUME));
        assert_eq!(AREA.root(2), Some(LENGTH));
        assert_eq!(LENGTH.root(2), None);
        assert!(SPEED
            .checked_add(SPEED.checked_powi(-1).unwrap())
            .unwrap()
            .is_dimensionless());
    }

    #[test]
    fn test_dimension_overflow() {
        let huge = LENGTH.checked_powi(i32::MAX).unwrap();
        assert_eq!(huge.checked_add(LENGTH), None);
        assert_eq!(AREA.checked_powi(i32::MAX), None);
        assert_eq!(LENGTH.checked_powi(i32::MIN), None);
    }

    #[test]
    fn test_every_name_is_typeable() {
        for name in supported_units() {
            let tokens = crate::lexer::tokenize(&name).unwrap();
            assert_eq!(tokens, vec![crate::lexer::Token::Ident(name.as_str())], "{}", name);
        }
    }
}
