//! Physical quantities: a number together with the units it was written in

use std::fmt;

use crate::error::{EvalError, EvalResult};
use crate::units::{self, Dimension, Unit};

/// SI base unit for each base dimension, used when no written unit fits
const BASE_UNITS: [&str; units::BASE_DIMENSIONS] = ["m", "kg", "s", "A", "K", "mol", "cd", "bit"];

/// A numeric value with a product of unit powers
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    units: Vec<(&'static Unit, i32)>,
}

impl Quantity {
    /// A dimensionless number
    pub fn scalar(value: f64) -> Self {
        Self {
            value,
            units: Vec::new(),
        }
    }

    /// One of the given unit
    pub fn unit(unit: &'static Unit) -> Self {
        Self {
            value: 1.0,
            units: vec![(unit, 1)],
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// Physical dimension of the unit product
    pub fn dimension(&self) -> EvalResult<Dimension> {
        self.units.iter().try_fold(Dimension::NONE, |acc, (u, exp)| {
            u.dimension
                .checked_powi(*exp)
                .and_then(|d| acc.checked_add(d))
                .ok_or(EvalError::ExponentOverflow)
        })
    }

    fn si_factor(&self) -> f64 {
        self.units
            .iter()
            .map(|(u, exp)| u.factor.powi(*exp))
            .product()
    }

    /// The value expressed in coherent SI units
    pub fn si_value(&self) -> f64 {
        self.value * self.si_factor()
    }

    /// Same value with a different numeric part
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            units: self.units.clone(),
        }
    }

    /// Value of a dimensionless quantity, after folding in unit factors
    pub fn as_scalar(&self, context: &str) -> EvalResult<f64> {
        if !self.dimension()?.is_dimensionless() {
            return Err(EvalError::NotDimensionless(context.to_string()));
        }
        Ok(self.si_value())
    }

    pub fn neg(&self) -> Self {
        self.with_value(-self.value)
    }

    pub fn add(&self, other: &Quantity) -> EvalResult<Self> {
        let other = other.convert_to(self)?;
        Ok(self.with_value(self.value + other.value))
    }

    pub fn sub(&self, other: &Quantity) -> EvalResult<Self> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Quantity) -> EvalResult<Self> {
        let mut units = self.units.clone();
        for &(unit, exp) in &other.units {
            match units.iter_mut().find(|(u, _)| u.name == unit.name) {
                Some(entry) => {
                    entry.1 = units::exponent_in_range(entry.1.checked_add(exp))
                        .ok_or(EvalError::ExponentOverflow)?
                }
                None => units.push((unit, exp)),
            }
        }
        units.retain(|(_, exp)| *exp != 0);
        Ok(Self {
            value: self.value * other.value,
            units,
        })
    }

    pub fn div(&self, other: &Quantity) -> EvalResult<Self> {
        if other.value == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        self.mul(&other.recip())
    }

    fn recip(&self) -> Self {
        Self {
            value: 1.0 / self.value,
            units: self.units.iter().map(|&(u, exp)| (u, -exp)).collect(),
        }
    }

    pub fn pow(&self, exponent: &Quantity) -> EvalResult<Self> {
        let exp = exponent.as_scalar("^")?;
        if !self.has_units() {
            return Ok(Self::scalar(self.value.powf(exp)));
        }
        if exp.fract() != 0.0 {
            return Err(EvalError::NonIntegerExponent(exp));
        }
        if exp.abs() > i32::MAX as f64 {
            return Err(EvalError::ExponentOverflow);
        }
        let n = exp as i32;
        let units = self
            .units
            .iter()
            .map(|&(u, e)| {
                units::exponent_in_range(e.checked_mul(n))
                    .map(|e| (u, e))
                    .ok_or(EvalError::ExponentOverflow)
            })
            .filter(|entry| !matches!(entry, Ok((_, 0))))
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(Self {
            value: self.value.powi(n),
            units,
        })
    }

    pub fn sqrt(&self) -> EvalResult<Self> {
        if self.units.iter().all(|(_, exp)| exp % 2 == 0) {
            return Ok(Self {
                value: self.value.sqrt(),
                units: self.units.iter().map(|&(u, e)| (u, e / 2)).collect(),
            });
        }
        // Written units do not split evenly, fall back to SI base units
        let base = self.to_base_units()?;
        let dimension = base
            .dimension()?
            .root(2)
            .ok_or_else(|| EvalError::NotDimensionless("sqrt".to_string()))?;
        Ok(Self::from_dimension(base.value.sqrt(), dimension))
    }

    /// Re-express this quantity in the units of `target`
    pub fn convert_to(&self, target: &Quantity) -> EvalResult<Self> {
        if self.dimension()? != target.dimension()? {
            return Err(EvalError::IncompatibleUnits {
                from: self.units_label(),
                to: target.units_label(),
            });
        }
        Ok(Self {
            value: self.si_value() / target.si_factor(),
            units: target.units.clone(),
        })
    }

    fn to_base_units(&self) -> EvalResult<Self> {
        Ok(Self::from_dimension(self.si_value(), self.dimension()?))
    }

    fn from_dimension(value: f64, dimension: Dimension) -> Self {
        let mut quantity = Self::scalar(value);
        for (axis, name) in BASE_UNITS.iter().enumerate() {
            let exp = dimension.exponent(axis);
            if exp == 0 {
                continue;
            }
            if let Some(unit) = units::lookup(name) {
                quantity.units.push((unit, exp));
            }
        }
        quantity
    }

    fn units_label(&self) -> String {
        if self.has_units() {
            self.unit_string()
        } else {
            "scalar".to_string()
        }
    }

    /// Units rendered as `kg·m^2/s^2`, or an empty string when scalar
    pub fn unit_string(&self) -> String {
        let numerator: Vec<String> = self
            .units
            .iter()
            .filter(|(_, exp)| *exp > 0)
            .map(|&(u, exp)| unit_power(u.name, exp))
            .collect();
        let denominator: Vec<String> = self
            .units
            .iter()
            .filter(|(_, exp)| *exp < 0)
            .map(|&(u, exp)| unit_power(u.name, -exp))
            .collect();

        match (numerator.is_empty(), denominator.len()) {
            (_, 0) => numerator.join("·"),
            (true, _) => self
                .units
                .iter()
                .map(|&(u, exp)| unit_power(u.name, exp))
                .collect::<Vec<_>>()
                .join("·"),
            (false, 1) => format!("{}/{}", numerator.join("·"), denominator[0]),
            (false, _) => format!("{}/({})", numerator.join("·"), denominator.join("·")),
        }
    }
}

fn unit_power(name: &str, exp: i32) -> String {
    if exp == 1 {
        name.to_string()
    } else {
        format!("{}^{}", name, exp)
    }
}

/// Format a number with up to ten significant digits
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if value.fract() == 0.0 && magnitude < 1e15 {
        return format!("{:.0}", value);
    }
    if (1e-4..1e15).contains(&magnitude) {
        let digits = magnitude.log10().floor() as i32;
        let decimals = (9 - digits).max(0) as usize;
        return trim_fraction(&format!("{:.*}", decimals, value));
    }
    let formatted = format!("{:.9e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
        None => formatted,
    }
}

fn trim_fraction(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = format_number(self.value);
        if self.has_units() {
            write!(f, "{} {}", number, self.unit_string())
        } else {
            write!(f, "{}", number)
        }
    }
}
