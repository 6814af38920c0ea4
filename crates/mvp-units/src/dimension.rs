//! # Dimension — Exponent Vectors over the Base Basis
//!
//! A [`Dimension`] is the product of base-dimension powers, plus a decimal
//! scale exponent so that `ms` and `s` are distinct units of the same
//! physical dimension. Every operation is a `const fn`: unit rules are
//! evaluated while the compiler monomorphizes operator impls, never at
//! runtime.
//!
//! ## Algebra
//!
//! Dimensions form an abelian group under multiplication:
//!
//! - `mul` adds exponent vectors,
//! - `div` subtracts them,
//! - `recip` negates them,
//! - `DIMENSIONLESS` is the identity.
//!
//! Exponent arithmetic wraps, which keeps the group law exact even at the
//! representable extremes and keeps the `const fn`s free of panics.

use serde::{Deserialize, Serialize};

/// Number of base dimensions in the basis.
pub const BASE_COUNT: usize = 8;

/// The fixed basis of base dimensions.
///
/// The seven SI base quantities plus plane angle, which MRI protocols
/// carry as a first-class dimension (flip angles are in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDimension {
    /// Length (metre).
    Length,
    /// Mass (kilogram).
    Mass,
    /// Time (second).
    Time,
    /// Electric current (ampere).
    Current,
    /// Thermodynamic temperature (kelvin).
    Temperature,
    /// Amount of substance (mole).
    Amount,
    /// Luminous intensity (candela).
    Luminosity,
    /// Plane angle (degree).
    Angle,
}

impl BaseDimension {
    /// All base dimensions in basis order.
    pub const ALL: [BaseDimension; BASE_COUNT] = [
        Self::Length,
        Self::Mass,
        Self::Time,
        Self::Current,
        Self::Temperature,
        Self::Amount,
        Self::Luminosity,
        Self::Angle,
    ];

    /// Position of this base dimension in the exponent vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol of the coherent base unit for this dimension.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Length => "m",
            Self::Mass => "kg",
            Self::Time => "s",
            Self::Current => "A",
            Self::Temperature => "K",
            Self::Amount => "mol",
            Self::Luminosity => "cd",
            Self::Angle => "deg",
        }
    }
}

/// A physical dimension: exponents over [`BaseDimension`] and a power-of-ten
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    exponents: [i8; BASE_COUNT],
    scale: i8,
}

impl Dimension {
    /// The dimensionless unit (pure number, scale 10⁰).
    pub const DIMENSIONLESS: Self = Self {
        exponents: [0; BASE_COUNT],
        scale: 0,
    };

    /// Build a dimension from a full exponent vector and decimal scale.
    pub const fn new(exponents: [i8; BASE_COUNT], scale: i8) -> Self {
        Self { exponents, scale }
    }

    /// A single base dimension raised to the first power.
    pub const fn base(base: BaseDimension) -> Self {
        let mut exponents = [0; BASE_COUNT];
        exponents[base.index()] = 1;
        Self { exponents, scale: 0 }
    }

    /// The same dimension with its decimal scale shifted by `power` (e.g.
    /// `-3` for milli).
    pub const fn scaled(self, power: i8) -> Self {
        Self {
            exponents: self.exponents,
            scale: self.scale.wrapping_add(power),
        }
    }

    /// Raise this dimension to an integer power.
    pub const fn powi(self, power: i8) -> Self {
        let mut exponents = [0; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            exponents[i] = self.exponents[i].wrapping_mul(power);
            i += 1;
        }
        Self {
            exponents,
            scale: self.scale.wrapping_mul(power),
        }
    }

    /// Exponent of one base dimension.
    pub const fn exponent(&self, base: BaseDimension) -> i8 {
        self.exponents[base.index()]
    }

    /// The full exponent vector in basis order.
    pub const fn exponents(&self) -> [i8; BASE_COUNT] {
        self.exponents
    }

    /// The decimal scale exponent.
    pub const fn scale(&self) -> i8 {
        self.scale
    }

    /// Exact equality, usable in `const` context.
    pub const fn same_as(&self, other: &Dimension) -> bool {
        if self.scale != other.scale {
            return false;
        }
        let mut i = 0;
        while i < BASE_COUNT {
            if self.exponents[i] != other.exponents[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Whether every exponent and the scale are zero.
    pub const fn is_dimensionless(&self) -> bool {
        self.same_as(&Self::DIMENSIONLESS)
    }

    /// Unit product: exponents add.
    pub const fn mul(&self, other: &Dimension) -> Dimension {
        let mut exponents = [0; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            exponents[i] = self.exponents[i].wrapping_add(other.exponents[i]);
            i += 1;
        }
        Dimension {
            exponents,
            scale: self.scale.wrapping_add(other.scale),
        }
    }

    /// Unit quotient: exponents subtract.
    pub const fn div(&self, other: &Dimension) -> Dimension {
        self.mul(&other.recip())
    }

    /// Reciprocal unit: exponents negate.
    pub const fn recip(&self) -> Dimension {
        let mut exponents = [0; BASE_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            exponents[i] = self.exponents[i].wrapping_neg();
            i += 1;
        }
        Dimension {
            exponents,
            scale: self.scale.wrapping_neg(),
        }
    }
}

fn superscript(value: i8) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

impl std::fmt::Display for Dimension {
    /// Canonical rendering in basis order, e.g. `m·s⁻¹` or `10⁻³·s`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut terms = Vec::new();
        if self.scale != 0 {
            terms.push(format!("10{}", superscript(self.scale)));
        }
        for base in BaseDimension::ALL {
            match self.exponent(base) {
                0 => {}
                1 => terms.push(base.symbol().to_string()),
                e => terms.push(format!("{}{}", base.symbol(), superscript(e))),
            }
        }
        if terms.is_empty() {
            f.write_str("1")
        } else {
            f.write_str(&terms.join("·"))
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimension() -> impl Strategy<Value = Dimension> {
        (prop::array::uniform8(-12i8..12), -24i8..24)
            .prop_map(|(exponents, scale)| Dimension::new(exponents, scale))
    }

    proptest! {
        /// U · U⁻¹ is dimensionless for every unit.
        #[test]
        fn inverse_cancels(u in dimension()) {
            prop_assert!(u.mul(&u.recip()).is_dimensionless());
        }

        /// Multiplication is commutative.
        #[test]
        fn mul_commutes(a in dimension(), b in dimension()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        /// Multiplication is associative.
        #[test]
        fn mul_associates(a in dimension(), b in dimension(), c in dimension()) {
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }

        /// Division undoes multiplication.
        #[test]
        fn div_undoes_mul(a in dimension(), b in dimension()) {
            prop_assert_eq!(a.mul(&b).div(&b), a);
        }

        /// Dimensionless is the identity element.
        #[test]
        fn dimensionless_is_identity(a in dimension()) {
            prop_assert_eq!(a.mul(&Dimension::DIMENSIONLESS), a);
        }
    }
}
