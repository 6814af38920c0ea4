//! # Predefined Units
//!
//! Coherent SI base units, the prefixed units MRI protocols use (ms, µs,
//! mm, mT) and degree for angles. Domain code adds its own with
//! [`define_unit!`](crate::define_unit).

use crate::dimension::{BaseDimension, Dimension};
use crate::error::UnitError;
use crate::Unit;

const LENGTH: Dimension = Dimension::base(BaseDimension::Length);
const MASS: Dimension = Dimension::base(BaseDimension::Mass);
const TIME: Dimension = Dimension::base(BaseDimension::Time);
const CURRENT: Dimension = Dimension::base(BaseDimension::Current);

crate::define_unit!(
    /// The dimensionless unit.
    pub One, "", Dimension::DIMENSIONLESS
);
crate::define_unit!(
    /// Metre.
    pub Metre, "m", LENGTH
);
crate::define_unit!(
    /// Millimetre.
    pub Millimetre, "mm", LENGTH.scaled(-3)
);
crate::define_unit!(
    /// Kilogram.
    pub Kilogram, "kg", MASS
);
crate::define_unit!(
    /// Second.
    pub Second, "s", TIME
);
crate::define_unit!(
    /// Millisecond.
    pub Millisecond, "ms", TIME.scaled(-3)
);
crate::define_unit!(
    /// Microsecond.
    pub Microsecond, "us", TIME.scaled(-6)
);
crate::define_unit!(
    /// Ampere.
    pub Ampere, "A", CURRENT
);
crate::define_unit!(
    /// Kelvin.
    pub Kelvin, "K", Dimension::base(BaseDimension::Temperature)
);
crate::define_unit!(
    /// Mole.
    pub Mole, "mol", Dimension::base(BaseDimension::Amount)
);
crate::define_unit!(
    /// Candela.
    pub Candela, "cd", Dimension::base(BaseDimension::Luminosity)
);
crate::define_unit!(
    /// Degree of plane angle.
    pub Degree, "deg", Dimension::base(BaseDimension::Angle)
);
crate::define_unit!(
    /// Hertz, s⁻¹.
    pub Hertz, "Hz", TIME.recip()
);
crate::define_unit!(
    /// Tesla, kg·s⁻²·A⁻¹.
    pub Tesla, "T", MASS.div(&TIME.powi(2)).div(&CURRENT)
);
crate::define_unit!(
    /// Millitesla.
    pub Millitesla, "mT", MASS.div(&TIME.powi(2)).div(&CURRENT).scaled(-3)
);

/// Every predefined unit, keyed by symbol.
pub const PREDEFINED: &[(&str, Dimension)] = &[
    (One::SYMBOL, One::DIMENSION),
    (Metre::SYMBOL, Metre::DIMENSION),
    (Millimetre::SYMBOL, Millimetre::DIMENSION),
    (Kilogram::SYMBOL, Kilogram::DIMENSION),
    (Second::SYMBOL, Second::DIMENSION),
    (Millisecond::SYMBOL, Millisecond::DIMENSION),
    (Microsecond::SYMBOL, Microsecond::DIMENSION),
    (Ampere::SYMBOL, Ampere::DIMENSION),
    (Kelvin::SYMBOL, Kelvin::DIMENSION),
    (Mole::SYMBOL, Mole::DIMENSION),
    (Candela::SYMBOL, Candela::DIMENSION),
    (Degree::SYMBOL, Degree::DIMENSION),
    (Hertz::SYMBOL, Hertz::DIMENSION),
    (Tesla::SYMBOL, Tesla::DIMENSION),
    (Millitesla::SYMBOL, Millitesla::DIMENSION),
];

/// Look up a single predefined unit symbol.
pub fn lookup_symbol(symbol: &str) -> Result<Dimension, UnitError> {
    PREDEFINED
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, d)| *d)
        .ok_or_else(|| UnitError::UnknownSymbol(symbol.to_string()))
}

fn parse_factor(factor: &str) -> Result<Dimension, UnitError> {
    let factor = factor.trim();
    if factor.is_empty() || factor == "1" {
        return Ok(Dimension::DIMENSIONLESS);
    }
    match factor.split_once('^') {
        Some((symbol, power)) => {
            let power: i8 = power
                .trim()
                .parse()
                .map_err(|_| UnitError::InvalidExponent(factor.to_string()))?;
            Ok(lookup_symbol(symbol.trim())?.powi(power))
        }
        None => lookup_symbol(factor),
    }
}

fn parse_product(expr: &str) -> Result<Dimension, UnitError> {
    expr.split(['*', '·'])
        .try_fold(Dimension::DIMENSIONLESS, |acc, f| Ok(acc.mul(&parse_factor(f)?)))
}

/// Parse a unit expression built from predefined symbols.
///
/// Grammar: `product ['/' product]`, where a product is factors joined by
/// `*` or `·` and a factor is `symbol['^' integer]`. The empty string and
/// `"1"` are dimensionless.
pub fn parse(expr: &str) -> Result<Dimension, UnitError> {
    let mut parts = expr.split('/');
    let numerator = parse_product(parts.next().unwrap_or(""))?;
    let denominator = match parts.next() {
        Some(d) => parse_product(d.trim().trim_start_matches('(').trim_end_matches(')'))?,
        None => Dimension::DIMENSIONLESS,
    };
    if parts.next().is_some() {
        return Err(UnitError::Malformed(expr.to_string()));
    }
    Ok(numerator.div(&denominator))
}
