//! # Unit Marker Types
//!
//! A unit is a zero-sized type implementing [`Unit`]: its dimension is an
//! associated `const`, so two parameters' units can be combined and compared
//! while the compiler resolves an operator, before any value exists.
//!
//! Combinators build derived units structurally:
//!
//! ```
//! use mvp_units::{Dimension, Metre, Quotient, Second, Unit};
//!
//! type Velocity = Quotient<Metre, Second>;
//! const V: Dimension = Velocity::DIMENSION;
//! assert!(V.same_as(&Metre::DIMENSION.div(&Second::DIMENSION)));
//! assert_eq!(Velocity::symbol(), "m/s");
//! ```

use std::borrow::Cow;
use std::marker::PhantomData;

use crate::dimension::Dimension;

/// A compile-time unit of measure.
pub trait Unit: 'static {
    /// The unit's dimension, evaluated in `const` context.
    const DIMENSION: Dimension;

    /// Human-readable symbol (e.g. `"ms"`, `"m·s"`, `"m/s"`).
    ///
    /// The dimensionless unit renders as the empty string.
    fn symbol() -> Cow<'static, str>;
}

/// Product of two units, `A·B`.
pub struct Product<A, B>(PhantomData<fn() -> (A, B)>);

/// Quotient of two units, `A/B`.
pub struct Quotient<A, B>(PhantomData<fn() -> (A, B)>);

/// Reciprocal of a unit, `1/A`.
pub struct Inverse<A>(PhantomData<fn() -> A>);

fn needs_parens(symbol: &str) -> bool {
    symbol.contains('·') || symbol.contains('/')
}

impl<A: Unit, B: Unit> Unit for Product<A, B> {
    const DIMENSION: Dimension = A::DIMENSION.mul(&B::DIMENSION);

    fn symbol() -> Cow<'static, str> {
        let (a, b) = (A::symbol(), B::symbol());
        match (a.is_empty(), b.is_empty()) {
            (true, _) => b,
            (_, true) => a,
            _ => Cow::Owned(format!("{a}·{b}")),
        }
    }
}

impl<A: Unit, B: Unit> Unit for Quotient<A, B> {
    const DIMENSION: Dimension = A::DIMENSION.div(&B::DIMENSION);

    fn symbol() -> Cow<'static, str> {
        let (a, b) = (A::symbol(), B::symbol());
        if b.is_empty() {
            return a;
        }
        let numerator = if a.is_empty() { Cow::Borrowed("1") } else { a };
        if needs_parens(&b) {
            Cow::Owned(format!("{numerator}/({b})"))
        } else {
            Cow::Owned(format!("{numerator}/{b}"))
        }
    }
}

impl<A: Unit> Unit for Inverse<A> {
    const DIMENSION: Dimension = A::DIMENSION.recip();

    fn symbol() -> Cow<'static, str> {
        let a = A::symbol();
        if a.is_empty() {
            a
        } else if needs_parens(&a) {
            Cow::Owned(format!("1/({a})"))
        } else {
            Cow::Owned(format!("1/{a}"))
        }
    }
}

/// Whether two units have exactly the same dimension.
pub const fn same_unit<A: Unit, B: Unit>() -> bool {
    A::DIMENSION.same_as(&B::DIMENSION)
}

/// Declare a named unit marker type.
///
/// ```
/// use mvp_units::{define_unit, BaseDimension, Dimension, Unit};
///
/// define_unit!(
///     /// Gauss, a CGS flux density unit kept for legacy protocols.
///     pub Gauss, "G", Dimension::base(BaseDimension::Mass)
///         .div(&Dimension::base(BaseDimension::Time).powi(2))
///         .div(&Dimension::base(BaseDimension::Current))
///         .scaled(-4)
/// );
/// assert_eq!(Gauss::symbol(), "G");
/// assert_eq!(Gauss::SYMBOL, "G");
/// ```
#[macro_export]
macro_rules! define_unit {
    ($(#[$meta:meta])* $vis:vis $name:ident, $symbol:literal, $dimension:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Symbol of this unit.
            pub const SYMBOL: &'static str = $symbol;
        }

        impl $crate::Unit for $name {
            const DIMENSION: $crate::Dimension = $dimension;

            fn symbol() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($symbol)
            }
        }
    };
}
