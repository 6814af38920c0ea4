//! # Parameter Declarations
//!
//! Two macros turn a display name into a concrete parameter type:
//!
//! - [`declare_parameter!`](crate::declare_parameter) wraps a
//!   [`TypedParameter`](crate::TypedParameter) in a nominal newtype, so
//!   "Echo Time" and "Repetition Time" are distinct types even when both
//!   hold milliseconds.
//! - [`register_parameter!`](crate::register_parameter) names a tagged
//!   [`Parameter`](crate::Parameter) and derives its notifier tag and
//!   [`name_hash`] from the display name.
//!
//! ```
//! use mvp_param::{declare_parameter, AnyParameter};
//! use mvp_units::Millisecond;
//!
//! declare_parameter!(
//!     /// Echo time.
//!     pub EchoTime, "Echo Time", f64, Millisecond
//! );
//!
//! let te = EchoTime::from(vec![10.0, 11.0, 12.0]);
//! assert_eq!(EchoTime::NAME, "Echo Time");
//! assert_eq!(EchoTime::unit_symbol(), "ms");
//! assert_eq!(te.name(), "Echo Time");
//! assert_eq!(te[1], 11.0);
//!
//! // Arithmetic yields a plain container; rebinding restores the newtype.
//! let doubled = EchoTime::from((&*te + &*te).unwrap());
//! assert_eq!(doubled.value(), 20.0);
//! ```

use std::any::TypeId;

use crate::registry::{AnyParameter, ParameterDescriptor};

/// Rolling ×101 hash of a parameter name, usable in `const` context.
pub const fn name_hash(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        hash = hash.wrapping_mul(101).wrapping_add(bytes[i] as u32);
        i += 1;
    }
    hash
}

/// A parameter type produced by [`declare_parameter!`](crate::declare_parameter).
pub trait DeclaredParameter: AnyParameter + Default + 'static {
    /// Display name.
    const NAME: &'static str;

    /// Registry descriptor for this type.
    fn descriptor() -> ParameterDescriptor {
        let sample = Self::default();
        ParameterDescriptor {
            name: Self::NAME,
            unit_symbol: sample.unit_symbol(),
            category: sample.category(),
            type_id: TypeId::of::<Self>(),
            create: || -> Box<dyn AnyParameter> { Box::new(Self::default()) },
        }
    }
}

/// Declare a nominal typed parameter.
///
/// `declare_parameter!(Name, "Display Name", T, Unit)` defines `Name`, a
/// newtype over `TypedParameter<T, Unit>` that dereferences to it, is named
/// `"Display Name"`, and implements [`AnyParameter`] and
/// [`DeclaredParameter`].
#[macro_export]
macro_rules! declare_parameter {
    ($(#[$meta:meta])* $vis:vis $name:ident, $display:literal, $ty:ty, $unit:ty $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::TypedParameter<$ty, $unit>);

        impl $name {
            /// Display name.
            pub const NAME: &'static str = $display;

            /// An empty parameter.
            pub fn new() -> Self {
                Self($crate::TypedParameter::<$ty, $unit>::new().named($display))
            }

            /// Symbol of this parameter's unit.
            pub fn unit_symbol() -> ::std::borrow::Cow<'static, str> {
                <$unit as $crate::Unit>::symbol()
            }

            /// Unwrap the typed container.
            pub fn into_inner(self) -> $crate::TypedParameter<$ty, $unit> {
                self.0
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::std::convert::From<$ty> for $name {
            fn from(value: $ty) -> Self {
                Self($crate::TypedParameter::<$ty, $unit>::from_value(value).named($display))
            }
        }

        impl ::std::convert::From<::std::vec::Vec<$ty>> for $name {
            fn from(values: ::std::vec::Vec<$ty>) -> Self {
                Self($crate::TypedParameter::<$ty, $unit>::from_values(values).named($display))
            }
        }

        impl<const N: usize> ::std::convert::From<[$ty; N]> for $name {
            fn from(values: [$ty; N]) -> Self {
                Self(
                    $crate::TypedParameter::<$ty, $unit>::from_values(::std::vec::Vec::from(values))
                        .named($display),
                )
            }
        }

        impl ::std::convert::From<$crate::TypedParameter<$ty, $unit>> for $name {
            fn from(parameter: $crate::TypedParameter<$ty, $unit>) -> Self {
                Self(parameter.named($display))
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::TypedParameter<$ty, $unit>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $crate::AnyParameter for $name {
            fn name(&self) -> &str {
                self.0.name()
            }

            fn unit_symbol(&self) -> ::std::borrow::Cow<'static, str> {
                self.0.unit_symbol()
            }

            fn category(&self) -> $crate::Category {
                self.0.category()
            }

            fn value_as_string(&self) -> ::std::string::String {
                self.0.value_as_string()
            }

            fn type_identity(&self) -> ::std::any::TypeId {
                ::std::any::TypeId::of::<Self>()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl $crate::DeclaredParameter for $name {
            const NAME: &'static str = $display;
        }
    };
}

/// Declare a tagged parameter.
///
/// `register_parameter!(Name, "TEXT")` defines a unit struct `Name` with
/// `NAME`, `ID_HASH`, its notifier [`tag`](crate::TypeTag) and a
/// constructor for a [`Parameter`](crate::Parameter) carrying that tag.
///
/// ```
/// use mvp_param::register_parameter;
///
/// register_parameter!(pub RepetitionTime, "TR");
///
/// let tr = RepetitionTime::parameter(20.0);
/// assert_eq!(tr.tag(), RepetitionTime::tag());
/// assert_eq!(RepetitionTime::ID_HASH, 84 * 101 + 82);
/// ```
#[macro_export]
macro_rules! register_parameter {
    ($(#[$meta:meta])* $vis:vis $name:ident, $display:literal $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Display name.
            pub const NAME: &'static str = $display;

            /// Hash of the display name.
            pub const ID_HASH: u32 = $crate::name_hash($display);

            /// Notifier tag of parameters of this type.
            pub const fn tag() -> $crate::TypeTag {
                $crate::TypeTag::new($display)
            }

            /// A tagged parameter holding `value`.
            pub fn parameter(
                value: impl ::std::convert::Into<$crate::ParameterValue>,
            ) -> $crate::Parameter {
                $crate::Parameter::new(value).with_tag(Self::tag())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ParameterValue};
    use mvp_units::{Degree, Millisecond};

    declare_parameter!(EchoTime, "Echo Time", f64, Millisecond);
    declare_parameter!(RepetitionTime, "Repetition Time", f64, Millisecond);
    declare_parameter!(FlipAngle, "Flip Angle", f64, Degree);
    register_parameter!(Te, "TE");
    register_parameter!(LoopCounterPe, "Loop Counter PE");

    #[test]
    fn hash_matches_rolling_formula() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("TE"), 84 * 101 + 69);
        assert_eq!(Te::ID_HASH, name_hash("TE"));
        assert_ne!(LoopCounterPe::ID_HASH, Te::ID_HASH);
    }

    #[test]
    fn hash_wraps_for_long_names() {
        let long = "Readout Oversampling Factor In Phase Direction";
        let expected = long
            .bytes()
            .fold(0u32, |h, b| h.wrapping_mul(101).wrapping_add(u32::from(b)));
        assert_eq!(name_hash(long), expected);
    }

    #[test]
    fn declared_types_are_distinct() {
        let te = EchoTime::from(10.0);
        let tr = RepetitionTime::from(10.0);
        assert_ne!(te.type_identity(), tr.type_identity());
        assert_eq!(te.name(), "Echo Time");
        assert_eq!(tr.name(), "Repetition Time");
        assert_eq!(*te, *tr);
    }

    #[test]
    fn construction_and_deref() {
        let mut te = EchoTime::from([10.0, 11.0, 12.0]);
        te[1] = 0.5;
        assert_eq!(te.values(), &[10.0, 0.5, 12.0]);
        assert_eq!(te.size(), 3);
        assert_eq!(EchoTime::new().value(), 0.0);
        assert_eq!(EchoTime::default().name(), EchoTime::NAME);
        assert_eq!(FlipAngle::unit_symbol(), "deg");
    }

    #[test]
    fn rebinding_from_a_result_restores_the_name() {
        let te = EchoTime::from(10.0);
        let tr = RepetitionTime::from(25.0);
        let sum = (&*te + &*tr).unwrap();
        assert_eq!(sum.name(), "");
        let rebound = RepetitionTime::from(sum);
        assert_eq!(rebound.name(), "Repetition Time");
        assert_eq!(rebound.value(), 35.0);
    }

    #[test]
    fn descriptor_describes_the_type() {
        let d = FlipAngle::descriptor();
        assert_eq!(d.name, "Flip Angle");
        assert_eq!(d.unit_symbol, "deg");
        assert_eq!(d.category, Category::Scalar);
        assert_eq!(d.type_id, TypeId::of::<FlipAngle>());
        assert_eq!((d.create)().type_identity(), TypeId::of::<FlipAngle>());
    }

    #[test]
    fn registered_parameter_carries_its_tag() {
        let te = Te::parameter(10.0);
        assert_eq!(te.tag().as_str(), "TE");
        assert_eq!(te.value(), &ParameterValue::Double(10.0));
        assert_eq!(LoopCounterPe::parameter(3).get::<i32>(), Ok(&3));
    }
}
