//! # Unit Rules
//!
//! Each policy names the rule that derives its result unit from the operand
//! units. The rule exists in two forms:
//!
//! - [`UnitRule`], a runtime enum used by the policy table and runtime
//!   containers, returning [`PolicyError::UnitMismatch`] when the operand
//!   units fail the rule's precondition;
//! - zero-sized rule types ([`SameUnitRule`], [`ProductRule`], ...) whose
//!   generic associated `Output` type computes the result unit while the
//!   compiler resolves an operator. Their precondition is checked by
//!   [`BinaryUnitCheck`] / [`UnaryUnitCheck`] in `const` context, so a
//!   mismatch fails the build.

use std::marker::PhantomData;

use mvp_core::{OperationKind, PolicyError};
use mvp_units::{Dimension, Inverse, One, Product, Quotient, Unit};
use serde::{Deserialize, Serialize};

/// How an operation derives its result unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRule {
    /// Operands must have equal units; the result keeps it.
    SameUnit,
    /// Result unit is the product of the operand units.
    Product,
    /// Result unit is the quotient of the operand units.
    Quotient,
    /// Unary: the result keeps the operand unit.
    Preserve,
    /// Unary: the result has the reciprocal unit.
    Reciprocal,
    /// Operands must be dimensionless; so is the result.
    Dimensionless,
}

impl UnitRule {
    /// Whether the operand units satisfy this rule's precondition.
    ///
    /// Unary rules are evaluated with the operand passed as both `left` and
    /// `right`.
    pub const fn admits(self, left: &Dimension, right: &Dimension) -> bool {
        match self {
            Self::SameUnit => left.same_as(right),
            Self::Dimensionless => left.is_dimensionless() && right.is_dimensionless(),
            Self::Product | Self::Quotient | Self::Preserve | Self::Reciprocal => true,
        }
    }

    /// The result unit, assuming [`admits`](Self::admits) holds.
    pub const fn result(self, left: &Dimension, right: &Dimension) -> Dimension {
        match self {
            Self::SameUnit | Self::Preserve => *left,
            Self::Product => left.mul(right),
            Self::Quotient => left.div(right),
            Self::Reciprocal => left.recip(),
            Self::Dimensionless => Dimension::DIMENSIONLESS,
        }
    }

    /// Check the precondition and compute the result unit.
    pub fn apply(
        self,
        operation: OperationKind,
        left: Dimension,
        right: Dimension,
    ) -> Result<Dimension, PolicyError> {
        if self.admits(&left, &right) {
            Ok(self.result(&left, &right))
        } else {
            Err(PolicyError::UnitMismatch {
                operation,
                left,
                right,
            })
        }
    }

    /// Returns the snake_case identifier for this rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameUnit => "same_unit",
            Self::Product => "product",
            Self::Quotient => "quotient",
            Self::Preserve => "preserve",
            Self::Reciprocal => "reciprocal",
            Self::Dimensionless => "dimensionless",
        }
    }
}

impl std::fmt::Display for UnitRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Static rule types ──────────────────────────────────────────────

/// A unit rule for two operands, resolved at compile time.
pub trait BinaryUnitRule: 'static {
    /// The runtime counterpart of this rule.
    const RULE: UnitRule;
    /// Result unit for operand units `L` and `R`.
    type Output<L: Unit, R: Unit>: Unit;
}

/// A unit rule for one operand, resolved at compile time.
pub trait UnaryUnitRule: 'static {
    /// The runtime counterpart of this rule.
    const RULE: UnitRule;
    /// Result unit for operand unit `U`.
    type Output<U: Unit>: Unit;
}

/// Static [`UnitRule::SameUnit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SameUnitRule;

/// Static [`UnitRule::Product`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRule;

/// Static [`UnitRule::Quotient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotientRule;

/// Static [`UnitRule::Preserve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PreserveRule;

/// Static [`UnitRule::Reciprocal`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReciprocalRule;

/// Static [`UnitRule::Dimensionless`], for one or two operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionlessRule;

impl BinaryUnitRule for SameUnitRule {
    const RULE: UnitRule = UnitRule::SameUnit;
    type Output<L: Unit, R: Unit> = L;
}

impl BinaryUnitRule for ProductRule {
    const RULE: UnitRule = UnitRule::Product;
    type Output<L: Unit, R: Unit> = Product<L, R>;
}

impl BinaryUnitRule for QuotientRule {
    const RULE: UnitRule = UnitRule::Quotient;
    type Output<L: Unit, R: Unit> = Quotient<L, R>;
}

impl BinaryUnitRule for DimensionlessRule {
    const RULE: UnitRule = UnitRule::Dimensionless;
    type Output<L: Unit, R: Unit> = One;
}

impl UnaryUnitRule for PreserveRule {
    const RULE: UnitRule = UnitRule::Preserve;
    type Output<U: Unit> = U;
}

impl UnaryUnitRule for ReciprocalRule {
    const RULE: UnitRule = UnitRule::Reciprocal;
    type Output<U: Unit> = Inverse<U>;
}

impl UnaryUnitRule for DimensionlessRule {
    const RULE: UnitRule = UnitRule::Dimensionless;
    type Output<U: Unit> = One;
}

/// Compile-time precondition check of a binary rule.
///
/// Evaluating `BinaryUnitCheck::<Rule, L, R>::PASSED` inside a generic
/// function fails the build for every instantiation whose units the rule
/// rejects.
pub struct BinaryUnitCheck<Rule, L, R>(PhantomData<fn() -> (Rule, L, R)>);

impl<Rule: BinaryUnitRule, L: Unit, R: Unit> BinaryUnitCheck<Rule, L, R> {
    /// Evaluates to `()` when the units are admitted.
    pub const PASSED: () = assert!(
        Rule::RULE.admits(&L::DIMENSION, &R::DIMENSION),
        "operand units are incompatible with the operation's unit rule"
    );
}

/// Compile-time precondition check of a unary rule.
pub struct UnaryUnitCheck<Rule, U>(PhantomData<fn() -> (Rule, U)>);

impl<Rule: UnaryUnitRule, U: Unit> UnaryUnitCheck<Rule, U> {
    /// Evaluates to `()` when the unit is admitted.
    pub const PASSED: () = assert!(
        Rule::RULE.admits(&U::DIMENSION, &U::DIMENSION),
        "operand unit is incompatible with the operation's unit rule"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvp_units::{Metre, Millisecond, Second};

    #[test]
    fn same_unit_requires_equality() {
        let s = Second::DIMENSION;
        let ms = Millisecond::DIMENSION;
        assert_eq!(UnitRule::SameUnit.apply(OperationKind::Add, s, s), Ok(s));
        assert_eq!(
            UnitRule::SameUnit.apply(OperationKind::Add, s, ms),
            Err(PolicyError::UnitMismatch {
                operation: OperationKind::Add,
                left: s,
                right: ms,
            })
        );
    }

    #[test]
    fn product_and_quotient_combine() {
        let m = Metre::DIMENSION;
        let s = Second::DIMENSION;
        assert_eq!(UnitRule::Product.apply(OperationKind::Multiply, m, s), Ok(m.mul(&s)));
        assert_eq!(UnitRule::Quotient.apply(OperationKind::Divide, m, s), Ok(m.div(&s)));
    }

    #[test]
    fn unary_rules() {
        let s = Second::DIMENSION;
        assert_eq!(UnitRule::Preserve.apply(OperationKind::Transpose, s, s), Ok(s));
        assert_eq!(UnitRule::Reciprocal.apply(OperationKind::Invert, s, s), Ok(s.recip()));
    }

    #[test]
    fn dimensionless_rejects_dimensioned_operands() {
        let one = Dimension::DIMENSIONLESS;
        assert_eq!(UnitRule::Dimensionless.apply(OperationKind::And, one, one), Ok(one));
        assert!(UnitRule::Dimensionless
            .apply(OperationKind::And, Second::DIMENSION, one)
            .is_err());
    }

    #[test]
    fn static_rules_match_runtime_rules() {
        type Velocity = <QuotientRule as BinaryUnitRule>::Output<Metre, Second>;
        assert_eq!(
            Velocity::DIMENSION,
            UnitRule::Quotient.result(&Metre::DIMENSION, &Second::DIMENSION)
        );
        type Rate = <ReciprocalRule as UnaryUnitRule>::Output<Second>;
        assert_eq!(Rate::DIMENSION, Second::DIMENSION.recip());
        type Flag = <DimensionlessRule as BinaryUnitRule>::Output<One, One>;
        assert!(Flag::DIMENSION.is_dimensionless());
    }

    #[test]
    fn admitted_checks_evaluate() {
        let () = BinaryUnitCheck::<SameUnitRule, Second, Second>::PASSED;
        let () = BinaryUnitCheck::<ProductRule, Metre, Second>::PASSED;
        let () = UnaryUnitCheck::<DimensionlessRule, One>::PASSED;
    }
}
