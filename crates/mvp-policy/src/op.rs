//! # Operation Markers
//!
//! One zero-sized type per [`OperationKind`], used as the `Op` parameter of
//! [`BinaryPolicy`](crate::BinaryPolicy) and
//! [`UnaryPolicy`](crate::UnaryPolicy). The set is sealed and mirrors
//! `OperationKind` one to one.

use mvp_core::OperationKind;

mod private {
    pub trait Sealed {}
}

/// Marker trait for operation types. Sealed.
pub trait Operation: private::Sealed + 'static {
    /// The runtime operation this marker stands for.
    const KIND: OperationKind;
}

macro_rules! define_operations {
    ($($(#[$meta:meta])* $name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl private::Sealed for $name {}

            impl Operation for $name {
                const KIND: OperationKind = OperationKind::$kind;
            }
        )*
    };
}

define_operations! {
    /// `a + b`.
    AddOp => Add,
    /// `a - b`.
    SubtractOp => Subtract,
    /// `a * b`.
    MultiplyOp => Multiply,
    /// `a / b`.
    DivideOp => Divide,
    /// Logical and.
    AndOp => And,
    /// Logical or.
    OrOp => Or,
    /// Logical exclusive or.
    XorOp => Xor,
    /// Logical equivalence.
    XnorOp => Xnor,
    /// Logical negation.
    NotOp => Not,
    /// Inner product.
    DotOp => Dot,
    /// Cross product.
    CrossOp => Cross,
    /// Transpose.
    TransposeOp => Transpose,
    /// Matrix inverse.
    InvertOp => Invert,
    /// Coefficient-wise product.
    ElementwiseMultiplyOp => ElementwiseMultiply,
    /// Coefficient-wise quotient.
    ElementwiseDivideOp => ElementwiseDivide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_cover_every_operation_once() {
        let kinds = [
            AddOp::KIND,
            SubtractOp::KIND,
            MultiplyOp::KIND,
            DivideOp::KIND,
            AndOp::KIND,
            OrOp::KIND,
            XorOp::KIND,
            XnorOp::KIND,
            NotOp::KIND,
            DotOp::KIND,
            CrossOp::KIND,
            TransposeOp::KIND,
            InvertOp::KIND,
            ElementwiseMultiplyOp::KIND,
            ElementwiseDivideOp::KIND,
        ];
        assert_eq!(kinds, OperationKind::ALL);
    }
}
