//! # Tagged Parameter — Heterogeneous Runtime Storage
//!
//! [`Parameter`] holds exactly one [`ParameterValue`] of a fixed set of
//! kinds, a [`TypeTag`] naming what the parameter is, and the observer
//! bookkeeping used for change notification. It carries no unit: unit
//! checking belongs to [`TypedParameter`](crate::TypedParameter).
//!
//! ## Enumerations
//!
//! Enumerated values are stored as an [`EnumHolder`], an integer plus the tag
//! of the enum type that produced it. Reading back under a different enum
//! type fails:
//!
//! ```
//! use mvp_core::ParameterError;
//! use mvp_param::{parameter_enum, Parameter};
//!
//! parameter_enum! {
//!     pub enum FatSat { Off = 0, On = 1 }
//! }
//! parameter_enum! {
//!     pub enum ScanMode { ModeA = 0, ModeB = 1 }
//! }
//!
//! let mut p = Parameter::default();
//! p.set_enum(FatSat::On);
//! assert_eq!(p.get_enum::<FatSat>(), Ok(FatSat::On));
//! assert!(matches!(
//!     p.get_enum::<ScanMode>(),
//!     Err(ParameterError::EnumTypeMismatch { .. })
//! ));
//! ```
//!
//! ## Observers
//!
//! A parameter keeps [`Weak`] references to its observers. Every mutation
//! calls [`Parameter::notify_observers`], which hands the parameter to each
//! live observer's [`Observer::on_notified`]. `RefCell<Parameter>` is an
//! observer: it runs the handler registered for the notifier's tag, if any.
//!
//! Notification is synchronous. A handler that mutates a parameter which is
//! currently notifying (directly or through a cycle) finds it already
//! borrowed; that notification is skipped with a warning rather than
//! recursing. Callers that build observer cycles own the consequences.

use std::any::type_name;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use mvp_core::{ApproxEq, Matrix3, ParameterError, Primitive, Quaternion, Vector3};

// ─── Type tags ──────────────────────────────────────────────────────

/// Identity of a notifier or enum type, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// A tag from a fixed name.
    pub const fn new(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// The tag of a Rust type, from its type name.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(type_name::<T>())
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeTag {
    fn from(tag: &'static str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

// ─── Enumerations ───────────────────────────────────────────────────

/// An enum value stored as its integer together with its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumHolder {
    /// Integer value of the variant.
    pub value: i64,
    /// Tag of the enum type.
    pub tag: TypeTag,
}

impl EnumHolder {
    /// Wrap a variant.
    pub fn new<E: ParameterEnum>(value: E) -> Self {
        Self {
            value: value.to_i64(),
            tag: E::tag(),
        }
    }
}

/// An enum that can be stored in a [`Parameter`].
///
/// Usually implemented with [`parameter_enum!`](crate::parameter_enum).
pub trait ParameterEnum: Copy + 'static {
    /// Identity of this enum type.
    fn tag() -> TypeTag {
        TypeTag::of::<Self>()
    }

    /// The variant's integer value.
    fn to_i64(self) -> i64;

    /// The variant with this integer value, if any.
    fn from_i64(value: i64) -> Option<Self>;
}

/// Declare a fieldless enum with explicit discriminants and implement
/// [`ParameterEnum`] for it.
#[macro_export]
macro_rules! parameter_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i64)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $crate::ParameterEnum for $name {
            fn to_i64(self) -> i64 {
                self as i64
            }

            fn from_i64(value: i64) -> ::std::option::Option<Self> {
                $(
                    if value == $value {
                        return ::std::option::Option::Some(Self::$variant);
                    }
                )+
                ::std::option::Option::None
            }
        }
    };
}

// ─── Values ─────────────────────────────────────────────────────────

/// The value held by a [`Parameter`]: exactly one of a closed set of kinds.
#[derive(Debug, Clone)]
pub enum ParameterValue {
    /// 32-bit integer.
    Int(i32),
    /// Double-precision number.
    Double(f64),
    /// Truth value.
    Bool(bool),
    /// Character string.
    Text(String),
    /// Sequence of integers.
    IntList(Vec<i32>),
    /// Sequence of doubles.
    DoubleList(Vec<f64>),
    /// Sequence of truth values.
    BoolList(Vec<bool>),
    /// Sequence of strings.
    TextList(Vec<String>),
    /// 3-element column vector.
    Vector3(Vector3),
    /// 3×3 matrix.
    Matrix3(Matrix3),
    /// Quaternion.
    Quaternion(Quaternion),
    /// Sequence of column vectors.
    Vector3List(Vec<Vector3>),
    /// Sequence of matrices.
    Matrix3List(Vec<Matrix3>),
    /// Sequence of quaternions.
    QuaternionList(Vec<Quaternion>),
    /// Enum variant with the tag of its enum type.
    Enum(EnumHolder),
}

/// A Rust type storable as one [`ParameterValue`] kind.
pub trait ParameterKind: Sized + 'static {
    /// Kind name used in diagnostics.
    const KIND: &'static str;

    /// Wrap as a value.
    fn into_value(self) -> ParameterValue;

    /// Borrow the payload when `value` holds this kind.
    fn from_value(value: &ParameterValue) -> Option<&Self>;
}

macro_rules! parameter_kinds {
    ($($t:ty => $variant:ident, $kind:literal;)*) => {
        impl ParameterValue {
            /// Name of the active kind.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $kind,)*
                }
            }
        }

        $(
            impl ParameterKind for $t {
                const KIND: &'static str = $kind;

                fn into_value(self) -> ParameterValue {
                    ParameterValue::$variant(self)
                }

                fn from_value(value: &ParameterValue) -> Option<&Self> {
                    match value {
                        ParameterValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$t> for ParameterValue {
                fn from(value: $t) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$t> for Parameter {
                fn from(value: $t) -> Self {
                    Self::new(ParameterValue::$variant(value))
                }
            }
        )*
    };
}

parameter_kinds! {
    i32 => Int, "int";
    f64 => Double, "double";
    bool => Bool, "bool";
    String => Text, "text";
    Vec<i32> => IntList, "int_list";
    Vec<f64> => DoubleList, "double_list";
    Vec<bool> => BoolList, "bool_list";
    Vec<String> => TextList, "text_list";
    Vector3 => Vector3, "vector3";
    Matrix3 => Matrix3, "matrix3";
    Quaternion => Quaternion, "quaternion";
    Vec<Vector3> => Vector3List, "vector3_list";
    Vec<Matrix3> => Matrix3List, "matrix3_list";
    Vec<Quaternion> => QuaternionList, "quaternion_list";
    EnumHolder => Enum, "enum";
}

fn all_approx<T: ApproxEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_approx(y))
}

fn render_list<T: Primitive>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(Primitive::render).collect();
    format!("[{}]", parts.join(", "))
}

impl PartialEq for ParameterValue {
    /// Different kinds are never equal. Vectors, matrices and quaternions
    /// compare approximately, everything else exactly.
    fn eq(&self, other: &Self) -> bool {
        use ParameterValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Double(a), Double(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (IntList(a), IntList(b)) => a == b,
            (DoubleList(a), DoubleList(b)) => a == b,
            (BoolList(a), BoolList(b)) => a == b,
            (TextList(a), TextList(b)) => a == b,
            (Vector3(a), Vector3(b)) => a.is_approx(b),
            (Matrix3(a), Matrix3(b)) => a.is_approx(b),
            (Quaternion(a), Quaternion(b)) => a.is_approx(b),
            (Vector3List(a), Vector3List(b)) => all_approx(a, b),
            (Matrix3List(a), Matrix3List(b)) => all_approx(a, b),
            (QuaternionList(a), QuaternionList(b)) => all_approx(a, b),
            (Enum(a), Enum(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for ParameterValue {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParameterValue::*;
        let text = match self {
            Int(v) => v.render(),
            Double(v) => v.render(),
            Bool(v) => v.render(),
            Text(v) => v.clone(),
            IntList(v) => render_list(v),
            DoubleList(v) => render_list(v),
            BoolList(v) => render_list(v),
            TextList(v) => render_list(v),
            Vector3(v) => v.render(),
            Matrix3(v) => v.render(),
            Quaternion(v) => v.render(),
            Vector3List(v) => render_list(v),
            Matrix3List(v) => render_list(v),
            QuaternionList(v) => render_list(v),
            Enum(e) => format!("{}({})", e.tag, e.value),
        };
        f.write_str(&text)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// ─── Parameter ──────────────────────────────────────────────────────

/// Callback run on an observer when a notifier with a given tag changes.
/// Receives the observer and the notifier.
pub type NotificationHandler = Rc<dyn Fn(&mut Parameter, &Parameter)>;

/// Receiver of change notifications.
pub trait Observer {
    /// Called after `notifier` changed.
    fn on_notified(&self, notifier: &Parameter);
}

/// A single tagged value with observers.
#[derive(Clone, Default)]
pub struct Parameter {
    value: ParameterValue,
    tag: Option<TypeTag>,
    observers: Vec<Weak<dyn Observer>>,
    handlers: HashMap<TypeTag, NotificationHandler>,
}

impl Parameter {
    /// A parameter holding `value`, with the default tag.
    pub fn new(value: impl Into<ParameterValue>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the tag observers use to pick a handler.
    pub fn with_tag(mut self, tag: impl Into<TypeTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The notifier tag. Untagged parameters share the tag of [`Parameter`].
    pub fn tag(&self) -> TypeTag {
        self.tag.clone().unwrap_or_else(TypeTag::of::<Parameter>)
    }

    /// The active value.
    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    /// Borrow the value as `T`.
    pub fn get<T: ParameterKind>(&self) -> Result<&T, ParameterError> {
        T::from_value(&self.value).ok_or(ParameterError::KindMismatch {
            stored: self.value.kind(),
            requested: T::KIND,
        })
    }

    /// Replace the value with a `T` and notify observers.
    pub fn set<T: ParameterKind>(&mut self, value: T) {
        self.set_value(value.into_value());
    }

    /// Replace the value and notify observers.
    pub fn set_value(&mut self, value: ParameterValue) {
        self.value = value;
        self.notify_observers();
    }

    /// Store an enum variant with its type tag and notify observers.
    pub fn set_enum<E: ParameterEnum>(&mut self, value: E) {
        self.set_value(ParameterValue::Enum(EnumHolder::new(value)));
    }

    /// Read back an enum variant stored by [`Parameter::set_enum`].
    ///
    /// Fails with [`ParameterError::EnumTypeMismatch`] when the stored tag is
    /// not `E`'s and with [`ParameterError::InvalidEnumValue`] when the
    /// integer is not a variant of `E`.
    pub fn get_enum<E: ParameterEnum>(&self) -> Result<E, ParameterError> {
        let holder = self.get::<EnumHolder>()?;
        let requested = E::tag();
        if holder.tag != requested {
            return Err(ParameterError::EnumTypeMismatch {
                stored: holder.tag.to_string(),
                requested: requested.to_string(),
            });
        }
        E::from_i64(holder.value).ok_or_else(|| ParameterError::InvalidEnumValue {
            enum_tag: requested.to_string(),
            value: holder.value,
        })
    }

    /// Register an observer. Only a weak reference is kept.
    pub fn add_observer<O: Observer + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<dyn Observer> = Rc::downgrade(observer) as Weak<dyn Observer>;
        self.observers.push(weak);
    }

    /// Unregister an observer, along with any observers already dropped.
    pub fn remove_observer<O: Observer + 'static>(&mut self, observer: &Rc<O>) {
        let target = Rc::as_ptr(observer) as *const ();
        self.observers
            .retain(|w| w.strong_count() > 0 && w.as_ptr() as *const () != target);
    }

    /// Number of registered observers still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Hand this parameter to every live observer.
    pub fn notify_observers(&self) {
        tracing::trace!(
            notifier = %self.tag(),
            observers = self.observers.len(),
            "notifying observers"
        );
        for observer in &self.observers {
            if let Some(observer) = observer.upgrade() {
                observer.on_notified(self);
            }
        }
    }

    /// Run the handler registered for `notifier`'s tag, if any.
    pub fn on_notified(&mut self, notifier: &Parameter) {
        let Some(handler) = self.handlers.get(&notifier.tag()).cloned() else {
            return;
        };
        handler(self, notifier);
    }

    /// Register `handler` for notifications from parameters tagged `tag`,
    /// replacing any previous handler for that tag.
    pub fn set_notification_handler(
        &mut self,
        tag: impl Into<TypeTag>,
        handler: impl Fn(&mut Parameter, &Parameter) + 'static,
    ) {
        self.handlers.insert(tag.into(), Rc::new(handler));
    }

    /// The value rendered as text.
    pub fn value_as_string(&self) -> String {
        self.value.to_string()
    }
}

impl Observer for RefCell<Parameter> {
    fn on_notified(&self, notifier: &Parameter) {
        match self.try_borrow_mut() {
            Ok(mut observer) => Parameter::on_notified(&mut observer, notifier),
            Err(_) => tracing::warn!(
                notifier = %notifier.tag(),
                "observer is already borrowed, notification skipped"
            ),
        }
    }
}

impl PartialEq for Parameter {
    /// Compares values only; tags and observers are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<&TypeTag> = self.handlers.keys().collect();
        f.debug_struct("Parameter")
            .field("value", &self.value)
            .field("tag", &self.tag())
            .field("observers", &self.observers.len())
            .field("handlers", &handlers)
            .finish()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl From<ParameterValue> for Parameter {
    fn from(value: ParameterValue) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    parameter_enum! {
        enum FatSat { Off = 0, On = 1 }
    }

    parameter_enum! {
        enum ScanMode { ModeA = 0, ModeB = 1, ModeC = 2 }
    }

    #[test]
    fn holds_every_kind() {
        let p = Parameter::from(42);
        assert_eq!(p.get::<i32>(), Ok(&42));
        let p = Parameter::from(2.75);
        assert_eq!(p.get::<f64>(), Ok(&2.75));
        let p = Parameter::from("hello");
        assert_eq!(p.get::<String>().map(String::as_str), Ok("hello"));
        let p = Parameter::from(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p.get::<Vector3>().map(|v| v.y), Ok(2.0));
        let p = Parameter::from(vec![Matrix3::identity(), Matrix3::identity()]);
        assert_eq!(p.get::<Vec<Matrix3>>().map(Vec::len), Ok(2));
        let p = Parameter::from(Quaternion::identity());
        assert_eq!(p.value().kind(), "quaternion");
    }

    #[test]
    fn wrong_kind_is_reported() {
        let p = Parameter::from(42);
        assert_eq!(
            p.get::<f64>(),
            Err(ParameterError::KindMismatch {
                stored: "int",
                requested: "double"
            })
        );
    }

    #[test]
    fn default_is_integer_zero() {
        assert_eq!(Parameter::default().get::<i32>(), Ok(&0));
    }

    #[test]
    fn equality_checks_kind_then_value() {
        assert_ne!(Parameter::from(1), Parameter::from(1.0));
        assert_eq!(Parameter::from(vec![1, 2]), Parameter::from(vec![1, 2]));

        let identity = vec![Matrix3::identity(), Matrix3::identity()];
        let original = Parameter::from(identity.clone());
        let copy = original.clone();
        assert_eq!(original, copy);

        let mut changed = original.clone();
        changed.set(vec![Matrix3::zeros(), Matrix3::identity()]);
        assert_ne!(changed, original);

        let nudged = Vector3::new(1.0, 2.0, 3.0) * (1.0 + 1e-14);
        assert_eq!(
            Parameter::from(Vector3::new(1.0, 2.0, 3.0)),
            Parameter::from(nudged)
        );
    }

    #[test]
    fn enum_round_trip_and_type_safety() {
        let mut p = Parameter::default();
        p.set_enum(FatSat::On);
        assert_eq!(p.get_enum::<FatSat>(), Ok(FatSat::On));

        p.set_enum(ScanMode::ModeB);
        assert_eq!(p.get_enum::<ScanMode>(), Ok(ScanMode::ModeB));
        assert!(matches!(
            p.get_enum::<FatSat>(),
            Err(ParameterError::EnumTypeMismatch { .. })
        ));

        p.set_enum(FatSat::Off);
        assert_eq!(p.get_enum::<FatSat>(), Ok(FatSat::Off));
    }

    #[test]
    fn enum_read_of_non_enum_is_a_kind_mismatch() {
        let p = Parameter::from(true);
        assert_eq!(
            p.get_enum::<FatSat>(),
            Err(ParameterError::KindMismatch {
                stored: "bool",
                requested: "enum"
            })
        );
    }

    #[test]
    fn invalid_enum_integer_is_rejected() {
        let p = Parameter::from(EnumHolder {
            value: 7,
            tag: FatSat::tag(),
        });
        assert!(matches!(
            p.get_enum::<FatSat>(),
            Err(ParameterError::InvalidEnumValue { value: 7, .. })
        ));
    }

    #[test]
    fn rendering() {
        assert_eq!(Parameter::from(true).value_as_string(), "true");
        assert_eq!(Parameter::from(vec![true, false]).to_string(), "[true, false]");
        assert_eq!(Parameter::from(vec![1.5, 2.0]).to_string(), "[1.5, 2]");
        assert_eq!(
            Parameter::from(Vector3::new(1.0, 2.0, 3.0)).to_string(),
            "[1; 2; 3]"
        );
    }

    #[test]
    fn observer_runs_handler_for_notifier_tag() {
        let seen = Rc::new(Cell::new(0.0));
        let tr = Rc::new(RefCell::new(Parameter::from(20.0).with_tag("TR")));
        let sink = Rc::clone(&seen);
        tr.borrow_mut()
            .set_notification_handler("TE", move |this, notifier| {
                let te = *notifier.get::<f64>().unwrap_or(&0.0);
                sink.set(te);
                this.set(te * 2.0);
            });

        let mut te = Parameter::from(10.0).with_tag("TE");
        te.add_observer(&tr);
        te.set(12.0);

        assert_eq!(seen.get(), 12.0);
        assert_eq!(tr.borrow().get::<f64>(), Ok(&24.0));
    }

    #[test]
    fn no_handler_for_other_notifier_tags() {
        let calls = Rc::new(Cell::new(0));
        let observer = Rc::new(RefCell::new(Parameter::default()));
        let counter = Rc::clone(&calls);
        observer
            .borrow_mut()
            .set_notification_handler("TE", move |_, _| counter.set(counter.get() + 1));

        let mut flip_angle = Parameter::from(90.0).with_tag("Flip Angle");
        flip_angle.add_observer(&observer);
        flip_angle.set(45.0);
        assert_eq!(calls.get(), 0);

        let mut untagged = Parameter::from(1);
        untagged.add_observer(&observer);
        untagged.notify_observers();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dropped_and_removed_observers_are_skipped() {
        let calls = Rc::new(Cell::new(0));
        let make_observer = || {
            let observer = Rc::new(RefCell::new(Parameter::default()));
            let counter = Rc::clone(&calls);
            observer
                .borrow_mut()
                .set_notification_handler("TE", move |_, _| counter.set(counter.get() + 1));
            observer
        };

        let mut te = Parameter::from(1.0).with_tag("TE");
        let kept = make_observer();
        let removed = make_observer();
        te.add_observer(&kept);
        te.add_observer(&removed);
        {
            let dropped = make_observer();
            te.add_observer(&dropped);
        }
        assert_eq!(te.observer_count(), 2);

        te.remove_observer(&removed);
        te.set(2.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn reentrant_notification_is_skipped() {
        let shared = Rc::new(RefCell::new(Parameter::from(1.0).with_tag("TE")));
        shared
            .borrow_mut()
            .set_notification_handler("TE", |this, _| this.set(0.0));
        shared.borrow_mut().add_observer(&shared);

        shared.borrow_mut().set(5.0);
        assert_eq!(shared.borrow().get::<f64>(), Ok(&5.0));
    }

    #[test]
    fn clones_share_observers_but_not_values() {
        let calls = Rc::new(Cell::new(0));
        let observer = Rc::new(RefCell::new(Parameter::default()));
        let counter = Rc::clone(&calls);
        observer
            .borrow_mut()
            .set_notification_handler("TE", move |_, _| counter.set(counter.get() + 1));

        let mut original = Parameter::from(1.0).with_tag("TE");
        original.add_observer(&observer);
        let mut copy = original.clone();
        copy.set(3.0);

        assert_eq!(original.get::<f64>(), Ok(&1.0));
        assert_eq!(calls.get(), 1);
    }
}
