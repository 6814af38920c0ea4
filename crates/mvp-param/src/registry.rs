//! # Parameter Registry
//!
//! Object-safe access to parameters of different concrete types:
//!
//! - [`AnyParameter`] is the dynamic interface every container implements.
//! - [`ParameterContainer`] holds the parameters of one sequence in
//!   insertion order and finds them by name.
//! - [`TypeRegistry`] maps display names to [`ParameterDescriptor`]s, from
//!   which fresh default instances can be created.
//!
//! Both are plain values owned by the caller; nothing is registered
//! globally.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use mvp_core::{Category, Primitive, RegistryError};
use mvp_units::Unit;

use crate::declare::DeclaredParameter;
use crate::dynamic::DynTypedParameter;
use crate::typed::TypedParameter;

/// Type-erased view of a parameter.
pub trait AnyParameter: fmt::Debug {
    /// Display name.
    fn name(&self) -> &str;

    /// Unit symbol, empty when dimensionless.
    fn unit_symbol(&self) -> Cow<'static, str>;

    /// Category of the held values.
    fn category(&self) -> Category;

    /// The values rendered as text.
    fn value_as_string(&self) -> String;

    /// Identity of the concrete type, distinct for every declared newtype.
    fn type_identity(&self) -> TypeId;

    /// Downcasting support.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Primitive, U: Unit> AnyParameter for TypedParameter<T, U> {
    fn name(&self) -> &str {
        TypedParameter::name(self)
    }

    fn unit_symbol(&self) -> Cow<'static, str> {
        U::symbol()
    }

    fn category(&self) -> Category {
        T::CATEGORY
    }

    fn value_as_string(&self) -> String {
        TypedParameter::value_as_string(self)
    }

    fn type_identity(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl AnyParameter for DynTypedParameter {
    fn name(&self) -> &str {
        DynTypedParameter::name(self)
    }

    fn unit_symbol(&self) -> Cow<'static, str> {
        let unit = self.unit();
        if unit.is_dimensionless() {
            Cow::Borrowed("")
        } else {
            Cow::Owned(unit.to_string())
        }
    }

    fn category(&self) -> Category {
        DynTypedParameter::category(self)
    }

    fn value_as_string(&self) -> String {
        DynTypedParameter::value_as_string(self)
    }

    fn type_identity(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ─── Container ──────────────────────────────────────────────────────

/// The parameters of one sequence, in insertion order.
#[derive(Debug, Default)]
pub struct ParameterContainer {
    parameters: Vec<Box<dyn AnyParameter>>,
}

impl ParameterContainer {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn add(&mut self, parameter: impl AnyParameter + 'static) {
        self.add_boxed(Box::new(parameter));
    }

    /// Append an already boxed parameter.
    pub fn add_boxed(&mut self, parameter: Box<dyn AnyParameter>) {
        tracing::trace!(name = parameter.name(), "adding parameter");
        self.parameters.push(parameter);
    }

    /// The most recently added parameter with this name.
    pub fn find(&self, name: &str) -> Option<&dyn AnyParameter> {
        self.parameters
            .iter()
            .rev()
            .find(|p| p.name() == name)
            .map(|p| &**p)
    }

    /// [`ParameterContainer::find`], downcast to a concrete type.
    pub fn find_as<P: AnyParameter + 'static>(&self, name: &str) -> Option<&P> {
        self.find(name)?.as_any().downcast_ref::<P>()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn AnyParameter> + '_ {
        self.parameters.iter().map(|p| &**p)
    }

    /// Visit every parameter in insertion order.
    pub fn for_each(&self, f: impl FnMut(&dyn AnyParameter)) {
        self.iter().for_each(f);
    }

    /// Number of parameters held.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether no parameters are held.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// One line per parameter: name, value and unit.
    pub fn render_all(&self) -> String {
        self.iter()
            .map(|p| {
                let unit = p.unit_symbol();
                if unit.is_empty() {
                    format!("{:<20}: {}\n", p.name(), p.value_as_string())
                } else {
                    format!("{:<20}: {} {}\n", p.name(), p.value_as_string(), unit)
                }
            })
            .collect()
    }
}

// ─── Type registry ──────────────────────────────────────────────────

/// What the registry knows about one parameter type.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Unit symbol.
    pub unit_symbol: Cow<'static, str>,
    /// Category of the held values.
    pub category: Category,
    /// Identity of the concrete type.
    pub type_id: TypeId,
    /// Constructor for an empty instance.
    pub create: fn() -> Box<dyn AnyParameter>,
}

/// Display name → parameter type descriptor.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    descriptors: BTreeMap<&'static str, ParameterDescriptor>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Names are unique.
    pub fn register(&mut self, descriptor: ParameterDescriptor) -> Result<(), RegistryError> {
        if self.descriptors.contains_key(descriptor.name) {
            tracing::warn!(name = descriptor.name, "duplicate parameter registration");
            return Err(RegistryError::DuplicateName(descriptor.name.to_string()));
        }
        tracing::debug!(name = descriptor.name, "registered parameter type");
        self.descriptors.insert(descriptor.name, descriptor);
        Ok(())
    }

    /// Register a declared parameter type.
    pub fn register_type<P: DeclaredParameter>(&mut self) -> Result<(), RegistryError> {
        self.register(P::descriptor())
    }

    /// Look up a descriptor by display name.
    pub fn get(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.descriptors.get(name)
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// A new empty instance of the named type.
    pub fn create(&self, name: &str) -> Option<Box<dyn AnyParameter>> {
        self.get(name).map(|d| (d.create)())
    }

    /// Descriptors ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> + '_ {
        self.descriptors.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare_parameter;
    use mvp_core::{Value, Vector3};
    use mvp_units::{Degree, Metre, Millisecond};

    declare_parameter!(EchoTime, "Echo Time", f64, Millisecond);
    declare_parameter!(FlipAngle, "Flip Angle", f64, Degree);
    declare_parameter!(Offset, "Offset", Vector3, Metre);

    fn sequence() -> ParameterContainer {
        let mut c = ParameterContainer::new();
        c.add(EchoTime::from(vec![10.0, 11.0]));
        c.add(FlipAngle::from(90.0));
        c.add(Offset::from(Vector3::new(0.0, 1.0, 2.0)));
        c
    }

    #[test]
    fn find_by_name_and_downcast() {
        let c = sequence();
        assert_eq!(c.len(), 3);
        let flip = c.find("Flip Angle").unwrap();
        assert_eq!(flip.value_as_string(), "90");
        assert_eq!(flip.type_identity(), TypeId::of::<FlipAngle>());
        assert_eq!(c.find_as::<FlipAngle>("Flip Angle").unwrap().value(), 90.0);
        assert!(c.find_as::<EchoTime>("Flip Angle").is_none());
        assert!(c.find("Slice Thickness").is_none());
    }

    #[test]
    fn later_additions_shadow_earlier_ones() {
        let mut c = sequence();
        c.add(FlipAngle::from(45.0));
        assert_eq!(c.len(), 4);
        assert_eq!(c.find("Flip Angle").unwrap().value_as_string(), "45");
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let names: Vec<String> = sequence().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["Echo Time", "Flip Angle", "Offset"]);

        let mut categories = Vec::new();
        sequence().for_each(|p| categories.push(p.category()));
        assert_eq!(
            categories,
            [Category::Scalar, Category::Scalar, Category::ColumnVector3]
        );
    }

    #[test]
    fn render_all_lists_every_parameter() {
        let table = sequence().render_all();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{:<20}: [10, 11] ms", "Echo Time"));
        assert!(lines[1].ends_with(": 90 deg"));
        assert!(lines[2].ends_with(": [0; 1; 2] m"));
    }

    #[test]
    fn render_all_terminates_every_line() {
        assert_eq!(ParameterContainer::new().render_all(), "");

        let mut c = ParameterContainer::new();
        let flag =
            DynTypedParameter::from_values(vec![Value::Boolean(false)], mvp_units::One::DIMENSION)
                .unwrap()
                .named("Fat Saturation");
        c.add(flag);
        c.add(FlipAngle::from(30.0));
        assert_eq!(
            c.render_all(),
            format!("{:<20}: false\n{:<20}: 30 deg\n", "Fat Saturation", "Flip Angle")
        );
    }

    #[test]
    fn runtime_parameters_fit_the_same_container() {
        let mut c = ParameterContainer::new();
        let dynamic =
            DynTypedParameter::from_values(vec![Value::Boolean(true)], mvp_units::One::DIMENSION)
                .unwrap()
                .named("Fat Saturation");
        c.add(dynamic);
        let p = c.find("Fat Saturation").unwrap();
        assert_eq!(p.unit_symbol(), "");
        assert_eq!(p.category(), Category::Boolean);
        assert_eq!(p.value_as_string(), "true");
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = TypeRegistry::new();
        registry.register_type::<EchoTime>().unwrap();
        registry.register_type::<FlipAngle>().unwrap();
        assert_eq!(
            registry.register_type::<EchoTime>(),
            Err(RegistryError::DuplicateName("Echo Time".to_string()))
        );
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Flip Angle"));
    }

    #[test]
    fn registry_creates_fresh_instances() {
        let mut registry = TypeRegistry::new();
        registry.register_type::<Offset>().unwrap();
        let created = registry.create("Offset").unwrap();
        assert_eq!(created.name(), "Offset");
        assert_eq!(created.unit_symbol(), "m");
        assert_eq!(created.value_as_string(), "[]");
        assert!(created.as_any().downcast_ref::<Offset>().is_some());
        assert!(registry.create("Echo Time").is_none());
        let names: Vec<&str> = registry.iter().map(|d| d.name).collect();
        assert_eq!(names, ["Offset"]);
    }
}
