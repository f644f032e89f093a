use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use reel_ids::NodeID;
use reel_nodes::{NodeProperty, PropertyError, Stage};
use reel_structs::Variant;

type Getter<T> = fn(&T) -> Variant;
type Setter<T> = fn(&mut T, Variant) -> Result<(), PropertyError>;

/// One named property of an `Animatable` type. A missing getter or setter
/// makes the property write-only or read-only.
pub struct PropertyDescriptor<T> {
    pub name: &'static str,
    pub get: Option<Getter<T>>,
    pub set: Option<Setter<T>>,
}

impl<T> PropertyDescriptor<T> {
    pub const fn read_write(name: &'static str, get: Getter<T>, set: Setter<T>) -> Self {
        Self {
            name,
            get: Some(get),
            set: Some(set),
        }
    }

    pub const fn read_only(name: &'static str, get: Getter<T>) -> Self {
        Self {
            name,
            get: Some(get),
            set: None,
        }
    }

    pub const fn write_only(name: &'static str, set: Setter<T>) -> Self {
        Self {
            name,
            get: None,
            set: Some(set),
        }
    }
}

/// A type whose properties can be animated from outside the scene graph.
pub trait Animatable: 'static {
    fn properties() -> &'static [PropertyDescriptor<Self>]
    where
        Self: Sized;
}

/// Type-erased accessor pair for a property living outside the stage.
///
/// The target is held weakly; once it is dropped every access fails with
/// `PropertyError::TargetDropped`.
pub struct SharedProperty {
    name: String,
    getter: Box<dyn Fn() -> Result<Variant, PropertyError>>,
    setter: Box<dyn Fn(Variant) -> Result<(), PropertyError>>,
}

impl SharedProperty {
    /// Bind `name` on `target`, checking that it exists and is both
    /// readable and writable.
    pub fn bind<T: Animatable>(target: &Rc<RefCell<T>>, name: &str) -> Result<Self, PropertyError> {
        let descriptor = T::properties()
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| PropertyError::Unknown(name.to_owned()))?;
        let get = descriptor
            .get
            .ok_or_else(|| PropertyError::NotReadable(name.to_owned()))?;
        let set = descriptor
            .set
            .ok_or_else(|| PropertyError::NotWritable(name.to_owned()))?;

        let weak_get = Rc::downgrade(target);
        let weak_set = Weak::clone(&weak_get);
        let get_name = descriptor.name;
        let set_name = descriptor.name;

        Ok(Self {
            name: name.to_owned(),
            getter: Box::new(move || {
                let target = upgrade(&weak_get, get_name)?;
                let value = target.try_borrow().map_err(|e| PropertyError::Accessor {
                    property: get_name.to_owned(),
                    reason: e.to_string(),
                })?;
                Ok(get(&value))
            }),
            setter: Box::new(move |v| {
                let target = upgrade(&weak_set, set_name)?;
                let mut value = target.try_borrow_mut().map_err(|e| PropertyError::Accessor {
                    property: set_name.to_owned(),
                    reason: e.to_string(),
                })?;
                set(&mut value, v)
            }),
        })
    }

    /// Ad-hoc binding from a pair of closures.
    pub fn from_fns(
        name: impl Into<String>,
        getter: impl Fn() -> Result<Variant, PropertyError> + 'static,
        setter: impl Fn(Variant) -> Result<(), PropertyError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> Result<Variant, PropertyError> {
        (self.getter)()
    }

    pub fn set(&self, value: Variant) -> Result<(), PropertyError> {
        (self.setter)(value)
    }
}

impl fmt::Debug for SharedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedProperty")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn upgrade<T>(weak: &Weak<RefCell<T>>, name: &str) -> Result<Rc<RefCell<T>>, PropertyError> {
    weak.upgrade()
        .ok_or_else(|| PropertyError::TargetDropped(name.to_owned()))
}

/// What a tween unit reads and writes.
#[derive(Debug)]
pub enum PropertyBinding {
    /// A property of a node in the stage.
    Node { node: NodeID, property: NodeProperty },
    Shared(SharedProperty),
}

impl PropertyBinding {
    /// Bind a node property by name, validated against the node's kind.
    pub fn node(stage: &Stage, node: NodeID, name: &str) -> Result<Self, PropertyError> {
        let property = stage.resolve_animatable(node, name)?;
        Ok(Self::Node { node, property })
    }

    pub fn shared<T: Animatable>(
        target: &Rc<RefCell<T>>,
        name: &str,
    ) -> Result<Self, PropertyError> {
        SharedProperty::bind(target, name).map(Self::Shared)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Node { property, .. } => property.name(),
            Self::Shared(shared) => shared.name(),
        }
    }

    pub fn read(&self, stage: &Stage) -> Result<Variant, PropertyError> {
        match self {
            Self::Node { node, property } => stage.get_property(*node, *property),
            Self::Shared(shared) => shared.get(),
        }
    }

    pub fn write(&self, stage: &mut Stage, value: Variant) -> Result<(), PropertyError> {
        match self {
            Self::Node { node, property } => stage.set_property(*node, *property, value),
            Self::Shared(shared) => shared.set(value),
        }
    }
}

impl From<SharedProperty> for PropertyBinding {
    fn from(shared: SharedProperty) -> Self {
        Self::Shared(shared)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use reel_nodes::PropertyError;
    use reel_structs::Variant;

    use super::{Animatable, PropertyDescriptor};

    /// Plain struct animated from outside the stage.
    #[derive(Debug, Default)]
    pub struct Dot {
        pub x: f32,
        pub label: String,
        pub id: u32,
    }

    fn get_x(d: &Dot) -> Variant {
        Variant::Float(d.x)
    }
    fn set_x(d: &mut Dot, v: Variant) -> Result<(), PropertyError> {
        d.x = v.as_f32().ok_or_else(|| PropertyError::Accessor {
            property: "x".into(),
            reason: "expected a number".into(),
        })?;
        Ok(())
    }
    fn get_label(d: &Dot) -> Variant {
        Variant::Text(d.label.clone())
    }
    fn set_label(d: &mut Dot, v: Variant) -> Result<(), PropertyError> {
        d.label = v.as_str().unwrap_or_default().to_owned();
        Ok(())
    }
    fn get_id(d: &Dot) -> Variant {
        Variant::Int(d.id as i32)
    }
    fn set_secret(_d: &mut Dot, _v: Variant) -> Result<(), PropertyError> {
        Ok(())
    }

    const DOT_PROPERTIES: &[PropertyDescriptor<Dot>] = &[
        PropertyDescriptor::read_write("x", get_x, set_x),
        PropertyDescriptor::read_write("label", get_label, set_label),
        PropertyDescriptor::read_only("id", get_id),
        PropertyDescriptor::write_only("secret", set_secret),
    ];

    impl Animatable for Dot {
        fn properties() -> &'static [PropertyDescriptor<Self>] {
            DOT_PROPERTIES
        }
    }
}
