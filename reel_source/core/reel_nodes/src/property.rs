use reel_structs::VariantKind;

use crate::SceneNodeData;

/// Read/write capability of a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyAccess {
    pub readable: bool,
    pub writable: bool,
}

impl PropertyAccess {
    pub const READ_WRITE: Self = Self {
        readable: true,
        writable: true,
    };
    pub const READ_ONLY: Self = Self {
        readable: true,
        writable: false,
    };
}

/// Named properties of engine nodes, resolved once at binding time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeProperty {
    Name,
    Position,
    Rotation,
    Scale,
    Visible,
    ZIndex,
    Modulate,
    Color,
    GlobalPosition,
    GlobalRotation,
    GlobalScale,
}

impl NodeProperty {
    pub const ALL: [NodeProperty; 11] = [
        NodeProperty::Name,
        NodeProperty::Position,
        NodeProperty::Rotation,
        NodeProperty::Scale,
        NodeProperty::Visible,
        NodeProperty::ZIndex,
        NodeProperty::Modulate,
        NodeProperty::Color,
        NodeProperty::GlobalPosition,
        NodeProperty::GlobalRotation,
        NodeProperty::GlobalScale,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            NodeProperty::Name => "name",
            NodeProperty::Position => "position",
            NodeProperty::Rotation => "rotation",
            NodeProperty::Scale => "scale",
            NodeProperty::Visible => "visible",
            NodeProperty::ZIndex => "z_index",
            NodeProperty::Modulate => "modulate",
            NodeProperty::Color => "color",
            NodeProperty::GlobalPosition => "global_position",
            NodeProperty::GlobalRotation => "global_rotation",
            NodeProperty::GlobalScale => "global_scale",
        }
    }

    pub const fn access(self) -> PropertyAccess {
        match self {
            NodeProperty::GlobalPosition
            | NodeProperty::GlobalRotation
            | NodeProperty::GlobalScale => PropertyAccess::READ_ONLY,
            _ => PropertyAccess::READ_WRITE,
        }
    }

    pub const fn kind(self) -> VariantKind {
        match self {
            NodeProperty::Name => VariantKind::Text,
            NodeProperty::Position | NodeProperty::Scale => VariantKind::Vector2,
            NodeProperty::GlobalPosition | NodeProperty::GlobalScale => VariantKind::Vector2,
            NodeProperty::Rotation | NodeProperty::GlobalRotation => VariantKind::Float,
            NodeProperty::Visible => VariantKind::Bool,
            NodeProperty::ZIndex => VariantKind::Int,
            NodeProperty::Modulate | NodeProperty::Color => VariantKind::Color,
        }
    }

    /// Whether a node of this kind carries the property at all.
    pub fn applies_to(self, data: &SceneNodeData) -> bool {
        match self {
            NodeProperty::Name => true,
            NodeProperty::Modulate => matches!(data, SceneNodeData::Sprite2D(_)),
            NodeProperty::Color => matches!(data, SceneNodeData::Shape2D(_)),
            _ => data.is_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_2d::{Node2D, Shape2D};
    use reel_structs::Color;

    #[test]
    fn names_round_trip_through_lookup() {
        for p in NodeProperty::ALL {
            assert_eq!(NodeProperty::from_name(p.name()), Some(p));
        }
        assert_eq!(NodeProperty::from_name("velocity"), None);
    }

    #[test]
    fn global_properties_are_read_only() {
        assert!(!NodeProperty::GlobalPosition.access().writable);
        assert!(NodeProperty::GlobalPosition.access().readable);
        assert!(NodeProperty::Position.access().writable);
    }

    #[test]
    fn kind_specific_properties() {
        let plain = SceneNodeData::Node;
        let node2d = SceneNodeData::Node2D(Node2D::new());
        let shape = SceneNodeData::Shape2D(Shape2D::circle(4.0, Color::BLACK));

        assert!(NodeProperty::Name.applies_to(&plain));
        assert!(!NodeProperty::Position.applies_to(&plain));
        assert!(NodeProperty::Position.applies_to(&node2d));
        assert!(!NodeProperty::Color.applies_to(&node2d));
        assert!(NodeProperty::Color.applies_to(&shape));
        assert!(!NodeProperty::Modulate.applies_to(&shape));
    }
}
