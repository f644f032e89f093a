use reel_ids::NodeID;
use reel_structs::{Variant, VariantKind};

use crate::{NodeProperty, PropertyError, SceneNodeData, Stage};

impl Stage {
    /// Look up `name` on the node's kind. Fails with `Unknown` if the kind
    /// has no such property.
    pub fn resolve_property(&self, id: NodeID, name: &str) -> Result<NodeProperty, PropertyError> {
        let node = self.nodes.get(id).ok_or(PropertyError::NodeNotFound(id))?;
        NodeProperty::from_name(name)
            .filter(|p| p.applies_to(&node.data))
            .ok_or_else(|| PropertyError::Unknown(name.to_owned()))
    }

    /// Resolve a property that is both readable and writable, as required
    /// for animating it.
    pub fn resolve_animatable(
        &self,
        id: NodeID,
        name: &str,
    ) -> Result<NodeProperty, PropertyError> {
        let property = self.resolve_property(id, name)?;
        let access = property.access();
        if !access.readable {
            return Err(PropertyError::NotReadable(name.to_owned()));
        }
        if !access.writable {
            return Err(PropertyError::NotWritable(name.to_owned()));
        }
        Ok(property)
    }

    pub fn get_property(
        &self,
        id: NodeID,
        property: NodeProperty,
    ) -> Result<Variant, PropertyError> {
        let node = self.nodes.get(id).ok_or(PropertyError::NodeNotFound(id))?;
        let unknown = || PropertyError::Unknown(property.name().to_owned());

        let value = match property {
            NodeProperty::Name => Variant::Text(node.name.to_string()),
            NodeProperty::GlobalPosition => {
                node.data.as_node2d().ok_or_else(unknown)?;
                Variant::Vector2(self.global_position(id))
            }
            NodeProperty::GlobalRotation => {
                node.data.as_node2d().ok_or_else(unknown)?;
                Variant::Float(self.global_rotation(id))
            }
            NodeProperty::GlobalScale => {
                node.data.as_node2d().ok_or_else(unknown)?;
                Variant::Vector2(self.global_scale(id))
            }
            NodeProperty::Modulate => match &node.data {
                SceneNodeData::Sprite2D(s) => Variant::Color(s.modulate),
                _ => return Err(unknown()),
            },
            NodeProperty::Color => match &node.data {
                SceneNodeData::Shape2D(s) => Variant::Color(s.color),
                _ => return Err(unknown()),
            },
            NodeProperty::Position
            | NodeProperty::Rotation
            | NodeProperty::Scale
            | NodeProperty::Visible
            | NodeProperty::ZIndex => {
                let n2d = node.data.as_node2d().ok_or_else(unknown)?;
                match property {
                    NodeProperty::Position => Variant::Vector2(n2d.transform.position),
                    NodeProperty::Rotation => Variant::Float(n2d.transform.rotation),
                    NodeProperty::Scale => Variant::Vector2(n2d.transform.scale),
                    NodeProperty::Visible => Variant::Bool(n2d.visible),
                    _ => Variant::Int(n2d.z_index),
                }
            }
        };
        Ok(value)
    }

    /// Write a property. Floats are accepted for integer properties and
    /// rounded.
    pub fn set_property(
        &mut self,
        id: NodeID,
        property: NodeProperty,
        value: Variant,
    ) -> Result<(), PropertyError> {
        if !property.access().writable {
            return Err(PropertyError::NotWritable(property.name().to_owned()));
        }
        let mismatch = |value: &Variant| PropertyError::TypeMismatch {
            property: property.name().to_owned(),
            expected: property.kind(),
            found: value.kind(),
        };
        let node = self.nodes.get_mut(id).ok_or(PropertyError::NodeNotFound(id))?;
        if !property.applies_to(&node.data) {
            return Err(PropertyError::Unknown(property.name().to_owned()));
        }

        match property {
            NodeProperty::Name => {
                let text = value.as_str().ok_or_else(|| mismatch(&value))?;
                node.name = text.to_owned().into();
                return Ok(());
            }
            NodeProperty::Modulate | NodeProperty::Color => {
                let color = value.as_color().ok_or_else(|| mismatch(&value))?;
                match &mut node.data {
                    SceneNodeData::Sprite2D(s) => s.modulate = color,
                    SceneNodeData::Shape2D(s) => s.color = color,
                    _ => {}
                }
                return Ok(());
            }
            _ => {}
        }

        let Some(n2d) = node.data.as_node2d_mut() else {
            return Err(PropertyError::Unknown(property.name().to_owned()));
        };
        match property.kind() {
            VariantKind::Vector2 => {
                let v = value.as_vector2().ok_or_else(|| mismatch(&value))?;
                if property == NodeProperty::Position {
                    n2d.transform.position = v;
                } else {
                    n2d.transform.scale = v;
                }
            }
            VariantKind::Float => {
                n2d.transform.rotation = value.as_f32().ok_or_else(|| mismatch(&value))?;
            }
            VariantKind::Bool => {
                n2d.visible = value.as_bool().ok_or_else(|| mismatch(&value))?;
            }
            VariantKind::Int => {
                let z = value.as_f32().ok_or_else(|| mismatch(&value))?;
                n2d.z_index = z.round() as i32;
            }
            VariantKind::Color | VariantKind::Text => {
                return Err(mismatch(&value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reel_structs::{Color, Variant, VariantKind, Vector2};

    use crate::{Node2D, NodeProperty, PropertyError, SceneNodeData, Shape2D, Stage};

    #[test]
    fn resolve_validates_existence_and_access() {
        let mut stage = Stage::new();
        let plain = stage.create_node("plain", SceneNodeData::Node);
        let n = stage.create_node("n", Node2D::new());

        assert_eq!(stage.resolve_animatable(n, "position"), Ok(NodeProperty::Position));
        assert_eq!(
            stage.resolve_animatable(n, "velocity"),
            Err(PropertyError::Unknown("velocity".into()))
        );
        assert_eq!(
            stage.resolve_animatable(n, "global_position"),
            Err(PropertyError::NotWritable("global_position".into()))
        );
        assert_eq!(
            stage.resolve_animatable(plain, "position"),
            Err(PropertyError::Unknown("position".into()))
        );
        assert_eq!(stage.resolve_animatable(plain, "name"), Ok(NodeProperty::Name));
    }

    #[test]
    fn get_and_set_round_trip_through_node_data() {
        let mut stage = Stage::new();
        let shape = stage.create_node("shape", Shape2D::circle(2.0, Color::BLACK));

        stage
            .set_property(shape, NodeProperty::Position, Variant::Vector2(Vector2::new(3.0, 4.0)))
            .unwrap();
        stage
            .set_property(shape, NodeProperty::Color, Variant::Color(Color::WHITE))
            .unwrap();
        stage
            .set_property(shape, NodeProperty::ZIndex, Variant::Float(2.6))
            .unwrap();

        assert_eq!(
            stage.get_property(shape, NodeProperty::Position),
            Ok(Variant::Vector2(Vector2::new(3.0, 4.0)))
        );
        assert_eq!(
            stage.get_property(shape, NodeProperty::Color),
            Ok(Variant::Color(Color::WHITE))
        );
        assert_eq!(stage.get_property(shape, NodeProperty::ZIndex), Ok(Variant::Int(3)));
        assert_eq!(
            stage.get_property(shape, NodeProperty::GlobalPosition),
            Ok(Variant::Vector2(Vector2::new(3.0, 4.0)))
        );
    }

    #[test]
    fn set_rejects_wrong_kind_and_read_only() {
        let mut stage = Stage::new();
        let n = stage.create_node("n", Node2D::new());

        assert_eq!(
            stage.set_property(n, NodeProperty::Rotation, Variant::Bool(true)),
            Err(PropertyError::TypeMismatch {
                property: "rotation".into(),
                expected: VariantKind::Float,
                found: VariantKind::Bool,
            })
        );
        assert_eq!(
            stage.set_property(n, NodeProperty::GlobalRotation, Variant::Float(1.0)),
            Err(PropertyError::NotWritable("global_rotation".into()))
        );
        assert!(matches!(
            stage.set_property(n, NodeProperty::Modulate, Variant::Color(Color::WHITE)),
            Err(PropertyError::Unknown(_))
        ));
    }

    #[test]
    fn name_is_a_text_property() {
        let mut stage = Stage::new();
        let n = stage.create_node("before", SceneNodeData::Node);
        stage
            .set_property(n, NodeProperty::Name, Variant::from("after"))
            .unwrap();
        assert_eq!(stage.node(n).unwrap().name, "after");
    }
}
