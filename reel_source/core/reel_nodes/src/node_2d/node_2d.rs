use reel_structs::Transform2D;

#[derive(Clone, Debug)]
pub struct Node2D {
    pub transform: Transform2D,
    pub z_index: i32,
    pub visible: bool,
}

impl Node2D {
    pub const fn new() -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            z_index: 0,
            visible: true,
        }
    }

    pub fn with_transform(transform: Transform2D) -> Self {
        Self {
            transform,
            ..Self::new()
        }
    }
}

impl Default for Node2D {
    fn default() -> Self {
        Self::new()
    }
}
