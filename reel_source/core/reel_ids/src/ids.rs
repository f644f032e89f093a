//! Handles used across the scene graph. None of them own anything; the
//! stage resolves them and rejects stale ones.

use std::fmt;

/// Node arena slot plus the generation it was handed out at.
///
/// Slot 0 is never allocated, so the all-zero value doubles as "no node".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeID {
    index: u32,
    generation: u32,
}

impl NodeID {
    #[inline]
    pub const fn nil() -> Self {
        Self {
            index: 0,
            generation: 0,
        }
    }

    #[inline]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.index == 0
    }
}

impl fmt::Debug for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID({}:{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.generation)
    }
}

/// A scene tree. The stage counts these up and never hands one out twice,
/// so a released tree's ID stays dead.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeID(u32);

impl TreeID {
    #[inline]
    pub const fn new(serial: u32) -> Self {
        Self(serial)
    }

    #[inline]
    pub const fn serial(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TreeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeID(#{})", self.0)
    }
}

impl fmt::Display for TreeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque texture handle. The scene graph only passes it through to the
/// draw surface; 0 means "no texture".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureID(u64);

impl TextureID {
    #[inline]
    pub const fn nil() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// Stable handle for an asset path (FNV-1a). Never nil.
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            i += 1;
        }
        Self(if hash == 0 { 1 } else { hash })
    }
}

impl fmt::Debug for TextureID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureID({:#018x})", self.0)
    }
}
