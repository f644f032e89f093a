mod api;
mod binding;
mod error;
mod interpolate;
mod tween;
mod tweener;

pub mod easing;

pub use api::TweenAPI;
pub use binding::{Animatable, PropertyBinding, PropertyDescriptor, SharedProperty};
pub use easing::Easing;
pub use error::TweenError;
pub use interpolate::interpolate;
pub use tween::{Tween, TweenState};
pub use tweener::{MIN_DURATION, PropertyTweener};
