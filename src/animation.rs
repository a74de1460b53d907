pub mod ease;
pub mod tween;
