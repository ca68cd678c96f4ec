//! Physics animations for swipedeck: friction flings and damped springs,
//! driven by the runtime frame clock.

pub mod animation;
pub mod decay_spec;
pub mod spring_spec;

pub use animation::{AnimationEnd, AnimationKind, AnimationState, PhysicsAnimation};
pub use decay_spec::{
    FloatDecayAnimationSpec, FrictionDecaySpec, MIN_VISIBLE_CHANGE_PIXELS,
    VELOCITY_THRESHOLD_MULTIPLIER,
};
pub use spring_spec::SpringSpec;
