//! The per-row swipe state machine.
//!
//! [`SwipePhase::transition`] is pure: it maps the current phase and an event
//! to the next phase and the side effects the manager must apply, in order.

use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipePhase {
    /// At rest, recyclable, no animation.
    Idle,
    /// Following the pointer.
    Dragging { offset: f32 },
    /// Decelerating after a rightward release.
    Flinging,
    /// Springing back to offset 0.
    Settling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEvent {
    Drag {
        offset: f32,
    },
    Release {
        velocity: f32,
    },
    FlingEnded {
        value: f32,
        velocity: f32,
    },
    SettleEnded,
    /// The row left the screen.
    Detached,
}

/// Widths the transition needs to bound the fling and judge dismissal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowGeometry {
    pub row_width: f32,
    pub container_width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEffect {
    /// Cancel and forget the row's animation entry, if any.
    ClearAnimation,
    Translate(f32),
    StartFling {
        from: f32,
        velocity: f32,
        max: f32,
    },
    StartSettle {
        from: f32,
        velocity: f32,
    },
    SetRecyclable(bool),
    /// Notify the dismiss listener. Always the last effect.
    Dismiss,
}

pub type SwipeEffects = SmallVec<[SwipeEffect; 4]>;

impl SwipePhase {
    pub fn is_animating(&self) -> bool {
        matches!(self, SwipePhase::Flinging | SwipePhase::Settling)
    }

    /// Events that make no sense in the current phase leave it unchanged
    /// with no effects.
    pub fn transition(
        self,
        event: SwipeEvent,
        geometry: RowGeometry,
    ) -> (SwipePhase, SwipeEffects) {
        use SwipeEffect::*;

        match (self, event) {
            (SwipePhase::Flinging | SwipePhase::Settling, SwipeEvent::Drag { offset }) => (
                SwipePhase::Dragging { offset },
                smallvec![ClearAnimation, SetRecyclable(true), Translate(offset)],
            ),
            (SwipePhase::Idle | SwipePhase::Dragging { .. }, SwipeEvent::Drag { offset }) => (
                SwipePhase::Dragging { offset },
                smallvec![Translate(offset)],
            ),

            (SwipePhase::Idle, SwipeEvent::Release { velocity }) => {
                release(0.0, velocity, geometry)
            }
            (SwipePhase::Dragging { offset }, SwipeEvent::Release { velocity }) => {
                release(offset, velocity, geometry)
            }

            (SwipePhase::Flinging, SwipeEvent::FlingEnded { value, velocity }) => {
                if value >= geometry.container_width {
                    (
                        SwipePhase::Idle,
                        smallvec![ClearAnimation, SetRecyclable(true), Dismiss],
                    )
                } else {
                    (
                        SwipePhase::Settling,
                        smallvec![StartSettle {
                            from: value,
                            velocity,
                        }],
                    )
                }
            }

            (SwipePhase::Settling, SwipeEvent::SettleEnded) => (
                SwipePhase::Idle,
                smallvec![ClearAnimation, SetRecyclable(true)],
            ),

            (phase, SwipeEvent::Detached) => {
                let mut effects = SwipeEffects::new();
                if phase.is_animating() {
                    effects.push(ClearAnimation);
                    effects.push(SetRecyclable(true));
                }
                effects.push(Translate(0.0));
                (SwipePhase::Idle, effects)
            }

            (phase, _) => (phase, SwipeEffects::new()),
        }
    }
}

fn release(offset: f32, velocity: f32, geometry: RowGeometry) -> (SwipePhase, SwipeEffects) {
    if velocity > 0.0 {
        (
            SwipePhase::Flinging,
            smallvec![
                SwipeEffect::SetRecyclable(false),
                SwipeEffect::StartFling {
                    from: offset,
                    velocity,
                    max: geometry.row_width,
                },
            ],
        )
    } else {
        (
            SwipePhase::Settling,
            smallvec![
                SwipeEffect::SetRecyclable(false),
                SwipeEffect::StartSettle {
                    from: offset,
                    velocity,
                },
            ],
        )
    }
}

#[cfg(test)]
#[path = "../tests/animator_tests.rs"]
mod tests;
