//! Per-frame input snapshot.
//!
//! The frame loop polls its window/device layer and records which logical actions are
//! held this frame in an [`InputState`]. The controller only ever asks "is this action
//! down?"; key bindings and edge detection belong elsewhere (jump edges are tracked by
//! the controller itself).

use num_traits::{One, PrimInt};

/// Flag enums that map each variant to one bit of an integer.
///
/// The enum's discriminant (via `#[repr(u8)]`) is the bit index; `Storage` picks the
/// backing integer.
pub trait ActionBit {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < the bit width of `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// Declare a `#[repr(u8)]` action enum and implement [`ActionBit`] for it.
#[macro_export]
macro_rules! define_actions {
    ($(#[$meta:meta])* $name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::input::ActionBit for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

define_actions!(
    /// Logical actions the controller reads every frame.
    InputAction, u16, {
        MoveForward,
        MoveBackward,
        StrafeLeft,
        StrafeRight,
        Run,
        Jump,
        Fire,
        Reload,
    }
);

/// Set of held actions backed by a single integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionSet<T: PrimInt> {
    bits: T,
}

impl<T: PrimInt> ActionSet<T> {
    pub fn bits(&self) -> T {
        self.bits
    }

    pub fn press<A: ActionBit<Storage = T>>(&mut self, action: A) {
        self.bits = self.bits | action.mask();
    }

    pub fn release<A: ActionBit<Storage = T>>(&mut self, action: A) {
        self.bits = self.bits & !action.mask();
    }

    /// Press or release depending on `down`.
    pub fn set<A: ActionBit<Storage = T>>(&mut self, action: A, down: bool) {
        if down {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn is_down<A: ActionBit<Storage = T>>(&self, action: A) -> bool {
        (self.bits & action.mask()) != T::zero()
    }

}

/// Held actions for one frame.
pub type InputState = ActionSet<u16>;

impl InputState {
    /// Snapshot with exactly `actions` held.
    pub fn with(actions: &[InputAction]) -> Self {
        let mut state = Self::default();
        for &action in actions {
            state.press(action);
        }
        state
    }
}
