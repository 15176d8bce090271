//! Scripted input timeline standing in for a keyboard and mouse.
//!
//! Each segment holds a set of actions for a duration and moves the cursor at a
//! constant rate. Keys change only when a segment starts, the way press/release events
//! arrive from a window. A segment can also release or recapture the cursor then.

use fps_controller::{InputAction, InputState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEvent {
    Release,
    Capture,
}

#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub label: &'static str,
    pub duration_s: f32,
    pub held: &'static [InputAction],
    /// Cursor velocity in pixels per second.
    pub cursor_velocity: (f64, f64),
    pub on_enter: Option<CursorEvent>,
}

impl Segment {
    const fn hold(label: &'static str, duration_s: f32, held: &'static [InputAction]) -> Self {
        Self {
            label,
            duration_s,
            held,
            cursor_velocity: (0.0, 0.0),
            on_enter: None,
        }
    }

    const fn look(label: &'static str, duration_s: f32, velocity: (f64, f64)) -> Self {
        Self {
            label,
            duration_s,
            held: &[],
            cursor_velocity: velocity,
            on_enter: None,
        }
    }

    const fn entering(mut self, event: CursorEvent) -> Self {
        self.on_enter = Some(event);
        self
    }
}

use InputAction::*;

/// Walk the range, look around, then empty a magazine into the target wall.
///
/// The look segments cancel out, so the player faces down -Z again before firing.
pub const TIMELINE: &[Segment] = &[
    Segment::hold("settle", 1.0, &[]),
    Segment::hold("walk forward", 2.0, &[MoveForward]),
    Segment::hold("strafe diagonally", 1.0, &[MoveForward, StrafeRight]),
    Segment::hold("sprint", 1.5, &[MoveForward, Run]),
    Segment::hold("jump", 1.5, &[Jump]),
    Segment::look("look around", 1.0, (300.0, -50.0)),
    Segment::look("cursor released", 1.0, (800.0, 400.0)).entering(CursorEvent::Release),
    Segment::look("cursor recaptured", 1.0, (-300.0, 50.0)).entering(CursorEvent::Capture),
    Segment::hold("hold fire", 6.5, &[Fire]),
    Segment::hold("reload wait", 3.5, &[]),
    Segment::hold("short burst", 1.0, &[Fire]),
    Segment::hold("manual reload", 0.1, &[Reload]),
    Segment::hold("reload wait", 3.5, &[]),
];

/// Input for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub label: &'static str,
    /// True on the first frame of a segment.
    pub entered: bool,
    pub held: InputState,
    pub cursor: (f64, f64),
    pub cursor_event: Option<CursorEvent>,
}

pub struct ScriptPlayer {
    timeline: &'static [Segment],
    index: usize,
    elapsed_s: f32,
    entered: bool,
    held: InputState,
    cursor: (f64, f64),
}

impl ScriptPlayer {
    pub fn new(timeline: &'static [Segment]) -> Self {
        Self {
            timeline,
            index: 0,
            elapsed_s: 0.0,
            entered: false,
            held: InputState::default(),
            cursor: (0.0, 0.0),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.timeline.len()
    }

    /// Produce the input for a frame of length `dt`, or `None` once the timeline is over.
    pub fn advance(&mut self, dt: f32) -> Option<FrameInput> {
        let segment = self.timeline.get(self.index)?;

        let entered = !std::mem::replace(&mut self.entered, true);
        let cursor_event = if entered { segment.on_enter } else { None };
        if entered {
            for &action in InputAction::ALL {
                self.held.set(action, segment.held.contains(&action));
            }
        }

        self.cursor.0 += segment.cursor_velocity.0 * f64::from(dt);
        self.cursor.1 += segment.cursor_velocity.1 * f64::from(dt);

        self.elapsed_s += dt;
        if self.elapsed_s >= segment.duration_s {
            self.index += 1;
            self.elapsed_s = 0.0;
            self.entered = false;
        }

        Some(FrameInput {
            label: segment.label,
            entered,
            held: self.held,
            cursor: self.cursor,
            cursor_event,
        })
    }
}
