use foundation::Point3D;
use foundation::math::Vec3;

use crate::geometry::TrajectoryGeometry;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    PointActive(usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer moved over marker `j`.
    Enter(usize),
    /// Pointer pressed on marker `j`.
    Press(usize),
    /// Pointer interaction that landed on no marker.
    Miss,
}

/// Depth label for the active point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthReadout {
    pub index: usize,
    pub point: Point3D,
    /// Render-space position the label is attached to.
    pub anchor: Vec3,
    /// Source MD, never sign-flipped by the render convention.
    pub depth: f64,
}

impl DepthReadout {
    pub fn label(&self) -> String {
        format!("MD: {:.1} ft", self.depth)
    }
}

/// Active-point state machine for hover/click inspection.
///
/// Ordering contract:
/// - Events are applied in arrival order; the last one wins.
/// - The controller tracks the current sequence length and never reports an
///   index at or past it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: SelectionState,
    len: usize,
}

impl SelectionController {
    pub fn new(len: usize) -> Self {
        Self {
            state: SelectionState::Idle,
            len,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.state {
            SelectionState::PointActive(i) if i < self.len => Some(i),
            _ => None,
        }
    }

    /// Returns `true` if the state changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let next = match event {
            PointerEvent::Enter(j) | PointerEvent::Press(j) if j < self.len => {
                SelectionState::PointActive(j)
            }
            // Stale marker ids from a previous sequence are ignored.
            PointerEvent::Enter(_) | PointerEvent::Press(_) => return false,
            PointerEvent::Miss => SelectionState::Idle,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Feeds a pick result: a hit presses that marker, `None` is a miss.
    pub fn handle_pick(&mut self, picked: Option<usize>) -> bool {
        match picked {
            Some(j) => self.handle(PointerEvent::Press(j)),
            None => self.handle(PointerEvent::Miss),
        }
    }

    /// Tracks a new sequence length, dropping a selection that fell off the end.
    pub fn revalidate(&mut self, len: usize) {
        self.len = len;
        if let SelectionState::PointActive(i) = self.state {
            if i >= len {
                self.state = SelectionState::Idle;
            }
        }
    }

    /// Starts over for a replaced trajectory.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.state = SelectionState::Idle;
    }

    pub fn readout(
        &self,
        points: &[Point3D],
        geometry: &TrajectoryGeometry,
    ) -> Option<DepthReadout> {
        let index = self.selected_index()?;
        let point = *points.get(index)?;
        let anchor = geometry.polyline.get(index)?.position;
        Some(DepthReadout {
            index,
            point,
            anchor,
            depth: point.z,
        })
    }
}
