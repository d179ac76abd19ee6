use floatkit_geometry::Point;

/// Identifies one drag session: the timestamp of the pointer-down that
/// opened it. Later samples carry the same value.
pub type SessionId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerPhase {
    /// Up and Cancel both close the session.
    pub fn is_release(&self) -> bool {
        matches!(self, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// One raw pointer sample delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position on screen.
    pub screen: Point,
    /// Position relative to the element's window origin.
    pub local: Point,
    /// Millisecond timestamp of this sample.
    pub timestamp: u64,
    /// Timestamp of the pointer-down that started this sample's session.
    pub session: SessionId,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, screen: Point, local: Point, timestamp: u64, session: SessionId) -> Self {
        Self {
            phase,
            screen,
            local,
            timestamp,
            session,
        }
    }

    /// Pointer-down that opens a session at `timestamp`.
    pub fn down(screen: Point, local: Point, timestamp: u64) -> Self {
        Self::new(PointerPhase::Down, screen, local, timestamp, timestamp)
    }

    /// Follow-up sample within `session`; the local offset is not used after
    /// pointer-down and is left at zero.
    pub fn follow(phase: PointerPhase, screen: Point, timestamp: u64, session: SessionId) -> Self {
        Self::new(phase, screen, Point::ZERO, timestamp, session)
    }
}
