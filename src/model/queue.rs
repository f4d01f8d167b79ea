//! Queue snapshot and the per-row multi-zone focus model
//!
//! Each queue row exposes three focus zones: Content (play),
//! DragHandle (reorder), Remove (delete). Left/Right move between the
//! zones of the focused row and never leave it; Up/Down move to the
//! same zone of the adjacent row, except in drag mode where they move
//! the row itself.

/// A track entry in the queue view, identified by its Spotify URI
#[derive(Clone, Debug)]
pub struct QueueTrack {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u32,
    pub liked: bool,
}

/// Focus zones within one queue row, in left-to-right order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusZone {
    Content,
    DragHandle,
    Remove,
}

impl FocusZone {
    fn left(self) -> Self {
        match self {
            FocusZone::Content => FocusZone::Content,
            FocusZone::DragHandle => FocusZone::Content,
            FocusZone::Remove => FocusZone::DragHandle,
        }
    }

    fn right(self) -> Self {
        match self {
            FocusZone::Content => FocusZone::DragHandle,
            FocusZone::DragHandle => FocusZone::Remove,
            FocusZone::Remove => FocusZone::Remove,
        }
    }
}

/// Requests the queue screen sends to the player connection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueRequest {
    /// Jump playback to this row and close the queue view
    Play(usize),
    /// Remove this row from the queue
    Remove(usize),
    /// Swap a row with its neighbor
    Move { from: usize, to: usize },
}

/// Focus state of the queue screen: one (row, zone) pair plus the
/// drag slot. `dragging` holding at most one row index makes a second
/// simultaneous drag unrepresentable; starting a drag on another row
/// replaces the slot.
#[derive(Clone, Debug)]
pub struct QueueNav {
    pub row: usize,
    pub zone: FocusZone,
    pub dragging: Option<usize>,
}

impl Default for QueueNav {
    fn default() -> Self {
        Self {
            row: 0,
            zone: FocusZone::Content,
            dragging: None,
        }
    }
}

impl QueueNav {
    /// Focus state on screen entry, landing on the given row
    pub fn enter_at(row: usize, len: usize) -> Self {
        Self {
            row: clamp_row(row, len),
            zone: FocusZone::Content,
            dragging: None,
        }
    }

    pub fn is_dragging_row(&self, row: usize) -> bool {
        self.dragging == Some(row)
    }

    /// Up press: move focus up a row, or move the dragged row up
    pub fn up(&mut self, len: usize) -> Option<QueueRequest> {
        if len == 0 {
            return None;
        }
        if self.dragging.is_some() {
            if self.row == 0 {
                return None;
            }
            let request = QueueRequest::Move {
                from: self.row,
                to: self.row - 1,
            };
            self.row -= 1;
            self.dragging = Some(self.row);
            return Some(request);
        }
        self.row = self.row.saturating_sub(1);
        None
    }

    /// Down press: move focus down a row, or move the dragged row down
    pub fn down(&mut self, len: usize) -> Option<QueueRequest> {
        if len == 0 {
            return None;
        }
        if self.dragging.is_some() {
            if self.row + 1 >= len {
                return None;
            }
            let request = QueueRequest::Move {
                from: self.row,
                to: self.row + 1,
            };
            self.row += 1;
            self.dragging = Some(self.row);
            return Some(request);
        }
        self.row = (self.row + 1).min(len - 1);
        None
    }

    /// Lateral moves stay within the focused row and are inert while
    /// the row is being dragged
    pub fn left(&mut self) {
        if self.dragging.is_none() {
            self.zone = self.zone.left();
        }
    }

    pub fn right(&mut self) {
        if self.dragging.is_none() {
            self.zone = self.zone.right();
        }
    }

    /// Center press on the focused zone. Drag toggling is handled
    /// here; Play/Remove are returned for the player connection.
    pub fn activate(&mut self, len: usize) -> Option<QueueRequest> {
        if len == 0 {
            return None;
        }
        if self.dragging.is_some() {
            self.dragging = None;
            return None;
        }
        match self.zone {
            FocusZone::Content => Some(QueueRequest::Play(self.row)),
            FocusZone::Remove => Some(QueueRequest::Remove(self.row)),
            FocusZone::DragHandle => {
                self.start_drag(self.row);
                None
            }
        }
    }

    /// Entering drag forces focus onto the row's drag handle and
    /// releases any other row's drag slot.
    pub fn start_drag(&mut self, row: usize) {
        self.dragging = Some(row);
        self.row = row;
        self.zone = FocusZone::DragHandle;
    }

    /// Back press. Returns true when it was consumed by exiting drag
    /// mode; false means the caller should close the queue view.
    pub fn back(&mut self) -> bool {
        if self.dragging.is_some() {
            self.dragging = None;
            return true;
        }
        false
    }

    /// Re-clamp after any external queue mutation. Drag state only
    /// survives if the dragged row still exists at the same index.
    pub fn clamp(&mut self, len: usize) {
        self.row = clamp_row(self.row, len);
        if let Some(dragged) = self.dragging {
            if dragged >= len {
                self.dragging = None;
            }
        }
    }
}

fn clamp_row(row: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        row.min(len - 1)
    }
}

/// The queue screen's snapshot of the externally-owned queue plus its
/// transient focus state
#[derive(Clone, Debug, Default)]
pub struct QueueState {
    pub tracks: Vec<QueueTrack>,
    pub current_index: Option<usize>,
    pub nav: QueueNav,
    pub loading: bool,
}

impl QueueState {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_current_row(&self, row: usize) -> bool {
        self.current_index == Some(row)
    }

    /// Replace the snapshot after an external fetch; focus lands on
    /// the current track's row
    pub fn replace(&mut self, tracks: Vec<QueueTrack>, current_index: Option<usize>) {
        self.tracks = tracks;
        self.current_index = current_index.filter(|&i| i < self.tracks.len());
        self.nav = QueueNav::enter_at(self.current_index.unwrap_or(0), self.tracks.len());
        self.loading = false;
    }

    /// Swap-based reorder used by drag mode; out-of-range requests are
    /// dropped silently. The current-track marker follows its row.
    pub fn move_row(&mut self, from: usize, to: usize) {
        if from >= self.tracks.len() || to >= self.tracks.len() {
            return;
        }
        self.tracks.swap(from, to);
        if let Some(current) = self.current_index {
            if current == from {
                self.current_index = Some(to);
            } else if current == to {
                self.current_index = Some(from);
            }
        }
    }

    /// Remove a row, shift the current-track index and re-clamp focus.
    /// Returns the removed track's URI so the caller can feed the
    /// skip list.
    pub fn remove_row(&mut self, index: usize) -> Option<String> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        if let Some(current) = self.current_index {
            if index < current {
                self.current_index = Some(current - 1);
            } else if index == current {
                self.current_index = None;
            }
        }
        self.nav.clamp(self.tracks.len());
        Some(removed.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> QueueTrack {
        QueueTrack {
            id: name.to_lowercase(),
            uri: format!("spotify:track:{}", name.to_lowercase()),
            name: name.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 180_000,
            liked: false,
        }
    }

    fn queue_of(names: &[&str]) -> QueueState {
        QueueState {
            tracks: names.iter().map(|n| track(n)).collect(),
            current_index: None,
            nav: QueueNav::default(),
            loading: false,
        }
    }

    #[test]
    fn lateral_moves_never_leave_the_row() {
        let mut nav = QueueNav::enter_at(1, 3);

        nav.right();
        assert_eq!(nav.zone, FocusZone::DragHandle);
        nav.left();
        assert_eq!((nav.row, nav.zone), (1, FocusZone::Content));

        nav.right();
        nav.right();
        assert_eq!(nav.zone, FocusZone::Remove);
        nav.right();
        assert_eq!((nav.row, nav.zone), (1, FocusZone::Remove));

        nav.left();
        nav.left();
        nav.left();
        assert_eq!((nav.row, nav.zone), (1, FocusZone::Content));
    }

    #[test]
    fn vertical_moves_keep_zone_and_clamp() {
        let mut nav = QueueNav::enter_at(0, 3);
        nav.right();

        assert_eq!(nav.up(3), None);
        assert_eq!((nav.row, nav.zone), (0, FocusZone::DragHandle));

        for _ in 0..3 {
            assert_eq!(nav.down(3), None);
        }
        assert_eq!((nav.row, nav.zone), (2, FocusZone::DragHandle));
    }

    #[test]
    fn drag_moves_row_instead_of_focus() {
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.nav = QueueNav::enter_at(1, 3);
        queue.nav.right();

        assert_eq!(queue.nav.activate(3), None);
        assert!(queue.nav.is_dragging_row(1));

        let request = queue.nav.up(3);
        assert_eq!(request, Some(QueueRequest::Move { from: 1, to: 0 }));
        if let Some(QueueRequest::Move { from, to }) = request {
            queue.move_row(from, to);
        }

        assert_eq!(queue.tracks[0].name, "B");
        assert_eq!(queue.tracks[1].name, "A");
        assert!(queue.nav.is_dragging_row(0));

        // Center exits drag mode without further movement
        assert_eq!(queue.nav.activate(3), None);
        assert!(queue.nav.dragging.is_none());
        assert_eq!(queue.nav.row, 0);
    }

    #[test]
    fn drag_clamps_at_queue_ends() {
        let mut nav = QueueNav::enter_at(0, 2);
        nav.start_drag(0);

        assert_eq!(nav.up(2), None);
        assert_eq!(nav.row, 0);

        assert_eq!(nav.down(2), Some(QueueRequest::Move { from: 0, to: 1 }));
        assert_eq!(nav.down(2), None);
        assert_eq!(nav.row, 1);
    }

    #[test]
    fn starting_a_new_drag_releases_the_old_one() {
        let mut nav = QueueNav::enter_at(0, 3);
        nav.start_drag(0);
        nav.start_drag(2);

        assert!(nav.is_dragging_row(2));
        assert!(!nav.is_dragging_row(0));
        assert_eq!((nav.row, nav.zone), (2, FocusZone::DragHandle));
    }

    #[test]
    fn back_exits_drag_before_closing() {
        let mut nav = QueueNav::enter_at(1, 3);
        nav.start_drag(1);

        assert!(nav.back());
        assert!(nav.dragging.is_none());
        assert!(!nav.back());
    }

    #[test]
    fn activate_on_zones_issues_requests() {
        let mut nav = QueueNav::enter_at(1, 3);
        assert_eq!(nav.activate(3), Some(QueueRequest::Play(1)));

        nav.right();
        nav.right();
        assert_eq!(nav.activate(3), Some(QueueRequest::Remove(1)));
    }

    #[test]
    fn activate_on_empty_queue_is_inert() {
        let mut nav = QueueNav::default();
        assert_eq!(nav.activate(0), None);
        assert_eq!(nav.up(0), None);
        assert_eq!(nav.down(0), None);
    }

    #[test]
    fn remove_clamps_focus_into_new_range() {
        // Queue [A, B, C], focus on the last row, remove it
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.nav = QueueNav::enter_at(2, 3);

        let uri = queue.remove_row(2);
        assert_eq!(uri.as_deref(), Some("spotify:track:c"));
        assert_eq!(queue.nav.row, 1);

        // Remove everything; focus stays pinned at zero
        assert!(queue.remove_row(1).is_some());
        assert!(queue.remove_row(0).is_some());
        assert!(queue.is_empty());
        assert_eq!(queue.nav.row, 0);
    }

    #[test]
    fn remove_ahead_of_current_shifts_index_and_keeps_focus_valid() {
        // Queue [A, B, C] with B playing; entering focuses row 1,
        // removing row 0 leaves [B, C] with B now at row 0 and focus
        // still within [0, 1]
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.current_index = Some(1);
        queue.nav = QueueNav::enter_at(1, 3);

        assert!(queue.remove_row(0).is_some());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current_index, Some(0));
        assert_eq!(queue.tracks[0].name, "B");
        assert!(queue.nav.row <= 1);
    }

    #[test]
    fn replace_focuses_the_current_row() {
        let mut queue = QueueState::default();
        queue.replace(
            ["A", "B", "C"].iter().map(|n| track(n)).collect(),
            Some(1),
        );
        assert_eq!(queue.nav.row, 1);
        assert!(queue.is_current_row(1));

        // A stale out-of-range index still clamps into the new list
        queue.replace(["A"].iter().map(|n| track(n)).collect(), Some(5));
        assert_eq!(queue.nav.row, 0);
    }

    #[test]
    fn move_carries_the_current_marker() {
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.current_index = Some(1);

        queue.move_row(1, 2);
        assert_eq!(queue.current_index, Some(2));
        assert_eq!(queue.tracks[2].name, "B");

        queue.move_row(0, 2);
        assert_eq!(queue.current_index, Some(0));
    }

    #[test]
    fn external_shrink_clamps_and_drops_stale_drag() {
        let mut nav = QueueNav::enter_at(4, 5);
        nav.start_drag(4);

        nav.clamp(2);
        assert_eq!(nav.row, 1);
        assert!(nav.dragging.is_none());
    }

    #[test]
    fn out_of_range_move_is_dropped() {
        let mut queue = queue_of(&["A", "B"]);
        queue.move_row(0, 5);
        assert_eq!(queue.tracks[0].name, "A");
    }
}
