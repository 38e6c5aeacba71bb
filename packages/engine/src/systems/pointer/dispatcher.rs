/// Client-space rectangle of a canvas (`getBoundingClientRect`)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Edges inclusive
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Per-canvas pointer state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Canvas-local pixels
    pub position: (f32, f32),
    /// Normalized device coordinates, +y up
    pub ndc: (f32, f32),
    pub hover: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Enter,
    Move,
    Leave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent<K> {
    pub target: K,
    pub kind: PointerEventKind,
    pub state: PointerState,
}

struct Entry<K> {
    key: K,
    rect: Rect,
    state: PointerState,
}

/// Routes document-level pointer events to the canvases registered with it.
///
/// One dispatcher per top-level controller; the owner attaches the
/// document listeners while the table is non-empty.
pub struct PointerDispatcher<K> {
    entries: Vec<Entry<K>>,
}

impl<K: Copy + PartialEq> PointerDispatcher<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns false if `key` is already registered
    pub fn register(&mut self, key: K, rect: Rect) -> bool {
        if self.entries.iter().any(|e| e.key == key) {
            return false;
        }
        self.entries.push(Entry { key, rect, state: PointerState::default() });
        true
    }

    pub fn unregister(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    pub fn update_rect(&mut self, key: K, rect: Rect) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.rect = rect;
        }
    }

    pub fn state(&self, key: K) -> Option<PointerState> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn locate(entry: &mut Entry<K>, x: f32, y: f32) {
        let rect = entry.rect;
        let px = x - rect.left;
        let py = y - rect.top;
        entry.state.position = (px, py);
        entry.state.ndc = (px / rect.width * 2.0 - 1.0, -py / rect.height * 2.0 + 1.0);
    }

    fn event(entry: &Entry<K>, kind: PointerEventKind) -> PointerEvent<K> {
        PointerEvent { target: entry.key, kind, state: entry.state }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Vec<PointerEvent<K>> {
        let mut events = Vec::new();
        for entry in self.entries.iter_mut() {
            if entry.rect.contains(x, y) {
                Self::locate(entry, x, y);
                if !entry.state.hover {
                    entry.state.hover = true;
                    events.push(Self::event(entry, PointerEventKind::Enter));
                }
                events.push(Self::event(entry, PointerEventKind::Move));
            } else if entry.state.hover {
                entry.state.hover = false;
                events.push(Self::event(entry, PointerEventKind::Leave));
            }
        }
        events
    }

    /// Pointer left the document
    pub fn pointer_leave(&mut self) -> Vec<PointerEvent<K>> {
        let mut events = Vec::new();
        for entry in self.entries.iter_mut() {
            if entry.state.hover {
                entry.state.hover = false;
                events.push(Self::event(entry, PointerEventKind::Leave));
            }
        }
        events
    }

    /// Every canvas tracks the click position; only those under it get `Click`
    pub fn click(&mut self, x: f32, y: f32) -> Vec<PointerEvent<K>> {
        let mut events = Vec::new();
        for entry in self.entries.iter_mut() {
            Self::locate(entry, x, y);
            if entry.rect.contains(x, y) {
                events.push(Self::event(entry, PointerEventKind::Click));
            }
        }
        events
    }
}

impl<K: Copy + PartialEq> Default for PointerDispatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}
