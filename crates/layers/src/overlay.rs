use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::graphic::Graphic;
use crate::layer::{Layer, LayerId};

/// Population state of an overlay's contents.
///
/// `Empty → Populating → Populated`. `Populating` covers the fetch in flight
/// and the insertions that follow it. A rejected fetch returns the overlay to
/// `Empty`; one that is never answered stays `Populating` with no graphics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    Empty,
    Populating,
    Populated,
}

/// Outcome of the remote fetch feeding an overlay, kept for diagnostics.
/// It never changes what the renderer is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    /// The overlay is built locally.
    NotRequested,
    Pending,
    Resolved { count: usize },
    Rejected { message: String },
}

#[derive(Debug)]
struct OverlayInner {
    title: String,
    graphics: Vec<Graphic>,
    state: OverlayState,
    fetch: FetchStatus,
}

/// Insertion-ordered collection of graphics exposed to the renderer as one
/// map layer.
///
/// Cloning yields another handle to the same collection. Readers may look at
/// it at any time, including mid-population; only this crate writes to it.
#[derive(Debug, Clone)]
pub struct Overlay {
    id: LayerId,
    inner: Arc<RwLock<OverlayInner>>,
}

/// Point-in-time copy of an overlay, as served to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySnapshot {
    pub id: LayerId,
    pub title: String,
    pub state: OverlayState,
    pub fetch_status: FetchStatus,
    pub graphics: Vec<Graphic>,
}

impl Overlay {
    /// An empty, open overlay.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self::with_id(LayerId(id), title)
    }

    pub(crate) fn with_id(id: LayerId, title: impl Into<String>) -> Self {
        Self {
            id,
            inner: Arc::new(RwLock::new(OverlayInner {
                title: title.into(),
                graphics: Vec::new(),
                state: OverlayState::Empty,
                fetch: FetchStatus::NotRequested,
            })),
        }
    }

    /// A fully populated overlay that will receive no further insertions.
    pub(crate) fn closed(id: LayerId, title: impl Into<String>, graphics: Vec<Graphic>) -> Self {
        let overlay = Self::with_id(id, title);
        {
            let mut inner = overlay.inner.write();
            inner.graphics = graphics;
            inner.state = OverlayState::Populated;
        }
        overlay
    }

    pub fn len(&self) -> usize {
        self.inner.read().graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().graphics.is_empty()
    }

    pub fn state(&self) -> OverlayState {
        self.inner.read().state
    }

    pub fn fetch_status(&self) -> FetchStatus {
        self.inner.read().fetch.clone()
    }

    /// Copy of the current graphics, in insertion order.
    pub fn graphics(&self) -> Vec<Graphic> {
        self.inner.read().graphics.clone()
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        let inner = self.inner.read();
        OverlaySnapshot {
            id: self.id,
            title: inner.title.clone(),
            state: inner.state,
            fetch_status: inner.fetch.clone(),
            graphics: inner.graphics.clone(),
        }
    }

    /// Whether both handles refer to the same collection.
    pub fn same_as(&self, other: &Overlay) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn set_fetch_status(&self, status: FetchStatus) {
        self.inner.write().fetch = status;
    }

    pub(crate) fn begin_population(&self) {
        self.inner.write().state = OverlayState::Populating;
    }

    /// Append one graphic. Takes the write lock per insertion so readers can
    /// observe a partially filled overlay.
    pub(crate) fn add(&self, graphic: Graphic) {
        self.inner.write().graphics.push(graphic);
    }

    /// Back to `Empty` with nothing inserted; the reason is kept in the fetch
    /// status.
    pub(crate) fn abandon_population(&self, message: String) {
        let mut inner = self.inner.write();
        inner.graphics.clear();
        inner.state = OverlayState::Empty;
        inner.fetch = FetchStatus::Rejected { message };
    }

    pub(crate) fn finish_population(&self, count: usize) {
        let mut inner = self.inner.write();
        inner.state = OverlayState::Populated;
        inner.fetch = FetchStatus::Resolved { count };
    }
}

impl Layer for Overlay {
    fn id(&self) -> LayerId {
        self.id
    }

    fn title(&self) -> String {
        self.inner.read().title.clone()
    }
}
