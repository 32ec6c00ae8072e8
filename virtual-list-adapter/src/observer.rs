use alloc::string::String;
use core::fmt;

use virtual_list::VisibilityRecord;

/// Options forwarded to the platform's intersection watcher.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverConfig<E> {
    /// Fraction of the element that must be visible to count as intersecting.
    pub threshold: f64,
    /// CSS-style margin grown around the root before intersecting (e.g. `"0px 0px 200px 0px"`).
    pub root_margin: String,
    /// Scroll ancestor to intersect with; `None` means the viewport.
    pub root: Option<E>,
}

impl<E> Default for ObserverConfig<E> {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: String::from("0px"),
            root: None,
        }
    }
}

impl<E> ObserverConfig<E> {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = root_margin.into();
        self
    }

    pub fn with_root(mut self, root: Option<E>) -> Self {
        self.root = root;
        self
    }
}

/// The platform's viewport-intersection capability (e.g. a DOM `IntersectionObserver`).
///
/// Implementations register interest; intersection results flow back through
/// [`VisibilityObserver::on_intersection`].
pub trait IntersectionBackend<E> {
    /// Starts watching `element`. Returns `false` when the platform cannot observe it.
    fn observe(&mut self, element: &E, config: &ObserverConfig<E>) -> bool;

    fn unobserve(&mut self, element: &E);

    /// Releases the watcher and every element reference it holds.
    fn disconnect(&mut self);
}

/// Tracks whether one element is on screen, and whether it ever was.
///
/// The observer owns at most one attached element. Attaching another element stops watching the
/// previous one; dropping the observer disconnects the backend. Without a backend (or when the
/// backend refuses an element) the element simply never intersects.
///
/// `has_intersected` is a latch owned by the observer: once set it survives later
/// non-intersecting results, detaching, and re-attaching.
pub struct VisibilityObserver<E, B>
where
    B: IntersectionBackend<E>,
{
    backend: Option<B>,
    config: ObserverConfig<E>,
    element: Option<E>,
    observing: bool,
    record: VisibilityRecord,
}

impl<E, B> VisibilityObserver<E, B>
where
    E: PartialEq,
    B: IntersectionBackend<E>,
{
    pub fn new(backend: Option<B>, config: ObserverConfig<E>) -> Self {
        if backend.is_none() {
            vwarn!("VisibilityObserver: no intersection backend; elements never intersect");
        }
        Self {
            backend,
            config,
            element: None,
            observing: false,
            record: VisibilityRecord::default(),
        }
    }

    /// An observer for hosts without intersection support.
    pub fn unsupported(config: ObserverConfig<E>) -> Self {
        Self::new(None, config)
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_some()
    }

    pub fn config(&self) -> &ObserverConfig<E> {
        &self.config
    }

    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Whether the attached element is currently being watched by the backend.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn record(&self) -> VisibilityRecord {
        self.record
    }

    pub fn is_intersecting(&self) -> bool {
        self.record.is_intersecting
    }

    pub fn has_intersected(&self) -> bool {
        self.record.has_intersected
    }

    /// Attaches `element`, replacing (and unobserving) any previous one.
    ///
    /// Re-attaching the current element is a no-op.
    pub fn attach(&mut self, element: E) {
        if self.element.as_ref() == Some(&element) {
            return;
        }
        self.detach();

        self.observing = match self.backend.as_mut() {
            Some(backend) => backend.observe(&element, &self.config),
            None => false,
        };
        if !self.observing && self.backend.is_some() {
            vwarn!("VisibilityObserver::attach: backend refused element");
        }
        vtrace!(observing = self.observing, "VisibilityObserver::attach");
        self.element = Some(element);
    }

    /// Stops watching the attached element, returning it.
    pub fn detach(&mut self) -> Option<E> {
        let element = self.element.take()?;
        if self.observing {
            if let Some(backend) = self.backend.as_mut() {
                backend.unobserve(&element);
            }
        }
        self.observing = false;
        self.record.is_intersecting = false;
        vtrace!("VisibilityObserver::detach");
        Some(element)
    }

    /// Delivers an intersection result from the backend.
    ///
    /// Results for elements other than the attached one (e.g. late callbacks for an element that
    /// was just replaced) are ignored. Returns `true` if the result was applied.
    pub fn on_intersection(&mut self, element: &E, is_intersecting: bool) -> bool {
        if !self.observing || self.element.as_ref() != Some(element) {
            return false;
        }
        self.record.apply(is_intersecting);
        true
    }
}

impl<E, B> Drop for VisibilityObserver<E, B>
where
    B: IntersectionBackend<E>,
{
    fn drop(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if self.observing {
            if let Some(element) = self.element.as_ref() {
                backend.unobserve(element);
            }
        }
        backend.disconnect();
    }
}

impl<E: fmt::Debug, B> fmt::Debug for VisibilityObserver<E, B>
where
    B: IntersectionBackend<E>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityObserver")
            .field("supported", &self.backend.is_some())
            .field("config", &self.config)
            .field("element", &self.element)
            .field("observing", &self.observing)
            .field("record", &self.record)
            .finish()
    }
}
