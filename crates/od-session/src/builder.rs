//! Fluent builder for constructing an [`Explorer`].

use std::path::Path;

use od_data::Dataset;
use od_flow::{FilterSpec, FlowQuery, FlowView, Selection};

use crate::{Explorer, FlowObserver, NoopObserver, SessionError, SessionResult};

/// Fluent builder for [`Explorer<O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                        |
/// |------------------|------------------------------------------------|
/// | `.selection(s)`  | nothing selected                               |
/// | `.filter(f)`     | `FilterSpec::for_store(&data.trips)`           |
/// | `.query(q)`      | sets selection and filter together             |
/// | `.observer(o)`   | [`NoopObserver`]                               |
///
/// # Example
///
/// ```rust,ignore
/// let mut explorer = ExplorerBuilder::load(shapes, counts)?
///     .selection(["A", "B"].into_iter().collect())
///     .observer(writer)
///     .build()?;
/// explorer.toggle_hour(Hour::new(8).unwrap());
/// ```
pub struct ExplorerBuilder<O: FlowObserver = NoopObserver> {
    data:      Dataset,
    selection: Option<Selection>,
    filter:    Option<FilterSpec>,
    observer:  O,
}

impl ExplorerBuilder<NoopObserver> {
    /// Start from an already loaded dataset.
    pub fn new(data: Dataset) -> Self {
        Self { data, selection: None, filter: None, observer: NoopObserver }
    }

    /// Load the zone file and trip table, then start building.
    ///
    /// Any load failure is terminal: the error is returned and no session
    /// exists.
    pub fn load(shapes: &Path, counts: &Path) -> SessionResult<Self> {
        Ok(Self::new(Dataset::load(shapes, counts)?))
    }
}

impl<O: FlowObserver> ExplorerBuilder<O> {
    /// The loaded data, e.g. to derive store-dependent filter defaults
    /// before building.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Start from a saved query: its selection and its filter.
    pub fn query(mut self, query: FlowQuery) -> Self {
        self.selection = Some(query.selection);
        self.filter = Some(query.filter);
        self
    }

    /// Replace the observer.  It receives `on_load` and the first `on_view`
    /// during [`build`](Self::build).
    pub fn observer<P: FlowObserver>(self, observer: P) -> ExplorerBuilder<P> {
        ExplorerBuilder {
            data:      self.data,
            selection: self.selection,
            filter:    self.filter,
            observer,
        }
    }

    /// Validate the initial selection, notify the observer of the load, and
    /// compute the first view.
    pub fn build(self) -> SessionResult<Explorer<O>> {
        let selection = self.selection.unwrap_or_default();
        if let Some(unknown) = selection.iter().find(|id| !self.data.zones.contains(id.as_str())) {
            return Err(SessionError::UnknownZone(unknown.to_string()));
        }
        let filter = self.filter.unwrap_or_else(|| FilterSpec::for_store(&self.data.trips));

        let mut explorer = Explorer {
            data: self.data,
            selection,
            filter,
            view: FlowView::default(),
            renders: 0,
            observer: self.observer,
        };
        explorer.observer.on_load(&explorer.data.report);
        explorer.refresh();
        Ok(explorer)
    }
}
