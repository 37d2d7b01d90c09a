use crate::coverage::{self, CoveragePolygon};
use crate::models::{Coordinate, FeatureCollection};

/// Drawing primitives the session needs from a map widget.
///
/// Handles returned by `add_*` are later passed back to `remove_*`; the
/// session owns them in between.
pub trait MapSurface {
    type Marker;
    type Layer;

    fn add_marker(&mut self, at: Coordinate) -> Self::Marker;
    fn remove_marker(&mut self, marker: &Self::Marker);
    /// Draw `polygons` as one group and add it to the map.
    fn add_layer(&mut self, polygons: &[CoveragePolygon]) -> Self::Layer;
    fn remove_layer(&mut self, layer: &Self::Layer);
}

/// Transient UI state: the selected coordinate's marker and the rendered
/// coverage layer group. At most one of each is on the map at any time.
pub struct CoverageSession<S: MapSurface> {
    surface: S,
    selection: Option<Coordinate>,
    marker: Option<S::Marker>,
    layer: Option<S::Layer>,
}

impl<S: MapSurface> CoverageSession<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            selection: None,
            marker: None,
            layer: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn selection(&self) -> Option<Coordinate> {
        self.selection
    }

    pub fn marker(&self) -> Option<&S::Marker> {
        self.marker.as_ref()
    }

    pub fn layer(&self) -> Option<&S::Layer> {
        self.layer.as_ref()
    }

    /// Replace the selected coordinate, moving the marker with it.
    pub fn select(&mut self, at: Coordinate) {
        if let Some(old) = self.marker.take() {
            self.surface.remove_marker(&old);
        }
        self.marker = Some(self.surface.add_marker(at));
        self.selection = Some(at);
    }

    /// Replace the coverage layer with the features above `threshold`.
    /// Returns the number of polygons drawn.
    pub fn render(&mut self, collection: &FeatureCollection, threshold: f64) -> usize {
        if let Some(old) = self.layer.take() {
            self.surface.remove_layer(&old);
        }
        let polygons = coverage::build_polygons(collection, threshold);
        self.layer = Some(self.surface.add_layer(&polygons));
        polygons.len()
    }
}
