//! GeoJSON and WKT export of isochrone maps for the renderer handoff.

use geo::MultiPoint;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;
use wkt::ToWkt;

use super::isochrone::{IsochroneBand, IsochroneGeometry, IsochroneMap};
use crate::Error;
use crate::model::TravelGraph;

impl IsochroneMap {
    /// Converts the map to a `GeoJSON` `FeatureCollection`: one feature per
    /// band (empty bands keep a null geometry) plus one multipoint feature
    /// for the unreached group.
    ///
    /// Band features carry `threshold`, `band` (the palette index) and
    /// `node_count` properties.
    ///
    /// # Errors
    ///
    /// Returns an error if feature assembly fails.
    pub fn to_geojson(&self, graph: &TravelGraph) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.bands().len() + 1);

        for (index, band) in self.bands().iter().enumerate() {
            features.push(band.to_feature(index)?);
        }
        features.push(self.unreached_feature(graph)?);

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, graph: &TravelGraph) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(graph)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn unreached_feature(&self, graph: &TravelGraph) -> Result<Feature, Error> {
        let points: MultiPoint<f64> = self
            .unreached()
            .iter()
            .filter_map(|&node| graph.geometry(node))
            .collect();
        let geometry = if points.0.is_empty() {
            None
        } else {
            Some(Geometry::new(GeoJsonValue::from(&points)))
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "band": "unreached",
                "node_count": self.unreached().len(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

impl IsochroneBand {
    /// The band geometry as a WKT string, `None` for an empty band.
    pub fn to_wkt(&self) -> Option<String> {
        self.geometry
            .to_geometry()
            .map(|geometry| geometry.to_wkt().to_string())
    }

    fn to_feature(&self, index: usize) -> Result<Feature, Error> {
        let geometry = self
            .geometry
            .to_geometry()
            .map(|geometry| Geometry::new(GeoJsonValue::from(&geometry)));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "threshold": self.threshold,
                "band": index,
                "node_count": self.nodes.len(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

impl IsochroneGeometry {
    /// The geometry as a WKT string, `None` when empty.
    pub fn to_wkt_string(&self) -> Option<String> {
        self.to_geometry()
            .map(|geometry| geometry.to_wkt().to_string())
    }
}
