use crate::prelude::{ResolveError, ResolveResult};
use geo::{Contains, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Outline of a single region in (lon, lat) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Boundary {
    /// Every ring of the outline, exteriors first within each polygon.
    pub fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        let polygons: Vec<&Polygon<f64>> = match self {
            Boundary::Polygon(polygon) => vec![polygon],
            Boundary::MultiPolygon(multi) => multi.0.iter().collect(),
        };
        polygons
            .into_iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .map(|ring| ring.coords().map(|c| (c.x, c.y)).collect())
            .collect()
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let point = Point::new(lon, lat);
        match self {
            Boundary::Polygon(polygon) => polygon.contains(&point),
            Boundary::MultiPolygon(multi) => multi.contains(&point),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub id: String,
    pub display_name: Option<String>,
    pub boundary: Boundary,
}

impl RegionGeometry {
    pub fn new(id: impl Into<String>, display_name: Option<String>, boundary: Boundary) -> Self {
        Self {
            id: id.into(),
            display_name,
            boundary,
        }
    }

    /// Text for non-visual consumers: the display name, or the id when the
    /// region has no usable name.
    pub fn accessible_label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }
}

/// Where a resolved dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Remote,
    Fallback,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Remote => f.write_str("remote"),
            DatasetSource::Fallback => f.write_str("fallback"),
        }
    }
}

/// Immutable set of region boundaries produced by one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDataset {
    regions: Vec<RegionGeometry>,
    source: DatasetSource,
}

impl GeoDataset {
    /// Builds a dataset, rejecting duplicate region ids.
    pub fn new(regions: Vec<RegionGeometry>, source: DatasetSource) -> ResolveResult<Self> {
        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if !seen.insert(region.id.as_str()) {
                return Err(ResolveError::Malformed(format!(
                    "duplicate region id {:?}",
                    region.id
                )));
            }
        }
        Ok(Self { regions, source })
    }

    /// For embedded data whose ids are known to be unique.
    pub(crate) fn from_trusted(regions: Vec<RegionGeometry>, source: DatasetSource) -> Self {
        Self { regions, source }
    }

    pub fn regions(&self) -> &[RegionGeometry] {
        &self.regions
    }

    pub fn source(&self) -> DatasetSource {
        self.source
    }

    pub fn region(&self, id: &str) -> Option<&RegionGeometry> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn region_ids(&self) -> Vec<&str> {
        self.regions.iter().map(|region| region.id.as_str()).collect()
    }

    /// First region whose boundary contains the coordinate.
    pub fn region_at(&self, lon: f64, lat: f64) -> Option<&RegionGeometry> {
        self.regions
            .iter()
            .find(|region| region.boundary.contains(lon, lat))
    }
}
