use super::region::{Boundary, DatasetSource, GeoDataset, RegionGeometry};
use geo::{LineString, Polygon};

/// Coarse outlines of the five macro-regions, used whenever the remote state
/// boundaries cannot be obtained. Approximate on purpose.
const FALLBACK_REGIONS: [(&str, &str, &[(f64, f64)]); 5] = [
    (
        "N",
        "Norte",
        &[
            (-74.0, 1.0),
            (-66.0, 5.0),
            (-60.0, 5.0),
            (-51.0, 3.0),
            (-50.0, -2.0),
            (-52.0, -6.0),
            (-60.0, -8.0),
            (-67.0, -10.0),
            (-73.0, -5.0),
            (-74.0, 1.0),
        ],
    ),
    (
        "NE",
        "Nordeste",
        &[
            (-46.0, -2.0),
            (-41.0, -2.0),
            (-35.0, -6.0),
            (-34.0, -10.0),
            (-38.0, -13.0),
            (-42.0, -12.0),
            (-46.0, -10.0),
            (-50.0, -8.0),
            (-50.0, -2.0),
            (-46.0, -2.0),
        ],
    ),
    (
        "CO",
        "Centro-Oeste",
        &[
            (-60.0, -8.0),
            (-52.0, -6.0),
            (-50.0, -8.0),
            (-49.0, -14.0),
            (-54.0, -17.0),
            (-59.0, -16.0),
            (-60.0, -12.0),
            (-60.0, -8.0),
        ],
    ),
    (
        "SE",
        "Sudeste",
        &[
            (-50.0, -20.0),
            (-42.0, -18.0),
            (-39.0, -20.0),
            (-41.0, -24.0),
            (-46.0, -25.0),
            (-50.0, -23.0),
            (-50.0, -20.0),
        ],
    ),
    (
        "S",
        "Sul",
        &[
            (-58.0, -23.0),
            (-54.0, -31.0),
            (-50.0, -33.0),
            (-47.0, -31.0),
            (-51.0, -28.0),
            (-54.0, -25.0),
            (-58.0, -23.0),
        ],
    ),
];

/// Embedded boundary dataset that never fails to load.
pub struct GeometrySource;

impl GeometrySource {
    pub fn dataset() -> GeoDataset {
        let regions = FALLBACK_REGIONS
            .iter()
            .map(|(id, name, ring)| {
                let exterior = LineString::from(ring.to_vec());
                RegionGeometry::new(
                    *id,
                    Some((*name).to_string()),
                    Boundary::Polygon(Polygon::new(exterior, Vec::new())),
                )
            })
            .collect();
        GeoDataset::from_trusted(regions, DatasetSource::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_five_macro_regions() {
        let dataset = GeometrySource::dataset();
        assert_eq!(dataset.source(), DatasetSource::Fallback);
        assert_eq!(dataset.region_ids(), vec!["N", "NE", "CO", "SE", "S"]);
    }

    #[test]
    fn fallback_regions_carry_names() {
        let dataset = GeometrySource::dataset();
        let labels: Vec<&str> = dataset
            .regions()
            .iter()
            .map(|region| region.accessible_label())
            .collect();
        assert_eq!(
            labels,
            vec!["Norte", "Nordeste", "Centro-Oeste", "Sudeste", "Sul"]
        );
    }

    #[test]
    fn interior_point_resolves_to_centro_oeste() {
        let dataset = GeometrySource::dataset();
        let region = dataset.region_at(-51.0, -12.0).map(|r| r.id.as_str());
        assert_eq!(region, Some("CO"));
    }
}
