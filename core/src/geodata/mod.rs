pub mod fallback;
pub mod parse;
pub mod region;
pub mod remote;
pub mod resolver;
pub mod state;

pub use fallback::GeometrySource;
pub use parse::parse_feature_collection;
pub use region::{Boundary, DatasetSource, GeoDataset, RegionGeometry};
pub use remote::{BoundarySource, HttpBoundarySource};
pub use resolver::GeoDataResolver;
pub use state::{GeoDataState, GeoStatus, Resolution, ResolutionTicket};
