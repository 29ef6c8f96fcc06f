pub mod collect;
pub mod commons;
pub mod geo_core;
pub mod geometric;
pub mod scene;

pub use collect::error::CollectError;
pub use collect::overpass::overpass_collect::OverpassCollect;
pub use geo_core::{BoundingBox, Coordinate};
pub use geometric::building::{BuildingCollection, BuildingQueryResult, BuildingRecord};
pub use geometric::element::Element;
pub use scene::czml::ScenePacketDocument;
pub use scene::czml_writer::CzmlWriter;
