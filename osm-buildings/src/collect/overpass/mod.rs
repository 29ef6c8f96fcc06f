pub mod overpass_collect;
pub mod payload;
