pub mod attributes;
pub mod building;
pub mod element;
pub mod graph;
pub mod ring;
