// CZML scene output for time-dynamic globe viewers
pub mod czml;
pub mod czml_writer;
