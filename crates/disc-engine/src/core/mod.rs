pub mod collision;
pub mod particle;
pub mod world;
