pub mod campaign;
pub mod chunk;
pub mod constants;
pub mod error;
pub mod level;
pub mod progression;
pub mod types;
pub mod world;
