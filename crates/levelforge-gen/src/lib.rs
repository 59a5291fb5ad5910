//! Level generation: the seeded RNG, the procedural chunk generator, the
//! authored-level assembler and the structural post-check.

pub mod authored;
mod builder;
pub mod families;
pub mod generator;
pub mod rng;
pub mod structural;

pub use authored::{assemble_authored_level, AssembleError};
pub use generator::{generate_level, LevelRequest};
pub use rng::SeededRng;
pub use structural::{check_level, validate_level, LevelCheck, StructuralError};
