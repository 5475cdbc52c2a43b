pub mod planets;
pub mod signs;

pub use planets::{Planet, PLANET_COUNT};
pub use signs::{Sign, SIGN_COUNT};
