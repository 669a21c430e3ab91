//! Domain models shared by the repository, service and HTTP layers.

pub mod astronaut;
pub mod macros;
pub mod person;

pub use astronaut::*;
pub use person::*;
