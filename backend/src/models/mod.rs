pub mod candidate;
pub mod genre;
pub mod instance;
pub mod macros;
pub mod time;

pub use candidate::*;
pub use genre::*;
pub use instance::*;
pub use time::*;
