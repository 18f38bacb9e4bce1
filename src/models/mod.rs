pub mod tier;
pub mod user;
pub mod standing;
pub mod error;

pub use tier::*;
pub use user::*;
pub use standing::*;
pub use error::*;
