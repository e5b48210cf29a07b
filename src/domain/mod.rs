pub mod earthquake;
pub mod error_kind;
pub mod magnitude;

pub use earthquake::{Earthquake, Position};
pub use error_kind::{DecodeErrorKind, ErrorKind};
pub use magnitude::MagnitudeClass;
