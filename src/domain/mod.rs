pub mod command;
pub mod error;
pub mod snapshot;
pub mod station;
pub mod status;
pub mod time_remaining;

pub use command::*;
pub use error::*;
pub use snapshot::*;
pub use station::*;
pub use status::*;
pub use time_remaining::*;
