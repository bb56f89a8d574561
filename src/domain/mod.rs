pub mod game;
pub mod metrics;
pub mod ranking;
pub mod schedule;
pub mod standings;
pub mod team;

pub use game::*;
pub use metrics::*;
pub use ranking::*;
pub use schedule::*;
pub use standings::*;
pub use team::*;
