pub mod chart;
pub mod period;
pub mod price;
pub mod ratio;

pub use chart::*;
pub use period::*;
pub use price::*;
pub use ratio::*;
