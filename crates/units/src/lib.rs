pub mod energy;
pub mod length;
pub mod time;
pub mod velocity;

#[cfg(test)]
mod length_test;
#[cfg(test)]
mod time_test;
#[cfg(test)]
mod velocity_test;

pub use energy::Energy;
pub use length::Length;
pub use time::Time;
pub use velocity::{Velocity, SPEED_OF_LIGHT_CM_PER_NS};
