pub mod city;
pub mod continent;
pub mod master;
pub mod material;
pub mod meteorite;

pub use city::{City, RawCity};
pub use continent::{Continent, RawContinent};
pub use master::MasterRecord;
pub use material::MaterialClass;
pub use meteorite::{Meteorite, RawMeteorite};
