pub mod city_reader;
pub mod continent_reader;
pub mod meteorite_reader;
pub mod source;
pub mod table_loader;

pub use city_reader::CityReader;
pub use continent_reader::ContinentReader;
pub use meteorite_reader::MeteoriteReader;
pub use source::SourceReader;
pub use table_loader::{InputPaths, RawTables, TableLoader};
