pub mod db;
pub mod routes;
mod startup;
mod utils;

pub use db::{
    ClimateAccess, ClimateData, PrecipitationReading, Station, TemperatureReading,
    TemperatureSummary,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
