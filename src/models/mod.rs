//! Typed table records
//!
//! Raw source records are read column-wise out of loosely typed input
//! tables. Dimension and fact records carry an explicit Arrow schema and
//! convert to and from record batches through [`ArrowSchema`].

pub mod dimension;
pub mod fact;
pub mod raw;
pub mod traits;

pub use dimension::{
    AirportRow, MigrantRow, StateRow, StatusRow, TemperatureRow, TimeRow, VisaRow,
};
pub use fact::ImmigrationFactRow;
pub use raw::{AirportRecord, ClimateRecord, CountryRecord, DemographicRecord, TravelerRecord};
pub use traits::{ArrowSchema, BusinessKey};
