//! Vehicle records and the remote store that holds them.

pub mod api_types;
pub mod client;
pub mod fields;
pub mod types;

pub use client::{RecordStore, RestClient};
pub use types::{CarStatus, Motorcycle, MotorcycleDraft, StatusFilter, TransferType, VehicleDetails};
