pub mod db;
pub mod diagnostic;
pub mod error;
pub mod guide;
pub mod ledger;
pub mod light;
pub mod models;
pub mod nutrients;
pub mod progression;
pub mod recommend;
pub mod service;
pub mod store;

pub use error::GardenError;
pub use service::GardenService;
