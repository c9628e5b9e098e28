pub mod currency;
pub mod holding;
pub mod ledger;
pub mod position;
pub mod settings;
pub mod status;
pub mod summary;
pub mod transaction;
