pub mod accrual;
pub mod address_service;
pub mod format;
pub mod lifecycle;
pub mod position_service;
pub mod rates;
pub mod summary_service;
pub mod wallet_service;
