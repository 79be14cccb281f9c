pub mod contact_service;
pub mod export;
