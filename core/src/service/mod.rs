pub mod aggregate;
pub mod brand_service;
pub mod dto;
pub mod sheet_service;
