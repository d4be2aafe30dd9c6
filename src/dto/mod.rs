pub mod common;
pub mod damage_dto;
pub mod earning_dto;
pub mod kyc_dto;
pub mod rider_dto;
pub mod vehicle_dto;
