pub mod assignment_repository;
pub mod damage_repository;
pub mod earning_repository;
pub mod kyc_repository;
pub mod rider_repository;
pub mod vehicle_repository;
