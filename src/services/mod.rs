pub mod assignment_service;
pub mod damage_service;
pub mod earnings_service;
pub mod kyc_service;
