pub mod assignment_controller;
pub mod damage_controller;
pub mod earning_controller;
pub mod kyc_controller;
pub mod vehicle_controller;
