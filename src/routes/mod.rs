pub mod damage_routes;
pub mod earning_routes;
pub mod kyc_routes;
pub mod rider_routes;
pub mod vehicle_routes;
