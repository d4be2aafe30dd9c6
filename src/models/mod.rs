pub mod damage_record;
pub mod earning;
pub mod kyc_document;
pub mod rider;
pub mod vehicle;
