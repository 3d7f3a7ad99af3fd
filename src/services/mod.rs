pub mod activities_service;
pub mod registration_service;
