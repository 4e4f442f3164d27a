pub mod controller;
pub mod model;
pub mod provider;
pub mod router;
