pub mod answer;
pub mod identity_state;
pub mod profile;
pub mod question;
pub mod route;
pub mod route_decision;
pub mod user;
