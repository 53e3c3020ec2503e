pub mod experience;
pub mod job_application;
pub mod user;
