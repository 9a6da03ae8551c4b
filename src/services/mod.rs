mod application_service;
mod auth_service;
mod company_service;
mod employer_request_service;
mod job_service;
mod resume_storage;
mod staff_service;

pub use application_service::*;
pub use auth_service::*;
pub use company_service::*;
pub use employer_request_service::*;
pub use job_service::*;
pub use resume_storage::*;
pub use staff_service::*;
