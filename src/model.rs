pub mod enrollment;
pub mod profile;
pub mod quiz_question;
pub mod request;
pub mod response;
