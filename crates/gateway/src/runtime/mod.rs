pub mod jobs;
pub mod validator;
