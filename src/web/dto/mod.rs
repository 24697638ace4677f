//! Request and response DTOs for the doorkeep web API.

pub mod request;
pub mod response;

pub use request::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    SendResetEmailRequest,
};
pub use response::{LoggedUserResponse, StatusResponse, UserInfo};
