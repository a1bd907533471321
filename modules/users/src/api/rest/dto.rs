use serde::{Deserialize, Serialize};

use crate::contract::{NewUser, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub display_name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
    pub display_name: String,
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            display_name: req.display_name,
        }
    }
}
