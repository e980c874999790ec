use serde::{Deserialize, Serialize};

use crate::session::Session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    #[serde(default)]
    pub password: String,
}

/// 学生信息及缴费余额
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub session: Session,
    pub balance: f64,
}

impl From<Session> for StudentResponse {
    fn from(session: Session) -> Self {
        let balance = session.balance();
        Self { session, balance }
    }
}
