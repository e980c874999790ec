/// 花名册原始 CSV 文本
pub const ROSTER_DATA_KEY: &str = "university_data";

/// 花名册缓存时间（毫秒时间戳）
pub const ROSTER_TIME_KEY: &str = "university_data_time";

/// 当前登录学生（JSON）
pub const SESSION_DATA_KEY: &str = "currentStudent";

/// 会话时间（毫秒时间戳）
pub const SESSION_TIME_KEY: &str = "sessionTime";
