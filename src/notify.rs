use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Success => "success",
        };
        f.write_str(name)
    }
}

/// 面向用户的提示，发出即忘
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// 把提示写入日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(%severity, "{}", message),
            Severity::Warning => tracing::warn!(%severity, "{}", message),
            Severity::Info | Severity::Success => tracing::info!(%severity, "{}", message),
        }
    }
}
