mod audit;
mod engine;

pub use audit::{AccessAudit, AuditEntry};
pub use engine::{Decision, PrincipalResolver, ResourceChecker};
