//! Audit trail wiring for the mutation endpoints.
//!
//! Every successful mutation appends one audit row recording who did what to
//! which record, with opaque JSON snapshots of the row before and after the
//! change. Failure to write the audit row is logged but never fails the
//! request that triggered it.

use db::models::audit_log::Model as AuditLogModel;
use sea_orm::DbConn;
use serde::Serialize;
use std::net::IpAddr;

/// Appends an audit entry for a completed mutation.
///
/// `old` and `new` are serialized to JSON here so that handlers only pass
/// their models. Serialization or insert failures are reported via `tracing`
/// and otherwise swallowed.
pub async fn record_mutation<O, N>(
    db: &DbConn,
    actor_id: i64,
    action: &str,
    table_name: &str,
    record_id: i64,
    old: Option<&O>,
    new: Option<&N>,
    ip: Option<IpAddr>,
) where
    O: Serialize,
    N: Serialize,
{
    let old_value = old.and_then(|v| serde_json::to_string(v).ok());
    let new_value = new.and_then(|v| serde_json::to_string(v).ok());
    let ip_address = ip.map(|addr| addr.to_string());

    if let Err(e) = AuditLogModel::record(
        db,
        Some(actor_id),
        action,
        Some(table_name),
        Some(record_id),
        old_value,
        new_value,
        ip_address.as_deref(),
    )
    .await
    {
        tracing::warn!(
            error = %e,
            actor_id,
            action,
            table_name,
            record_id,
            "Failed to write audit log entry"
        );
    }
}
