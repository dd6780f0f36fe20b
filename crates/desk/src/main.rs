use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use staysync_audit::{AuditSink, InMemoryAuditLog, TracingAuditSink};
use staysync_catalog::InMemoryCatalog;
use staysync_desk::{AuditMode, DeskConfig, FrontDesk, seed_bookings};
use staysync_pricing::DayRuleTable;
use staysync_reservations::OccupancyPeriod;

fn main() -> anyhow::Result<()> {
    let config = DeskConfig::from_env()?;
    staysync_observability::init(config.log_format);
    tracing::info!(?config, "configuration loaded");

    let catalog = config.load_catalog()?;
    let seed = config.catalog_path.is_none();
    let rules = config.day_rules();

    match config.audit {
        AuditMode::Tracing => report(catalog, TracingAuditSink, rules, seed),
        AuditMode::Memory => {
            let log = Arc::new(InMemoryAuditLog::new());
            report(catalog, log.clone(), rules, seed)?;
            for statement in log.statements() {
                println!("{statement}");
            }
            Ok(())
        }
    }
}

/// Build the desk and print its snapshot with the dashboard for the month of
/// the earliest stay (or the current month when there are none).
fn report<S: AuditSink>(
    catalog: InMemoryCatalog,
    sink: S,
    rules: DayRuleTable,
    seed: bool,
) -> anyhow::Result<()> {
    let mut desk = FrontDesk::new(catalog, sink, rules);
    if seed {
        let ids = seed_bookings(&mut desk).context("seeding initial bookings")?;
        tracing::info!(count = ids.len(), "initial bookings committed");
    }

    let anchor = desk
        .reservations()
        .iter()
        .map(|r| r.start_date())
        .min()
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let month = OccupancyPeriod::month_of(anchor)?;
    let snapshot = desk.snapshot();

    let out = json!({
        "month": format!("{}", anchor.format("%Y-%m")),
        "statusCounts": desk.status_counts(month),
        "occupancy": desk.occupancy(month),
        "bookedRevenue": snapshot.booked_revenue(),
        "snapshot": snapshot,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
