//! The `tpuff list` command — one-shot namespace listing.

use std::time::Duration;

use tpuff_exporter::{FetchPlan, fetch_namespaces};

pub async fn run(region: Option<String>, all_regions: bool) -> anyhow::Result<()> {
    if all_regions && region.is_some() {
        anyhow::bail!("a single region and --all-regions are mutually exclusive");
    }

    let client = crate::client::build(Duration::from_secs(30))?;
    let plan = FetchPlan {
        region,
        all_regions,
        include_recall: false,
    };
    let mut snapshots = fetch_namespaces(&client, &plan).await?;

    if snapshots.is_empty() {
        println!("No namespaces found.");
        return Ok(());
    }

    snapshots.sort_by(|a, b| (&a.region, &a.id).cmp(&(&b.region, &b.id)));

    println!(
        "{:<40} {:<28} {:>12} {:>16}  {}",
        "NAMESPACE", "REGION", "ROWS", "LOGICAL BYTES", "INDEX"
    );
    for snap in &snapshots {
        let region = if snap.region.is_empty() {
            "-"
        } else {
            snap.region.as_str()
        };
        println!(
            "{:<40} {:<28} {:>12} {:>16}  {}",
            snap.id,
            region,
            snap.approx_row_count,
            snap.approx_logical_bytes,
            snap.index_status.as_str()
        );
    }
    Ok(())
}
