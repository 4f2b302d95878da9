//! Prometheus text exposition format.
//!
//! A small generic metric model rendered into the text exposition
//! format: one `# HELP` line, one `# TYPE` line, then one sample line
//! per value. Label values are escaped per the format (backslash,
//! double quote, line feed). Families with no samples are omitted
//! entirely.

use crate::snapshot::NamespaceSnapshot;

/// Metric type emitted on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

/// One sample: a label set and a value.
#[derive(Debug, Clone)]
pub struct Sample {
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

/// A named metric family with its samples.
#[derive(Debug, Clone)]
pub struct MetricFamily {
    pub name: &'static str,
    pub kind: MetricKind,
    pub help: &'static str,
    pub values: Vec<Sample>,
}

impl MetricFamily {
    pub fn gauge(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Gauge,
            help,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, labels: Vec<(String, String)>, value: f64) {
        self.values.push(Sample { labels, value });
    }
}

/// A gauge with a single unlabeled value.
pub fn simple_gauge(name: &'static str, help: &'static str, value: f64) -> MetricFamily {
    MetricFamily {
        name,
        kind: MetricKind::Gauge,
        help,
        values: vec![Sample {
            labels: Vec::new(),
            value,
        }],
    }
}

/// Escape a label value: backslash, double quote, and line feed.
pub fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render families into exposition text. Families with zero samples are
/// skipped; the rest are separated by a blank line.
pub fn render(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for (i, family) in families.iter().filter(|f| !f.values.is_empty()).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# HELP {} {}\n", family.name, family.help));
        out.push_str(&format!("# TYPE {} {}\n", family.name, family.kind.as_str()));
        for sample in &family.values {
            if sample.labels.is_empty() {
                out.push_str(&format!("{} {}\n", family.name, sample.value));
            } else {
                let labels = sample
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{}\"", escape_label_value(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                out.push_str(&format!("{}{{{labels}}} {}\n", family.name, sample.value));
            }
        }
    }
    out
}

/// Build the per-namespace metric families from a cycle's snapshots.
///
/// The recall family only carries namespaces that produced a recall
/// value; when recall is disabled the family stays empty and `render`
/// drops it.
pub fn namespace_families(snapshots: &[NamespaceSnapshot]) -> Vec<MetricFamily> {
    let mut rows = MetricFamily::gauge(
        "turbopuffer_namespace_rows",
        "Approximate number of rows in namespace",
    );
    let mut logical_bytes = MetricFamily::gauge(
        "turbopuffer_namespace_logical_bytes",
        "Approximate logical storage size in bytes",
    );
    let mut unindexed_bytes = MetricFamily::gauge(
        "turbopuffer_namespace_unindexed_bytes",
        "Number of unindexed bytes (0 when index is up-to-date)",
    );
    let mut recall = MetricFamily::gauge(
        "turbopuffer_namespace_recall",
        "Average vector recall estimation (0-1 scale)",
    );
    let mut info = MetricFamily::gauge(
        "turbopuffer_namespace_info",
        "Namespace information with labels",
    );

    for snap in snapshots {
        let labels = snap.labels();
        rows.push(labels.clone(), snap.approx_row_count as f64);
        logical_bytes.push(labels.clone(), snap.approx_logical_bytes as f64);
        unindexed_bytes.push(labels.clone(), snap.unindexed_bytes as f64);
        if let Some(r) = &snap.recall {
            recall.push(labels.clone(), r.avg_recall);
        }
        let mut info_labels = labels;
        info_labels.push(("updated_at".to_string(), snap.updated_at.clone()));
        info.push(info_labels, 1.0);
    }

    vec![rows, logical_bytes, unindexed_bytes, recall, info]
}
