//! Metrics registry for the exporter.
//!
//! Counter/gauge/histogram families with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors, and series are rendered in
//! sorted order so scrapes are deterministic. Gauges hold `f64` values stored
//! as bits in an `AtomicU64`. Histogram buckets are fixed in microseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Name of the per-URL page size gauge.
pub const PAGE_SIZE_METRIC: &str = "website_page_size_bytes";

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn sample(out: &mut String, name: &str, labels: &str, value: impl std::fmt::Display) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, value);
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value);
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "counter");
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, v) in rows {
            sample(out, name, &labels, v);
        }
    }
}

/// Last-write-wins gauge family. Each label set is independent; concurrent
/// writers to different keys never touch the same atomic.
#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl GaugeVec {
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let key = label_key(labels);
        if let Some(g) = self.map.get(&key) {
            g.store(v.to_bits(), Ordering::Relaxed);
            return;
        }
        self.map
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<f64> {
        self.map
            .get(&label_key(labels))
            .map(|g| f64::from_bits(g.load(Ordering::Relaxed)))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "gauge");
        let mut rows: Vec<(String, f64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), f64::from_bits(r.value().load(Ordering::Relaxed))))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (labels, v) in rows {
            sample(out, name, &labels, v);
        }
    }
}

// Fixed buckets in microseconds:
// 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s, 5s, 10s
const BUCKETS_MICROS: [u64; 9] = [
    1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000, 5_000_000, 10_000_000,
];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets (microsecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "histogram");
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            sample(out, &format!("{}_sum", name), &labels, hist.sum.load(Ordering::Relaxed));
            sample(out, &format!("{}_count", name), &labels, count);
        }
    }
}

/// Everything the exporter exposes on `/metrics`.
#[derive(Default)]
pub struct ExporterMetrics {
    /// Latest body size per URL; 0 when the check failed.
    pub page_size_bytes: GaugeVec,
    /// Checks by url and result (`ok` | `error`).
    pub checks: CounterVec,
    /// Check latency per URL, in microseconds.
    pub check_duration: HistogramVec,
    cycles: AtomicU64,
    monitored_sites: AtomicU64,
}

impl ExporterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_size(&self, url: &str, bytes: f64) {
        self.page_size_bytes.set(&[("url", url)], bytes);
    }

    pub fn page_size(&self, url: &str) -> Option<f64> {
        self.page_size_bytes.get(&[("url", url)])
    }

    pub fn inc_cycles(&self) -> u64 {
        self.cycles.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn set_monitored_sites(&self, n: usize) {
        self.monitored_sites.store(n as u64, Ordering::Relaxed);
    }

    /// Render every family in text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.page_size_bytes
            .render(PAGE_SIZE_METRIC, "Size of the website page in bytes", &mut out);
        self.checks
            .render("pagesize_checks_total", "Page checks by result", &mut out);
        self.check_duration.render(
            "pagesize_check_duration_micros",
            "Page check latency in microseconds",
            &mut out,
        );

        header(&mut out, "pagesize_cycles_total", "Completed poll cycles", "counter");
        sample(&mut out, "pagesize_cycles_total", "", self.cycles());
        header(&mut out, "pagesize_monitored_sites", "URLs loaded from the site list", "gauge");
        sample(
            &mut out,
            "pagesize_monitored_sites",
            "",
            self.monitored_sites.load(Ordering::Relaxed),
        );
        out
    }
}
