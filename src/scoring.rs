//! Per-sponsor aggregation and the relative effectiveness score.
//!
//! The score only ranks sponsors within one run: each metric is turned into
//! the sponsor's share of that metric over all sponsors, and the five shares
//! are averaged without weights.

use crate::classifier::ClassifiedBill;
use crate::sponsor::LegislatorDirectory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metric columns, in output order
pub const METRICS: [&str; 5] = ["bill", "aic", "pass", "pass_other_house", "law"];

/// Raw flag counts for one sponsor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricCounts {
    pub bill: u64,
    pub aic: u64,
    pub pass: u64,
    pub pass_other_house: u64,
    pub law: u64,
}

impl MetricCounts {
    pub fn add_bill(&mut self, bill: &ClassifiedBill) {
        self.bill += u64::from(bill.bill);
        self.aic += u64::from(bill.aic);
        self.pass += u64::from(bill.pass);
        self.pass_other_house += u64::from(bill.pass_other_house);
        self.law += u64::from(bill.law);
    }

    pub fn add(&mut self, other: &MetricCounts) {
        self.bill += other.bill;
        self.aic += other.aic;
        self.pass += other.pass;
        self.pass_other_house += other.pass_other_house;
        self.law += other.law;
    }

    /// Values in [`METRICS`] order
    pub fn values(&self) -> [u64; 5] {
        [
            self.bill,
            self.aic,
            self.pass,
            self.pass_other_house,
            self.law,
        ]
    }
}

/// One row of the effectiveness table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SponsorEffectiveness {
    pub sponsor: String,
    #[serde(flatten)]
    pub counts: MetricCounts,
    pub spons_house: Option<String>,
    pub spons_party: Option<String>,
    pub score: f64,
}

/// Sum flags per main sponsor. Keys come back sorted by sponsor name.
pub fn aggregate<'a, I>(attributed: I) -> BTreeMap<String, MetricCounts>
where
    I: IntoIterator<Item = (&'a str, &'a ClassifiedBill)>,
{
    let mut totals: BTreeMap<String, MetricCounts> = BTreeMap::new();
    for (sponsor, bill) in attributed {
        totals.entry(sponsor.to_string()).or_default().add_bill(bill);
    }
    totals
}

/// A sponsor's share of one metric. Zero when nobody scored on it.
pub fn metric_share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Score every sponsor and attach directory metadata. Sponsors missing from
/// the directory (institutions, unmatched names) keep empty metadata.
pub fn score(
    totals: &BTreeMap<String, MetricCounts>,
    directory: &LegislatorDirectory,
) -> Vec<SponsorEffectiveness> {
    let mut column_totals = MetricCounts::default();
    for counts in totals.values() {
        column_totals.add(counts);
    }
    let column_totals = column_totals.values();

    totals
        .iter()
        .map(|(sponsor, counts)| {
            let shares: f64 = counts
                .values()
                .iter()
                .zip(column_totals.iter())
                .map(|(count, total)| metric_share(*count, *total))
                .sum();

            let info = directory.get(sponsor);
            SponsorEffectiveness {
                sponsor: sponsor.clone(),
                counts: *counts,
                spons_house: info.and_then(|i| i.spons_house.clone()),
                spons_party: info.and_then(|i| i.spons_party.clone()),
                score: shares / METRICS.len() as f64,
            }
        })
        .collect()
}
