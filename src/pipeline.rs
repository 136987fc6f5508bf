//! The classification and scoring pipeline.
//!
//! A stateless batch transform from the two input tables to the
//! per-sponsor effectiveness table. Nothing runs at load time; callers hand
//! in already-loaded rows.

use crate::bill_number::BillNumber;
use crate::classifier::{self, ClassifiedBill};
use crate::config::MalformedPolicy;
use crate::dataset::Datasets;
use crate::error::{Error, Result};
use crate::scoring::{self, SponsorEffectiveness};
use crate::sponsor::{self, LegislatorDirectory};
use crate::types::{LegiscanBill, SenateBill};
use crate::vocabulary::Vocabulary;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

/// Options for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub vocabulary: Vocabulary,
    pub on_malformed: MalformedPolicy,
}

impl PipelineOptions {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            on_malformed: MalformedPolicy::Fail,
        }
    }
}

/// A row dropped under [`MalformedPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub dataset: String,
    pub bill_number: String,
    pub reason: String,
}

/// Counts describing how bills were attributed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributionSummary {
    pub bills_total: usize,
    pub resolutions_dropped: usize,
    pub bills_classified: usize,
    pub bills_attributed: usize,
    /// Bills whose standardized number has no senate sponsor row
    pub unattributed: Vec<BillNumber>,
    pub law_via_substitution: usize,
    pub sponsors_without_metadata: Vec<String>,
    pub legislator_conflicts: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Per-bill classification joined with its main sponsor
#[derive(Debug, Clone, Serialize)]
pub struct AttributedBill {
    #[serde(flatten)]
    pub bill: ClassifiedBill,
    pub main_sponsor: Option<String>,
}

/// Classified bills and their attribution, before aggregation
#[derive(Debug, Clone)]
pub struct Classification {
    pub bills: Vec<AttributedBill>,
    pub directory: LegislatorDirectory,
    pub summary: AttributionSummary,
}

/// Output of a full run
#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessReport {
    pub generated_at: DateTime<Utc>,
    pub sponsors: Vec<SponsorEffectiveness>,
    pub summary: AttributionSummary,
}

/// Apply the malformed-row policy to one fallible row
pub(crate) fn handle_row<T>(
    result: Result<T>,
    dataset: &str,
    bill_number: &str,
    policy: MalformedPolicy,
    skipped: &mut Vec<SkippedRow>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_row_error(&e) && policy == MalformedPolicy::Skip => {
            warn!(dataset, bill = bill_number, error = %e, "skipping malformed row");
            skipped.push(SkippedRow {
                dataset: dataset.to_string(),
                bill_number: bill_number.to_string(),
                reason: e.to_string(),
            });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn is_row_error(error: &Error) -> bool {
    matches!(
        error,
        Error::MalformedIdentifier(_)
            | Error::InvalidRow { .. }
            | Error::UnknownProgressEvent { .. }
            | Error::UnmappedSponsorRole(_)
    )
}

/// Map of standardized senate bill number to main sponsor. The first row
/// for a number wins.
pub fn sponsor_index(
    senate: &[SenateBill],
    policy: MalformedPolicy,
    skipped: &mut Vec<SkippedRow>,
) -> Result<IndexMap<BillNumber, String>> {
    let mut index = IndexMap::new();
    for row in senate {
        let entry = handle_row(
            sponsor::sponsor_entry(row),
            "senate",
            &row.base_print_no,
            policy,
            skipped,
        )?;
        if let Some((number, main_sponsor)) = entry {
            index.entry(number).or_insert(main_sponsor);
        }
    }
    info!(rows = senate.len(), mapped = index.len(), "created main sponsor index");
    Ok(index)
}

/// Classify every LegiScan bill and attach its main sponsor
pub fn classify(
    legiscan: &[LegiscanBill],
    senate: &[SenateBill],
    options: &PipelineOptions,
) -> Result<Classification> {
    let mut summary = AttributionSummary {
        bills_total: legiscan.len(),
        ..Default::default()
    };

    let bills_only = classifier::remove_resolutions(legiscan);
    summary.resolutions_dropped = legiscan.len() - bills_only.len();
    info!(
        kept = bills_only.len(),
        dropped = summary.resolutions_dropped,
        "removed resolutions"
    );

    let mut classified: Vec<ClassifiedBill> = Vec::with_capacity(bills_only.len());
    for bill in &bills_only {
        let result = classifier::classify_bill(bill, &options.vocabulary);
        if let Some(c) = handle_row(
            result,
            "legiscan",
            &bill.bill_number,
            options.on_malformed,
            &mut summary.skipped,
        )? {
            classified.push(c);
        }
    }
    info!(bills = classified.len(), "classified bills");

    summary.law_via_substitution = classifier::apply_substitutions(&mut classified);
    info!(
        inherited = summary.law_via_substitution,
        "created law flag (accounts for substituted_by)"
    );

    let directory = LegislatorDirectory::from_bills(bills_only.iter().copied());
    summary.legislator_conflicts = directory.conflicts();
    info!(
        legislators = directory.len(),
        conflicts = directory.conflicts(),
        "built legislator directory"
    );

    let index = sponsor_index(senate, options.on_malformed, &mut summary.skipped)?;

    let bills: Vec<AttributedBill> = classified
        .into_iter()
        .map(|bill| {
            let main_sponsor = index.get(&bill.bill_number).cloned();
            AttributedBill { bill, main_sponsor }
        })
        .collect();

    summary.bills_classified = bills.len();
    summary.unattributed = bills
        .iter()
        .filter(|b| b.main_sponsor.is_none())
        .map(|b| b.bill.bill_number.clone())
        .collect();
    summary.bills_attributed = summary.bills_classified - summary.unattributed.len();

    if !summary.unattributed.is_empty() {
        warn!(
            count = summary.unattributed.len(),
            "bills have no matching senate sponsor and are excluded from sponsor totals"
        );
    }
    info!(attributed = summary.bills_attributed, "merged main sponsor information");

    Ok(Classification {
        bills,
        directory,
        summary,
    })
}

/// Classify loaded datasets, folding rows dropped at load time into the
/// summary
pub fn classify_datasets(datasets: &Datasets, options: &PipelineOptions) -> Result<Classification> {
    let mut classification = classify(&datasets.legiscan, &datasets.senate, options)?;

    let summary = &mut classification.summary;
    summary.bills_total = datasets.legiscan_rows.max(summary.bills_total);
    summary.resolutions_dropped += datasets.resolutions_dropped;
    let mut skipped = datasets.skipped.clone();
    skipped.append(&mut summary.skipped);
    summary.skipped = skipped;
    Ok(classification)
}

/// Run the whole pipeline: classify, attribute, aggregate and score
pub fn run(
    legiscan: &[LegiscanBill],
    senate: &[SenateBill],
    options: &PipelineOptions,
) -> Result<EffectivenessReport> {
    Ok(report(classify(legiscan, senate, options)?))
}

/// [`run`] over loaded datasets
pub fn run_datasets(datasets: &Datasets, options: &PipelineOptions) -> Result<EffectivenessReport> {
    Ok(report(classify_datasets(datasets, options)?))
}

fn report(classification: Classification) -> EffectivenessReport {
    let Classification {
        bills,
        directory,
        mut summary,
    } = classification;

    let totals = scoring::aggregate(bills.iter().filter_map(|b| {
        b.main_sponsor
            .as_deref()
            .map(|sponsor| (sponsor, &b.bill))
    }));

    let sponsors = scoring::score(&totals, &directory);
    summary.sponsors_without_metadata = sponsors
        .iter()
        .filter(|row| directory.get(&row.sponsor).is_none())
        .map(|row| row.sponsor.clone())
        .collect();
    info!(
        sponsors = sponsors.len(),
        without_metadata = summary.sponsors_without_metadata.len(),
        "created effectiveness table"
    );

    EffectivenessReport {
        generated_at: Utc::now(),
        sponsors,
        summary,
    }
}
