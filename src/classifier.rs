//! Bill lifecycle classification from LegiScan event logs.
//!
//! Each flag is a keyword predicate over lower-cased progress labels or
//! history actions. `law` needs a second pass over the whole table, see
//! [`apply_substitutions`].

use crate::bill_number::{standardize, BillNumber};
use crate::error::{Error, Result};
use crate::types::{Chamber, HistoryEntry, LegiscanBill, ProgressStatus, ProgressUpdate, VoteSummary};
use crate::vocabulary::{contains_any, Vocabulary};
use serde::Serialize;
use std::collections::HashSet;

/// A LegiScan bill with its derived lifecycle flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedBill {
    pub bill_number: BillNumber,
    pub same_as: Option<String>,
    pub exp_progress: Vec<String>,
    pub exp_history: Vec<String>,
    pub exp_votes: Vec<String>,
    pub chamber_of_origin: Chamber,
    pub bill: bool,
    pub aic: bool,
    pub pass: bool,
    pub pass_senate: bool,
    pub pass_assembly: bool,
    pub pass_other_house: bool,
    pub substituted_by: Option<BillNumber>,
    /// Enacted on its own record, before substitution is considered
    pub signed: bool,
    pub law: bool,
}

/// True for bills, false for resolutions and other non-bill records
pub fn is_bill(bill_number: &str) -> bool {
    bill_number.starts_with('A') || bill_number.starts_with('S')
}

/// Keep only rows whose bill number starts with `A` or `S`
pub fn remove_resolutions(bills: &[LegiscanBill]) -> Vec<&LegiscanBill> {
    bills.iter().filter(|b| is_bill(&b.bill_number)).collect()
}

/// Lower-cased progress labels
pub fn expand_progress(bill_number: &str, progress: &[ProgressUpdate]) -> Result<Vec<String>> {
    progress
        .iter()
        .map(|update| {
            ProgressStatus::from_code(update.event)
                .map(|status| status.label().to_lowercase())
                .ok_or_else(|| Error::UnknownProgressEvent {
                    bill_number: bill_number.to_string(),
                    event: update.event,
                })
        })
        .collect()
}

pub fn expand_history(history: &[HistoryEntry]) -> Vec<String> {
    history.iter().map(|h| h.action.to_lowercase()).collect()
}

pub fn expand_votes(votes: &[VoteSummary]) -> Vec<String> {
    votes.iter().map(|v| v.desc.to_lowercase()).collect()
}

pub fn is_introduced(exp_progress: &[String], vocab: &Vocabulary) -> bool {
    exp_progress
        .iter()
        .any(|label| contains_any(label, &vocab.introduced))
}

/// "Acted in committee"
pub fn acted_in_committee(exp_history: &[String], vocab: &Vocabulary) -> bool {
    exp_history
        .iter()
        .any(|action| contains_any(action, &vocab.committee_action))
}

/// Passed the given chamber: some entry is exactly `"passed <chamber>"`
pub fn passed_chamber(exp_history: &[String], chamber: Chamber, vocab: &Vocabulary) -> bool {
    let phrase = format!("{} {}", vocab.passed_prefix, chamber.as_str());
    exp_history.iter().any(|action| action.trim() == phrase)
}

/// Passed the house other than `origin`: some entry contains the phrase
pub fn passed_other_house(exp_history: &[String], origin: Chamber, vocab: &Vocabulary) -> bool {
    let phrase = format!("{} {}", vocab.passed_prefix, origin.other().as_str());
    exp_history.iter().any(|action| action.contains(&phrase))
}

pub fn is_signed(exp_history: &[String], vocab: &Vocabulary) -> bool {
    exp_history
        .iter()
        .any(|action| contains_any(action, &vocab.enacted))
}

/// Successor bill from the last history entry carrying the substitution
/// marker. The bill number is the entry's last whitespace-separated token.
pub fn substituted_by(exp_history: &[String], vocab: &Vocabulary) -> Result<Option<BillNumber>> {
    let entry = match exp_history
        .iter()
        .rev()
        .find(|action| action.contains(&vocab.substitution_marker))
    {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let token = entry
        .split_whitespace()
        .last()
        .ok_or_else(|| Error::MalformedIdentifier(entry.clone()))?;

    standardize(token).map(Some)
}

/// Classify one bill. `law` only reflects the bill's own history here;
/// run [`apply_substitutions`] over the whole table afterwards.
pub fn classify_bill(bill: &LegiscanBill, vocab: &Vocabulary) -> Result<ClassifiedBill> {
    let bill_number = standardize(&bill.bill_number)?;
    let chamber_of_origin = Chamber::from_prefix(bill_number.prefix())
        .ok_or_else(|| Error::MalformedIdentifier(bill.bill_number.clone()))?;

    let exp_progress = expand_progress(&bill.bill_number, &bill.progress)?;
    let exp_history = expand_history(&bill.history);
    let exp_votes = expand_votes(&bill.votes);

    let pass = passed_chamber(&exp_history, chamber_of_origin, vocab);
    let signed = is_signed(&exp_history, vocab);

    Ok(ClassifiedBill {
        same_as: bill.sasts.first().map(|s| s.sast_bill_number.clone()),
        bill: is_introduced(&exp_progress, vocab),
        aic: acted_in_committee(&exp_history, vocab),
        pass,
        pass_senate: pass && chamber_of_origin == Chamber::Senate,
        pass_assembly: pass && chamber_of_origin == Chamber::Assembly,
        pass_other_house: passed_other_house(&exp_history, chamber_of_origin, vocab),
        substituted_by: substituted_by(&exp_history, vocab)?,
        signed,
        law: signed,
        bill_number,
        chamber_of_origin,
        exp_progress,
        exp_history,
        exp_votes,
    })
}

/// Second pass for `law`: a bill substituted by an enacted bill counts as
/// law. Only bills enacted on their own record are considered, so chains
/// longer than one hop and cycles are not followed.
pub fn apply_substitutions(bills: &mut [ClassifiedBill]) -> usize {
    let enacted: HashSet<BillNumber> = bills
        .iter()
        .filter(|b| b.signed)
        .map(|b| b.bill_number.clone())
        .collect();

    let mut inherited = 0;
    for bill in bills.iter_mut() {
        let via_substitute = bill
            .substituted_by
            .as_ref()
            .map(|successor| enacted.contains(successor))
            .unwrap_or(false);

        bill.law = bill.signed || via_substitute;
        if via_substitute && !bill.signed {
            inherited += 1;
        }
    }
    inherited
}
