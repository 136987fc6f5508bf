//! Sponsor attribution.
//!
//! Main sponsors come from the senate dataset; chamber and party come from
//! LegiScan sponsor lists. Chamber and party are assumed constant for a
//! legislator over a session, so the first record seen for a name wins.

use crate::bill_number::{standardize, BillNumber};
use crate::error::{Error, Result};
use crate::types::{LegiscanBill, SenateBill};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Institutional sponsors, in the order their flags are checked
pub const INSTITUTIONAL_SPONSORS: [&str; 3] = ["budget", "rules", "redistricting"];

/// Name of the member or institution credited with a senate bill
pub fn main_sponsor(bill: &SenateBill) -> Result<String> {
    let unmapped = || Error::UnmappedSponsorRole(bill.base_print_no.clone());
    let sponsor = bill.sponsor.as_ref().ok_or_else(unmapped)?;

    let member_name = sponsor
        .member
        .as_ref()
        .and_then(|m| m.full_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty());
    if let Some(name) = member_name {
        return Ok(name.to_string());
    }

    let flags = [sponsor.budget, sponsor.rules, sponsor.redistricting];
    INSTITUTIONAL_SPONSORS
        .iter()
        .zip(flags)
        .find(|(_, set)| *set)
        .map(|(label, _)| label.to_string())
        .ok_or_else(unmapped)
}

/// Standardized bill number and main sponsor for one senate row
pub fn sponsor_entry(bill: &SenateBill) -> Result<(BillNumber, String)> {
    let number = standardize(&bill.base_print_no)?;
    let sponsor = main_sponsor(bill)?;
    Ok((number, sponsor))
}

/// Chamber and party of a legislator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegislatorInfo {
    pub spons_house: Option<String>,
    pub spons_party: Option<String>,
}

/// Legislator metadata keyed by sponsor name, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct LegislatorDirectory {
    entries: IndexMap<String, LegislatorInfo>,
    conflicts: usize,
}

impl LegislatorDirectory {
    /// Build from LegiScan sponsor lists, in row order. The first record
    /// for a name wins; later records that disagree are counted.
    pub fn from_bills<'a>(bills: impl IntoIterator<Item = &'a LegiscanBill>) -> Self {
        let mut directory = Self::default();
        for bill in bills {
            for sponsor in &bill.sponsors {
                let info = LegislatorInfo {
                    spons_house: sponsor.role.clone(),
                    spons_party: sponsor.party.clone(),
                };
                directory.insert_first_seen(&sponsor.name, info, &bill.bill_number);
            }
        }
        directory
    }

    fn insert_first_seen(&mut self, name: &str, info: LegislatorInfo, bill_number: &str) {
        match self.entries.get(name) {
            Some(existing) if *existing != info => {
                debug!(
                    sponsor = name,
                    bill = bill_number,
                    kept = ?existing,
                    ignored = ?info,
                    "conflicting legislator metadata, keeping first record"
                );
                self.conflicts += 1;
            }
            Some(_) => {}
            None => {
                self.entries.insert(name.to_string(), info);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&LegislatorInfo> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of later records that disagreed with the kept one
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillSponsor, SenateMember, SenateSponsor};

    fn senate(number: &str, sponsor: Option<SenateSponsor>) -> SenateBill {
        SenateBill {
            base_print_no: number.to_string(),
            sponsor,
        }
    }

    #[test]
    fn test_member_sponsor() {
        let bill = senate(
            "S12",
            Some(SenateSponsor {
                member: Some(SenateMember {
                    full_name: Some("Kevin Parker".to_string()),
                }),
                rules: true,
                ..Default::default()
            }),
        );
        assert_eq!(main_sponsor(&bill).unwrap(), "Kevin Parker");
        let (number, _) = sponsor_entry(&bill).unwrap();
        assert_eq!(number.as_str(), "S00012");
    }

    #[test]
    fn test_institutional_sponsor_order() {
        let both = senate(
            "S1",
            Some(SenateSponsor {
                member: Some(SenateMember { full_name: None }),
                rules: true,
                redistricting: true,
                ..Default::default()
            }),
        );
        assert_eq!(main_sponsor(&both).unwrap(), "rules");

        let budget = senate(
            "S2",
            Some(SenateSponsor {
                budget: true,
                ..Default::default()
            }),
        );
        assert_eq!(main_sponsor(&budget).unwrap(), "budget");
    }

    #[test]
    fn test_unmapped_sponsor_role() {
        let none = senate("S3", Some(SenateSponsor::default()));
        assert!(matches!(
            main_sponsor(&none),
            Err(Error::UnmappedSponsorRole(ref n)) if n == "S3"
        ));
        assert!(main_sponsor(&senate("S4", None)).is_err());
    }

    #[test]
    fn test_directory_first_seen_wins() {
        let sponsor = |name: &str, role: &str, party: &str| BillSponsor {
            name: name.to_string(),
            role: Some(role.to_string()),
            party: Some(party.to_string()),
        };
        let bills = vec![
            LegiscanBill {
                bill_number: "A00001".to_string(),
                sponsors: vec![sponsor("Ann Lee", "Rep", "D"), sponsor("Bo Kim", "Sen", "R")],
                ..Default::default()
            },
            LegiscanBill {
                bill_number: "S00002".to_string(),
                sponsors: vec![sponsor("Ann Lee", "Sen", "R"), sponsor("Bo Kim", "Sen", "R")],
                ..Default::default()
            },
        ];

        let directory = LegislatorDirectory::from_bills(&bills);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.conflicts(), 1);
        let ann = directory.get("Ann Lee").unwrap();
        assert_eq!(ann.spons_house.as_deref(), Some("Rep"));
        assert_eq!(ann.spons_party.as_deref(), Some("D"));
        assert_eq!(directory.names().collect::<Vec<_>>(), vec!["Ann Lee", "Bo Kim"]);
    }
}
