use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A bill row from the LegiScan dataset (one per bill per session)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegiscanBill {
    pub bill_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sasts: Vec<SameAs>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: Vec<ProgressUpdate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub votes: Vec<VoteSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sponsors: Vec<BillSponsor>,
}

/// "Same as" companion bill reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SameAs {
    pub sast_bill_number: String,
    #[serde(default)]
    pub type_id: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Status change, `event` indexes [`ProgressStatus`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub event: i64,
    #[serde(default)]
    pub date: Option<String>,
}

/// Free-text legislative action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub chamber: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
}

/// Primary or co-sponsor listed on a LegiScan bill
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillSponsor {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
}

/// A bill row from the NY Senate Open Legislation API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenateBill {
    #[serde(rename = "basePrintNo")]
    pub base_print_no: String,
    #[serde(default)]
    pub sponsor: Option<SenateSponsor>,
}

/// Sponsor block of a senate bill. Bills without an individual member are
/// sponsored by an institution, flagged by one of the three booleans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenateSponsor {
    #[serde(default)]
    pub member: Option<SenateMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redistricting: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenateMember {
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

/// Legislative chamber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Assembly,
    Senate,
}

impl Chamber {
    /// Chamber of origin from a bill number prefix (`A` or `S`)
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'A' => Some(Chamber::Assembly),
            'S' => Some(Chamber::Senate),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Chamber::Assembly => Chamber::Senate,
            Chamber::Senate => Chamber::Assembly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Chamber::Assembly => "assembly",
            Chamber::Senate => "senate",
        }
    }
}

/// LegiScan progress status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    PreFiled,
    Introduced,
    Engrossed,
    Enrolled,
    Passed,
    Vetoed,
    Failed,
    Override,
    Chaptered,
    Refer,
    ReportPass,
    ReportDnp,
    Draft,
}

impl ProgressStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        use ProgressStatus::*;
        let status = match code {
            0 => PreFiled,
            1 => Introduced,
            2 => Engrossed,
            3 => Enrolled,
            4 => Passed,
            5 => Vetoed,
            6 => Failed,
            7 => Override,
            8 => Chaptered,
            9 => Refer,
            10 => ReportPass,
            11 => ReportDnp,
            12 => Draft,
            _ => return None,
        };
        Some(status)
    }

    /// Label as published by LegiScan
    pub fn label(self) -> &'static str {
        use ProgressStatus::*;
        match self {
            PreFiled => "N/A Pre-filed or pre-introduction",
            Introduced => "Introduced",
            Engrossed => "Engrossed",
            Enrolled => "Enrolled",
            Passed => "Passed",
            Vetoed => "Vetoed",
            // Limited support based on state
            Failed => "Failed",
            Override => "Override",
            Chaptered => "Chaptered",
            Refer => "Refer",
            ReportPass => "Report Pass",
            ReportDnp => "Report DNP",
            Draft => "Draft",
        }
    }
}
