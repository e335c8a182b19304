use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted family cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

/// The eleven ordered steps of the registration wizard.
///
/// The ordering is immutable; `Guardian` is the only step whose membership in
/// the active path is conditional (see [`BranchConditions::guardian_required`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Household,
    Parents,
    Guardian,
    Child,
    Education,
    SurveyBasic,
    SurveyFinancial,
    SurveyAssets,
    SurveyHealth,
    SurveyReligious,
    Review,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Household,
            Self::Parents,
            Self::Guardian,
            Self::Child,
            Self::Education,
            Self::SurveyBasic,
            Self::SurveyFinancial,
            Self::SurveyAssets,
            Self::SurveyHealth,
            Self::SurveyReligious,
            Self::Review,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Household => "Data Keluarga",
            Self::Parents => "Data Orang Tua",
            Self::Guardian => "Data Wali",
            Self::Child => "Data Anak",
            Self::Education => "Data Pendidikan",
            Self::SurveyBasic => "Survey Kondisi Rumah",
            Self::SurveyFinancial => "Survey Keuangan",
            Self::SurveyAssets => "Survey Aset",
            Self::SurveyHealth => "Survey Kesehatan",
            Self::SurveyReligious => "Survey Keagamaan",
            Self::Review => "Ringkasan",
        }
    }

    pub fn ordinal(self) -> usize {
        Self::ordered()
            .iter()
            .position(|step| *step == self)
            .unwrap_or(0)
    }

    pub fn at_ordinal(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }
}

/// Household classification driving the branch-dependent required-field sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdStatus {
    General,
    OrphanFather,
    OrphanMother,
    OrphanBoth,
    Underprivileged,
}

impl HouseholdStatus {
    /// Parse the raw status string stored in the record. Unknown or blank
    /// values yield `None`, which resolves to the general branch.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "general" => Some(Self::General),
            "orphan_father" => Some(Self::OrphanFather),
            "orphan_mother" => Some(Self::OrphanMother),
            "orphan_both" => Some(Self::OrphanBoth),
            "underprivileged" => Some(Self::Underprivileged),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::OrphanFather => "orphan_father",
            Self::OrphanMother => "orphan_mother",
            Self::OrphanBoth => "orphan_both",
            Self::Underprivileged => "underprivileged",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "Umum",
            Self::OrphanFather => "Yatim",
            Self::OrphanMother => "Piatu",
            Self::OrphanBoth => "Yatim Piatu",
            Self::Underprivileged => "Dhuafa",
        }
    }
}

/// Booleans derived from the household status, computed on demand and never
/// cached so they cannot diverge from the status field that implies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BranchConditions {
    pub father_deceased: bool,
    pub mother_deceased: bool,
    pub guardian_required: bool,
    pub extended_tier: bool,
}

impl BranchConditions {
    pub fn from_status(status: Option<HouseholdStatus>) -> Self {
        match status {
            Some(HouseholdStatus::OrphanFather) => Self {
                father_deceased: true,
                ..Self::default()
            },
            Some(HouseholdStatus::OrphanMother) => Self {
                mother_deceased: true,
                ..Self::default()
            },
            Some(HouseholdStatus::OrphanBoth) => Self {
                father_deceased: true,
                mother_deceased: true,
                guardian_required: true,
                extended_tier: false,
            },
            Some(HouseholdStatus::Underprivileged) => Self {
                extended_tier: true,
                ..Self::default()
            },
            Some(HouseholdStatus::General) | None => Self::default(),
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        Self::from_status(HouseholdStatus::parse(raw))
    }
}

/// Declared schooling level of the child, branching the education step's
/// required-field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolingLevel {
    NotEnrolled,
    Elementary,
    JuniorSecondary,
    SeniorSecondary,
    Tertiary,
}

impl SchoolingLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "not_enrolled" => Some(Self::NotEnrolled),
            "elementary" => Some(Self::Elementary),
            "junior_secondary" => Some(Self::JuniorSecondary),
            "senior_secondary" => Some(Self::SeniorSecondary),
            "tertiary" => Some(Self::Tertiary),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotEnrolled => "Belum Sekolah",
            Self::Elementary => "SD",
            Self::JuniorSecondary => "SMP",
            Self::SeniorSecondary => "SMA/SMK",
            Self::Tertiary => "Perguruan Tinggi",
        }
    }
}

/// Locally-picked file handle returned by the picker collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFileHandle {
    pub uri: String,
    pub mime_type_hint: String,
}

/// Tagged photo value.
///
/// A remote URL means the server already holds the photo and no binary part
/// is submitted; a local handle is attached exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Photo {
    #[default]
    Empty,
    Local(LocalFileHandle),
    Remote {
        url: String,
    },
}

impl Photo {
    /// Classify a raw string arriving from hydration. The prefix check lives
    /// only at this boundary; the rest of the engine matches on the tag.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Remote {
                url: trimmed.to_string(),
            }
        } else {
            Self::Local(LocalFileHandle {
                uri: trimmed.to_string(),
                mime_type_hint: String::new(),
            })
        }
    }

    /// The flat string surfaced at the wizard-screen boundary.
    pub fn as_field_value(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Local(handle) => &handle.uri,
            Self::Remote { url } => url,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
