//! Reference drug lists used to fill the drug columns of the
//! synthetic exposure table.
//!
//! The drugs are grouped by purpose: immune checkpoint inhibitors
//! (ICI), drugs known to be hepatotoxic, and drugs which are not.
//! The groups are not checked for overlap. Rows draw from the union
//! of all three, and the toxicity flags are worked out afterwards
//! from the drug name, not the concept id.

/// A drug as it appears in the drug_exposure table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrugRecord {
    /// OMOP drug concept id
    pub drug_concept_id: i64,
    /// Short ingredient name (e.g. atorvastatin)
    pub drug_name: &'static str,
    /// Full name including dose and brand
    pub drug_name_dose: &'static str,
}

const fn drug(
    drug_concept_id: i64,
    drug_name: &'static str,
    drug_name_dose: &'static str,
) -> DrugRecord {
    DrugRecord {
        drug_concept_id,
        drug_name,
        drug_name_dose,
    }
}

pub const ICI_DRUGS: &[DrugRecord] = &[drug(
    42920398,
    "Atezolizumab",
    "20 ML atezolizumab 60 MG/ML Injectable Solution [TCENTRIQ]",
)];

pub const LIVER_TOX_DRUGS: &[DrugRecord] = &[
    drug(
        1545998,
        "atorvastatin",
        "atorvastatin 10 MG Oral Tablet [Lipitor]",
    ),
    drug(
        42946810,
        "sunitinib",
        "sunitinib 25 MG Oral Capsule [SUTENE]",
    ),
    drug(
        42971929,
        "vancomycin",
        "Vancomycin 1000 MG Injection [VANCOMYCIN HCI CJ]",
    ),
    drug(
        42965904,
        "allopurinol",
        "Allopurinol 100 MG Oral Tablet [YUYU ALLOPURINOL]",
    ),
    drug(
        42925190,
        "tamoxifen",
        "Tamoxifen 20 MG Oral Tablet [TAMOXIFEN KWANGDONG]",
    ),
    drug(
        42921531,
        "vitamin a",
        "5 ML Ascorbic Acid 100 MG/ML / dexpanthenol 5 MG/ML",
    ),
    drug(
        42931443,
        "amitriptyline",
        "VAmitriptyline 10 MG Oral Tablet [ENAFON]",
    ),
];

pub const NON_TOX_DRUGS: &[DrugRecord] = &[
    drug(
        42918176,
        "sodium chlorid",
        "1000 ML Glucose 50 MG/ML / Potassium Chloride 2.24 MG/ML / Sodium Chloride 4.5 MG/ML Injectable Solution [DEXTROSE AND SOD CHLORIDE NA.K]",
    ),
    drug(
        42920662,
        "ketamine",
        "10 ML Ketamine 50 MG/ML Injectable Solution [HUONS KETAMINE HCL]",
    ),
    drug(
        42941267,
        "hydroxyzine",
        "Hydroxyzine 10 MG Oral Tablet [ADIPAM]",
    ),
    drug(
        42920732,
        "L-Ornithine-L-",
        "10 ML L-Ornithine-L-Aspartate 500 MG/ML Injectable Solution [HELPOVIN]",
    ),
    drug(
        42929253,
        "pantoprazole",
        "pantoprazole 40 MG Injection [PANTOLINE]",
    ),
    drug(
        42918352,
        "glucose",
        "1000 ML Calcium Chloride 0.2 MG/ML / Glucose 50 MG/ML / Lactate 6.1 MG/ML / Potassium Chloride 0.3 MG/ML / Sodium Chloride 6 MG/ML Injectable Solution [HARTMANN D CJ]",
    ),
    drug(
        19123173,
        "pregabalin",
        "pregabalin 75 MG Oral Capsule [Lyrica]",
    ),
    drug(
        1332442,
        "amlodipine",
        "amlodipine 10 MG Oral Tablet [Norvasc]",
    ),
    drug(
        42922419,
        "morphine",
        "1 ML Morphine 1 MG/ML Injectable Solution [BC MORPHINSULFATE]",
    ),
];

/// Drug names that get an ICI lasting window. Includes ICIs
/// that are not currently in ICI_DRUGS.
pub const ICI_NAMES: [&str; 4] = ["Atezolizumab", "Nivolumab", "Pembrolizumab", "ipilimumab"];

/// The sampling pool: ICI, then liver-toxic, then non-toxic drugs
pub fn all_drugs() -> Vec<DrugRecord> {
    ICI_DRUGS
        .iter()
        .chain(LIVER_TOX_DRUGS)
        .chain(NON_TOX_DRUGS)
        .copied()
        .collect()
}

/// True if the drug name is one of the recognised ICI names
pub fn is_ici_name(drug_name: &str) -> bool {
    ICI_NAMES.iter().any(|name| *name == drug_name)
}

/// True if a drug with this name is in the ICI or liver-toxic
/// lists (matched by name, so a record with a different concept
/// id but the same name still counts).
pub fn is_liver_tox_name(drug_name: &str) -> bool {
    ICI_DRUGS
        .iter()
        .chain(LIVER_TOX_DRUGS)
        .any(|d| d.drug_name == drug_name)
}
