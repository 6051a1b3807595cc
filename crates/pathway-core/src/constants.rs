/// Pathway version string.
pub const PATHWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 15;

/// Required request fields, in the order the classifier was trained on.
///
/// Order matters for vectorization only; presence checks are order-free.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",                       // Gender
    "nationality_group",            // Nacionality
    "parent_occupation_group",      // Mother's occupation
    "marital_status",               // Marital status
    "student_type",                 // International
    "previous_qualification_group", // Previous qualification
    "age_at_enrollment",            // Age at enrollment
    "tuition_up_to_date",           // Tuition fees up to date
    "displaced",                    // Displaced
    "special_needs",                // Educational special needs
    "first_semester_grade",         // Curricular units 1st sem (grade)
    "second_semester_grade",        // Curricular units 2nd sem (grade)
    "second_semester_approved",     // Curricular units 2nd sem (approved)
    "first_semester_approved",      // Curricular units 1st sem (approved)
    "admission_grade",              // Admission grade
];

// --- Class ids ---
pub const CLASS_DROP_OUT: i64 = 0;
pub const CLASS_REMAIN_ENROLLED: i64 = 1;
pub const CLASS_GRADUATE: i64 = 2;

/// Decimal places kept on the reported confidence.
pub const CONFIDENCE_DECIMALS: i32 = 4;

// --- Artifact ---
pub const MODEL_DIR_NAME: &str = "models";
pub const NATIVE_MODEL_FILE: &str = "dropout_model_improved.pwm";
pub const LEGACY_MODEL_FILE: &str = "dropout_model_improved.json";

/// How many ancestors of the executable directory are probed for `models/`.
pub const MODEL_DIR_SEARCH_DEPTH: usize = 2;
