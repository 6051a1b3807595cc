use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_DROP_OUT, CLASS_GRADUATE, CLASS_REMAIN_ENROLLED};

/// Integer class id produced after normalizing classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl ClassId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw classifier output: a numeric class id or a string label.
///
/// Also the element type of a model's class list, so it round-trips
/// through serde as a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawLabel {
    /// Normalize into a class id.
    ///
    /// Numeric output is truncated toward zero. Known string labels map to
    /// their class; unrecognized strings fall back to Drop Out (see
    /// [`RawLabel::is_recognized`]).
    pub fn class_id(&self) -> ClassId {
        match self {
            Self::Int(v) => ClassId(*v),
            Self::Float(v) => ClassId(v.trunc() as i64),
            Self::Text(label) => ClassId(Self::label_class(label).unwrap_or(CLASS_DROP_OUT)),
        }
    }

    /// False only for string labels outside the known vocabulary.
    pub fn is_recognized(&self) -> bool {
        match self {
            Self::Text(label) => Self::label_class(label).is_some(),
            _ => true,
        }
    }

    fn label_class(label: &str) -> Option<i64> {
        match label {
            "Dropout" | "Drop Out" => Some(CLASS_DROP_OUT),
            "Enrolled" | "Remain Enrolled" => Some(CLASS_REMAIN_ENROLLED),
            "Graduate" => Some(CLASS_GRADUATE),
            _ => None,
        }
    }
}

impl std::fmt::Display for RawLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Predicted academic outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Drop Out")]
    DropOut,
    #[serde(rename = "Remain Enrolled")]
    RemainEnrolled,
    #[serde(rename = "Graduate")]
    Graduate,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Outcome {
    pub fn from_class(class: ClassId) -> Self {
        match class.0 {
            CLASS_DROP_OUT => Self::DropOut,
            CLASS_REMAIN_ENROLLED => Self::RemainEnrolled,
            CLASS_GRADUATE => Self::Graduate,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DropOut => "Drop Out",
            Self::RemainEnrolled => "Remain Enrolled",
            Self::Graduate => "Graduate",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
