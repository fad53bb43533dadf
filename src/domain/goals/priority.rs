use std::fmt;

/// Goal priority as used for weighting.
///
/// Labels are matched exactly (`"high"`, `"medium"`, `"low"`); anything else is
/// `Unrecognized` and weighs like `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unrecognized,
}

impl Priority {
    pub fn from_label(label: &str) -> Self {
        match label {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Unrecognized,
        }
    }

    /// Multiplier applied to a goal's score and to the weight total.
    pub fn weight(self) -> f64 {
        match self {
            Priority::High => 1.2,
            Priority::Medium => 1.0,
            Priority::Low => 0.8,
            Priority::Unrecognized => 1.0,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
            Priority::Unrecognized => write!(f, "unrecognized"),
        }
    }
}
