use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{AssessmentResult, Recommendation};
use crate::Error;

/// Dimensions at or above this count as strengths.
const STRENGTH_THRESHOLD: f64 = 70.0;

/// Band of a single WISCAR bar. These thresholds differ from the overall
/// recommendation ones on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Strong,
    Moderate,
    Low,
}

impl FitBand {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            FitBand::Strong
        } else if score >= 60.0 {
            FitBand::Moderate
        } else {
            FitBand::Low
        }
    }
}

impl Recommendation {
    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Excellent Fit",
            Recommendation::Maybe => "Good Potential",
            Recommendation::No => "Consider Alternatives",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Proceed with Confidence",
            Recommendation::Maybe => "Potential with Development",
            Recommendation::No => "Consider Alternatives",
        }
    }
}

pub const WISCAR_LABELS: [&str; 6] = [
    "Will (Persistence)",
    "Interest",
    "Skill",
    "Cognitive",
    "Ability to Learn",
    "Real-World Alignment",
];

impl AssessmentResult {
    /// WISCAR dimensions with their display labels, in framework order.
    pub fn dimensions(&self) -> Vec<(&'static str, f64)> {
        WISCAR_LABELS
            .iter()
            .copied()
            .zip(self.wiscars.values())
            .collect()
    }

    pub fn strengths(&self) -> Vec<(&'static str, f64)> {
        self.dimensions()
            .into_iter()
            .filter(|&(_, score)| score >= STRENGTH_THRESHOLD)
            .collect()
    }

    pub fn growth_areas(&self) -> Vec<(&'static str, f64)> {
        self.dimensions()
            .into_iter()
            .filter(|&(_, score)| score < STRENGTH_THRESHOLD)
            .collect()
    }

    pub fn share_text(&self) -> String {
        format!(
            "I scored {}/100 on the CareerFit Assessment for Wearable Development!",
            self.overall_confidence
        )
    }
}

/// Downloadable snapshot of a result.
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub result: AssessmentResult,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(result: AssessmentResult) -> Self {
        Self {
            result,
            generated_at: Utc::now(),
        }
    }
}

pub fn write_report<W: Write>(mut writer: W, result: &AssessmentResult) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, &Report::new(result.clone()))?;
    writer.flush()?;
    Ok(())
}
