//! Fixed labels for the normal/abnormal reduction.

use std::sync::LazyLock;

use super::ConditionLabel;

static NORMAL: LazyLock<ConditionLabel> = LazyLock::new(|| {
    ConditionLabel::new(
        "normal",
        "Normal/Healthy",
        "No significant abnormalities detected.",
        &[],
        false,
    )
    .with_treatment("No specific treatment needed. Continue with regular health maintenance.")
});

static INFECTED: LazyLock<ConditionLabel> = LazyLock::new(|| {
    ConditionLabel::new(
        "infected",
        "Abnormal/Infected",
        "Abnormalities detected that may indicate infection or other medical conditions.",
        &[
            "May include pain, inflammation, discharge, or other symptoms",
            "Specific symptoms depend on the affected area and condition severity",
        ],
        true,
    )
    .with_treatment("Please consult a healthcare professional for proper diagnosis and treatment.")
});

pub fn normal() -> &'static ConditionLabel {
    &NORMAL
}

pub fn infected() -> &'static ConditionLabel {
    &INFECTED
}
