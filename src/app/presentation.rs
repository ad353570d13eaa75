use crate::image_classifier::classification::{ClassificationResult, Freshness};
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub icon: &'static str,
    pub title: &'static str,
    pub accent: Color32,
    pub recommendation: &'static str,
}

pub fn presentation(label: Freshness) -> Presentation {
    match label {
        Freshness::Fresh => Presentation {
            icon: "✓",
            title: "Fresh",
            accent: Color32::from_rgb(0x22, 0xC5, 0x5E),
            recommendation: "Good to eat! 🍏",
        },
        Freshness::Mild => Presentation {
            icon: "●",
            title: "Mild",
            accent: Color32::from_rgb(0xEA, 0xB3, 0x08),
            recommendation: "Still okay, but consume soon. 🍌",
        },
        Freshness::Rotten => Presentation {
            icon: "✗",
            title: "Rotten",
            accent: Color32::from_rgb(0xEF, 0x44, 0x44),
            recommendation: "Not recommended. 🚫",
        },
    }
}

pub fn confidence_text(confidence: f64) -> String {
    format!("{:.2}%", confidence)
}

pub fn summary(result: &ClassificationResult) -> String {
    format!(
        "{} ({} confidence)",
        presentation(result.label).title,
        confidence_text(result.confidence)
    )
}
