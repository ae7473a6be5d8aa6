use serde::{Deserialize, Serialize};

/// Quality tier, ordered from worst to best.
/// Always derived from the score; never taken from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CRÍTICO")]
    Critical,
    #[serde(rename = "MEJORABLE")]
    Improvable,
    #[serde(rename = "SÓLIDO")]
    Solid,
    #[serde(rename = "ELITE")]
    Elite,
}

impl Category {
    #[cfg(test)]
    pub const ALL: [Category; 4] = [
        Category::Critical,
        Category::Improvable,
        Category::Solid,
        Category::Elite,
    ];

    /// Bands on the 0–100 scale:
    /// 90–100 → ELITE, 75–89 → SÓLIDO, 55–74 → MEJORABLE, 0–54 → CRÍTICO
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Category::Elite
        } else if score >= 75.0 {
            Category::Solid
        } else if score >= 55.0 {
            Category::Improvable
        } else {
            Category::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Critical => "CRÍTICO",
            Category::Improvable => "MEJORABLE",
            Category::Solid => "SÓLIDO",
            Category::Elite => "ELITE",
        }
    }
}

/// Normalized verdict returned to clients. Lives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub score: f64,
    pub category: Category,
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ats_observations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Category::from_score(100.0), Category::Elite);
        assert_eq!(Category::from_score(90.0), Category::Elite);
        assert_eq!(Category::from_score(89.9), Category::Solid);
        assert_eq!(Category::from_score(75.0), Category::Solid);
        assert_eq!(Category::from_score(74.5), Category::Improvable);
        assert_eq!(Category::from_score(55.0), Category::Improvable);
        assert_eq!(Category::from_score(54.0), Category::Critical);
        assert_eq!(Category::from_score(0.0), Category::Critical);
    }

    #[test]
    fn test_bands_are_monotonic_over_range() {
        let mut previous = Category::from_score(0.0);
        for tenth in 0..=1000 {
            let current = Category::from_score(tenth as f64 / 10.0);
            assert!(current >= previous, "tier dropped at {}", tenth as f64 / 10.0);
            previous = current;
        }
        assert_eq!(previous, Category::Elite);
    }

    #[test]
    fn test_category_serializes_to_spanish_label() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn test_result_uses_camel_case_fields() {
        let result = EvaluationResult {
            score: 80.0,
            category: Category::Solid,
            summary: "Perfil técnico consistente".into(),
            strengths: vec![],
            improvements: vec!["Cuantificar logros".into()],
            ats_observations: vec!["Usa encabezados estándar".into()],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["category"], "SÓLIDO");
        assert_eq!(value["atsObservations"][0], "Usa encabezados estándar");
        assert!(value.get("ats_observations").is_none());
    }
}
