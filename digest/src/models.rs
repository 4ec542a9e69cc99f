use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clinical topics the digest can be filtered on.
pub const TOPICS: [&str; 7] = [
    "ACL",
    "rotator cuff",
    "low back pain",
    "patellofemoral pain",
    "shoulder instability",
    "tendinopathy",
    "plantar fasciitis",
];

/// Publication types accepted by the study-type filter.
pub const STUDY_TYPES: [&str; 3] = [
    "randomized controlled trial",
    "systematic review",
    "clinical trial",
];

pub const MAX_RESULTS_LIMIT: u32 = 10;

// Fallback strings for records missing a field in the fetched document.
pub const NO_TITLE: &str = "Sin título";
pub const NO_ABSTRACT: &str = "Sin resumen disponible";

/// Publication-date window, selected by its reader-facing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyWindow {
    Last7Days,
    Last30Days,
    Last5Years,
}

impl RecencyWindow {
    pub const ALL: [RecencyWindow; 3] = [
        RecencyWindow::Last7Days,
        RecencyWindow::Last30Days,
        RecencyWindow::Last5Years,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Últimos 7 días" => Some(RecencyWindow::Last7Days),
            "Últimos 30 días" => Some(RecencyWindow::Last30Days),
            "Últimos 5 años" => Some(RecencyWindow::Last5Years),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecencyWindow::Last7Days => "Últimos 7 días",
            RecencyWindow::Last30Days => "Últimos 30 días",
            RecencyWindow::Last5Years => "Últimos 5 años",
        }
    }

    /// Date fragment understood by the search endpoint.
    pub fn fragment(&self) -> &'static str {
        match self {
            RecencyWindow::Last7Days => "last 7 days",
            RecencyWindow::Last30Days => "last 30 days",
            RecencyWindow::Last5Years => "last 5 years",
        }
    }
}

/// Reader profile driving the tone of generated summaries.
///
/// Unrecognized labels map to `General`, which produces a generic
/// instruction instead of rejecting the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderProfile {
    Student,
    Clinician,
    Researcher,
    General,
}

impl ReaderProfile {
    /// Profiles offered to the reader; `General` is only a fallback.
    pub const SELECTABLE: [ReaderProfile; 3] = [
        ReaderProfile::Student,
        ReaderProfile::Clinician,
        ReaderProfile::Researcher,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "Estudiante" => ReaderProfile::Student,
            "Clínico" => ReaderProfile::Clinician,
            "Investigador" => ReaderProfile::Researcher,
            _ => ReaderProfile::General,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReaderProfile::Student => "Estudiante",
            ReaderProfile::Clinician => "Clínico",
            ReaderProfile::Researcher => "Investigador",
            ReaderProfile::General => "General",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            ReaderProfile::Student => {
                "Resume el artículo de forma clara, explica los términos técnicos y añade 3 aprendizajes clave para estudiantes de fisioterapia."
            }
            ReaderProfile::Clinician => {
                "Resume el artículo en lenguaje sencillo y extrae 3 aplicaciones clínicas prácticas que un fisioterapeuta pueda usar con sus pacientes."
            }
            ReaderProfile::Researcher => {
                "Resume el artículo con enfoque en metodología, resultados y limitaciones. Añade un comentario crítico sobre su nivel de evidencia."
            }
            ReaderProfile::General => "Haz un resumen general del artículo.",
        }
    }
}

/// Validated search filters; immutable once built.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    pub topic: String,
    pub study_types: Vec<String>,
    pub recency: RecencyWindow,
    pub max_results: u32,
}

/// One fetched literature record. Missing fields are substituted with
/// the placeholder strings at extraction time, never left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteratureRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

// API request/response models
#[derive(Debug, Deserialize)]
pub struct DigestRequest {
    pub topic: String,
    pub study_types: Vec<String>,
    pub recency: String,
    pub profile: String,
    pub max_results: u32,
}

#[derive(Debug, Serialize)]
pub struct DigestResponse {
    pub request_id: Uuid,
    pub query: String,
    pub articles: Vec<ArticleDigest>,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDigest {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub topics: Vec<&'static str>,
    pub study_types: Vec<&'static str>,
    pub recency_windows: Vec<&'static str>,
    pub profiles: Vec<&'static str>,
    pub max_results_limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_labels_round_trip() {
        for window in RecencyWindow::ALL {
            assert_eq!(RecencyWindow::from_label(window.label()), Some(window));
        }
        assert_eq!(RecencyWindow::from_label("last month"), None);
    }

    #[test]
    fn profile_labels_resolve() {
        assert_eq!(ReaderProfile::from_label("Estudiante"), ReaderProfile::Student);
        assert_eq!(ReaderProfile::from_label("Clínico"), ReaderProfile::Clinician);
        assert_eq!(
            ReaderProfile::from_label("Investigador"),
            ReaderProfile::Researcher
        );
    }

    #[test]
    fn unknown_profile_falls_back_to_general() {
        assert_eq!(ReaderProfile::from_label("Paciente"), ReaderProfile::General);
        assert_eq!(ReaderProfile::from_label(""), ReaderProfile::General);
    }
}
