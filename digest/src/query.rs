use crate::models::RecencyWindow;

/// Builds the search-endpoint query string from the selected filters.
///
/// The topic is restricted to title/abstract, study types are OR-joined
/// as exact-phrase publication types, and a fixed English-language
/// clause is always appended. An empty `study_types` slice produces a
/// degenerate `()` clause; callers are expected to reject that upstream.
pub fn build_query(topic: &str, study_types: &[String], recency: RecencyWindow) -> String {
    let topic_clause = format!("({topic}[Title/Abstract])");
    let type_clause = study_types
        .iter()
        .map(|t| format!("\"{t}\"[Publication Type]"))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        "{topic_clause} AND ({type_clause}) AND ({}[PDat]) AND (english[lang])",
        recency.fragment()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_clauses_with_and() {
        let query = build_query(
            "ACL",
            &[
                "randomized controlled trial".to_string(),
                "systematic review".to_string(),
            ],
            RecencyWindow::Last30Days,
        );

        assert_eq!(
            query,
            "(ACL[Title/Abstract]) AND (\"randomized controlled trial\"[Publication Type] \
             OR \"systematic review\"[Publication Type]) AND (last 30 days[PDat]) \
             AND (english[lang])"
        );
    }

    #[test]
    fn single_study_type_has_no_or() {
        let query = build_query(
            "tendinopathy",
            &["clinical trial".to_string()],
            RecencyWindow::Last7Days,
        );

        assert!(!query.contains(" OR "));
        assert!(query.contains("(\"clinical trial\"[Publication Type])"));
        assert_eq!(query.matches("tendinopathy").count(), 1);
    }

    #[test]
    fn empty_study_types_degenerates_to_empty_clause() {
        let query = build_query("ACL", &[], RecencyWindow::Last5Years);

        assert!(query.contains("AND ()"));
        assert!(query.contains("(ACL[Title/Abstract])"));
    }

    #[test]
    fn recency_fragment_matches_selected_window() {
        for window in RecencyWindow::ALL {
            let query = build_query("low back pain", &["clinical trial".to_string()], window);
            assert!(query.contains(&format!("({}[PDat])", window.fragment())));
        }
    }
}
