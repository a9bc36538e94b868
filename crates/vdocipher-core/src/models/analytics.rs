use serde::{Deserialize, Serialize};

/// Date range for `GET /videos/{id}/analytics`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AnalyticsQuery {
    pub fn between(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = &self.start_date {
            query.push(("startDate", start.clone()));
        }
        if let Some(end) = &self.end_date {
            query.push(("endDate", end.clone()));
        }
        query
    }
}
