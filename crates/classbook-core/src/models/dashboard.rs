use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Landing-page aggregate returned by `GET /dashboard`.
///
/// The backend assembles a role-appropriate snapshot in one response so the
/// landing view needs a single call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_name: String,
    pub role: String,
    #[serde(default)]
    pub classes: Vec<ClasseSummary>,
    #[serde(default)]
    pub materials: Vec<MaterialSummary>,
    #[serde(default)]
    pub quizzes: Vec<QuizSummary>,
    #[serde(default)]
    pub assessments: Vec<AssessmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClasseSummary {
    pub id: i64,
    pub name: String,
    pub subject_name: Option<String>,
    pub academic_year_name: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: i64,
    pub title: String,
    pub classe_name: Option<String>,
    pub subject_name: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub classe_name: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub has_pending_answers: bool,
}

/// Assessment line on the dashboard. `student_name` is only present for
/// teachers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub id: i64,
    pub title: String,
    pub grade: Option<f64>,
    pub classe_name: Option<String>,
    pub student_name: Option<String>,
    pub date: Option<NaiveDateTime>,
}
