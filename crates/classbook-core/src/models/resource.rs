use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Teaching material metadata as returned by `GET /materials`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub file_path: Option<String>,
    pub upload_date: Option<NaiveDateTime>,
    pub teacher_name: Option<String>,
    pub subject_name: Option<String>,
    pub classe_name: Option<String>,
}

/// Payload for `POST /materials`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCreate {
    pub title: String,
    pub file_path: String,
    pub subject_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classe_id: Option<i64>,
}

/// A quiz as returned by `GET /quizzes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub creation_date: Option<NaiveDateTime>,
    pub termination_date: Option<NaiveDateTime>,
    pub teacher_name: Option<String>,
    pub subject_name: Option<String>,
    pub classe_name: Option<String>,
}

/// Payload for `POST /quizzes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDateTime>,
    pub subject_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classe_id: Option<i64>,
}

/// A graded assessment as returned by `GET /assessments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub grade: Option<f64>,
    pub date: Option<NaiveDateTime>,
    pub creation_date: Option<NaiveDateTime>,
    pub student_name: Option<String>,
    pub classe_name: Option<String>,
}

/// Payload for `POST /assessments`. Grades run 0-20.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCreate {
    pub title: String,
    pub grade: f64,
    pub date: NaiveDateTime,
    pub student_id: i64,
    pub classe_id: i64,
}
