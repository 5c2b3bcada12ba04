use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A class as returned by `GET /classes` and `GET /classes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classe {
    pub id: i64,
    pub name: String,
    pub creation_date: Option<NaiveDateTime>,
    pub academic_year_name: Option<String>,
    pub subject_name: Option<String>,
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub student_names: Vec<String>,
}

/// Payload for `POST /classes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClasseCreate {
    pub name: String,
    pub subject_id: i64,
    pub academic_year_id: i64,
}

/// Roster mutation payload for `POST`/`DELETE /classes/{id}/students`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterChange {
    pub student_ids: Vec<i64>,
}

/// A student as listed on a class roster or found by email search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
