use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A subject taught at an institution (`GET /subjects`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub institution_name: Option<String>,
}

/// An academic year (`GET /academic-years`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: i64,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub active: bool,
    pub creation_date: Option<NaiveDateTime>,
    pub institution_name: Option<String>,
}

/// An institution (`GET /institutions`, `GET /institutions/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub user_names: Vec<String>,
    #[serde(default)]
    pub academic_year_names: Vec<String>,
}
