//! Data models for classbook entities.
//!
//! This module contains the wire-format data structures exchanged with the
//! backend:
//!
//! - `UserProfile`, `Role`: the signed-in identity
//! - `Classe`, `Student`: classes and their rosters
//! - `Material`, `Quiz`, `Assessment`: teaching resources
//! - `Subject`, `AcademicYear`, `Institution`: catalog entities
//! - `Dashboard`: the landing-page aggregate
//!
//! Timestamps arrive without a zone (`LocalDateTime` on the backend), so
//! they map to `NaiveDateTime`/`NaiveDate` here.

pub mod catalog;
pub mod classe;
pub mod dashboard;
pub mod resource;
pub mod user;

pub use catalog::{AcademicYear, Institution, Subject};
pub use classe::{Classe, ClasseCreate, RosterChange, Student};
pub use dashboard::{AssessmentSummary, ClasseSummary, Dashboard, MaterialSummary, QuizSummary};
pub use resource::{Assessment, AssessmentCreate, Material, MaterialCreate, Quiz, QuizCreate};
pub use user::{ProfileUpdate, RegisterRequest, Role, UserProfile};
