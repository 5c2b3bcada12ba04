//! Command implementations for the classbook CLI.
//!
//! Each command drives the shared `ApiClient` and renders plain-text output.
//! Error handling stays in `main`; commands just propagate.

use std::io::{self, Write};

use anyhow::{Context, Result};
use classbook_core::models::{
    Assessment, Classe, Dashboard, Institution, Material, Quiz, Role, Student,
};
use classbook_core::{ApiClient, Config, ResponseBody, SessionStore};
use futures::try_join;

use crate::format;

pub async fn login(client: &ApiClient, mut config: Config, email_arg: Option<&str>) -> Result<()> {
    let email = match email_arg {
        Some(email) => email.to_string(),
        None => prompt_email(config.last_email.as_deref())?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let user = client.login(&email, &password).await?;

    config.last_email = Some(email);
    config.save()?;

    println!(
        "Signed in as {} ({})",
        user.full_name(),
        format::role(user.role)
    );
    Ok(())
}

fn prompt_email(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        last.map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("An email address is required"))
    } else {
        Ok(input.to_string())
    }
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> Result<()> {
    match client.session().user() {
        Some(user) => println!(
            "{} <{}> - {}",
            user.full_name(),
            user.email,
            format::role(user.role)
        ),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub async fn profile(client: &ApiClient) -> Result<()> {
    let user = client.profile().await?;

    println!("Name:  {}", user.full_name());
    println!("Email: {}", user.email);
    println!("Role:  {}", format::role(user.role));

    if let Some(institution_id) = user.institution_id {
        let institution: Institution = client
            .get(&format!("/institutions/{}", institution_id))
            .await?
            .json()?;
        println!("Institution: {}", institution.name);
    }
    Ok(())
}

pub async fn dashboard(client: &ApiClient) -> Result<()> {
    let dashboard: Dashboard = client.get("/dashboard").await?.json()?;

    println!("Dashboard for {} ({})", dashboard.user_name, dashboard.role);

    println!();
    println!("Classes ({}):", dashboard.classes.len());
    for classe in &dashboard.classes {
        println!(
            "  {:<5} {:<32} {}",
            classe.id,
            format::truncate(&classe.name, 32),
            format::optional(&classe.subject_name, "-")
        );
    }

    println!();
    println!("Materials ({}):", dashboard.materials.len());
    for material in &dashboard.materials {
        println!(
            "  {:<5} {:<32} {}",
            material.id,
            format::truncate(&material.title, 32),
            format::optional(&material.classe_name, "-")
        );
    }

    println!();
    println!("Quizzes ({}):", dashboard.quizzes.len());
    for quiz in &dashboard.quizzes {
        let pending = if quiz.has_pending_answers {
            " [pending answers]"
        } else {
            ""
        };
        println!(
            "  {:<5} {:<32} {}{}",
            quiz.id,
            format::truncate(&quiz.title, 32),
            format::optional(&quiz.classe_name, "-"),
            pending
        );
    }

    println!();
    println!("Assessments ({}):", dashboard.assessments.len());
    for assessment in &dashboard.assessments {
        println!(
            "  {:<5} {:<32} {:>5} {}",
            assessment.id,
            format::truncate(&assessment.title, 32),
            format::grade(assessment.grade),
            format::optional(&assessment.student_name, "")
        );
    }

    Ok(())
}

pub async fn classes(client: &ApiClient) -> Result<()> {
    // Students get their own filtered listing
    let path = match client.session().user() {
        Some(user) if user.role == Role::Student => format!("/classes/student/{}", user.id),
        _ => "/classes".to_string(),
    };

    let classes: Vec<Classe> = client.get(&path).await?.json()?;
    if classes.is_empty() {
        println!("No classes.");
        return Ok(());
    }

    for classe in &classes {
        println!(
            "{:<5} {:<32} {:<20} {}",
            classe.id,
            format::truncate(&classe.name, 32),
            format::optional(&classe.subject_name, "-"),
            format::optional(&classe.academic_year_name, "-")
        );
    }
    Ok(())
}

pub async fn class_detail(client: &ApiClient, id: i64) -> Result<()> {
    // The detail view spans five resources; fetch them concurrently
    let (classe, students, materials, quizzes, assessments) = try_join!(
        async { client.get(&format!("/classes/{}", id)).await?.json::<Classe>() },
        async {
            client
                .get(&format!("/classes/{}/students", id))
                .await?
                .json::<Vec<Student>>()
        },
        async {
            client
                .get(&format!("/materials?classeId={}", id))
                .await?
                .json::<Vec<Material>>()
        },
        async {
            client
                .get(&format!("/quizzes?classeId={}", id))
                .await?
                .json::<Vec<Quiz>>()
        },
        async {
            client
                .get(&format!("/assessments/classe/{}", id))
                .await?
                .json::<Vec<Assessment>>()
        },
    )?;

    println!("{} ({})", classe.name, format::optional(&classe.subject_name, "-"));
    println!(
        "Year: {}  Teacher: {}  Created: {}",
        format::optional(&classe.academic_year_name, "-"),
        format::optional(&classe.teacher_name, "-"),
        format::date(&classe.creation_date)
    );

    println!();
    println!("Students ({}):", students.len());
    for student in &students {
        println!("  {:<5} {:<28} {}", student.id, student.full_name(), student.email);
    }

    println!();
    println!("Materials ({}):", materials.len());
    for material in &materials {
        println!(
            "  {:<5} {:<32} {}",
            material.id,
            format::truncate(&material.title, 32),
            format::date(&material.upload_date)
        );
    }

    println!();
    println!("Quizzes ({}):", quizzes.len());
    for quiz in &quizzes {
        println!(
            "  {:<5} {:<32} closes {}",
            quiz.id,
            format::truncate(&quiz.title, 32),
            format::date(&quiz.termination_date)
        );
    }

    println!();
    println!("Assessments ({}):", assessments.len());
    for assessment in &assessments {
        println!(
            "  {:<5} {:<32} {:>5} {}",
            assessment.id,
            format::truncate(&assessment.title, 32),
            format::grade(assessment.grade),
            format::optional(&assessment.student_name, "")
        );
    }

    Ok(())
}

pub async fn materials(client: &ApiClient) -> Result<()> {
    let materials: Vec<Material> = client.get("/materials").await?.json()?;
    if materials.is_empty() {
        println!("No materials.");
        return Ok(());
    }

    for material in &materials {
        println!(
            "{:<5} {:<32} {:<20} {}",
            material.id,
            format::truncate(&material.title, 32),
            format::optional(&material.classe_name, "-"),
            format::date(&material.upload_date)
        );
    }
    Ok(())
}

pub async fn quizzes(client: &ApiClient) -> Result<()> {
    let quizzes: Vec<Quiz> = client.get("/quizzes").await?.json()?;
    if quizzes.is_empty() {
        println!("No quizzes.");
        return Ok(());
    }

    for quiz in &quizzes {
        println!(
            "{:<5} {:<32} {:<20} closes {}",
            quiz.id,
            format::truncate(&quiz.title, 32),
            format::optional(&quiz.classe_name, "-"),
            format::date(&quiz.termination_date)
        );
    }
    Ok(())
}

pub async fn assessments(client: &ApiClient) -> Result<()> {
    let assessments: Vec<Assessment> = client.get("/assessments").await?.json()?;
    if assessments.is_empty() {
        println!("No assessments.");
        return Ok(());
    }

    for assessment in &assessments {
        println!(
            "{:<5} {:<32} {:>5} {:<20} {}",
            assessment.id,
            format::truncate(&assessment.title, 32),
            format::grade(assessment.grade),
            format::optional(&assessment.classe_name, "-"),
            format::optional(&assessment.student_name, "")
        );
    }
    Ok(())
}

pub async fn institutions(client: &ApiClient) -> Result<()> {
    let institutions: Vec<Institution> = client.get("/institutions").await?.json()?;
    if institutions.is_empty() {
        println!("No institutions.");
        return Ok(());
    }

    for institution in &institutions {
        println!(
            "{:<5} {:<32} {}",
            institution.id,
            format::truncate(&institution.name, 32),
            format::optional(&institution.location, "-")
        );
    }
    Ok(())
}

/// Raw GET for poking at endpoints; prints JSON prettified, text verbatim.
pub async fn raw_get(client: &ApiClient, path: &str) -> Result<()> {
    match client.get(path).await? {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ResponseBody::Text(text) => println!("{}", text),
    }
    Ok(())
}
