use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::dto::assessment_dto::UpsertAssessmentPayload;
use crate::error::Result;
use crate::models::assessment::{Question, QuestionType, Section};
use crate::models::candidate::CandidateStage;
use crate::models::job::JobStatus;
use crate::models::team_member::TeamMember;
use crate::services::assessment_service::AssessmentService;
use crate::services::team_service::TeamService;
use crate::utils::slug::slugify;
use crate::utils::time::now;

const JOB_TITLES: &[&str] = &[
    "Senior Backend Engineer",
    "Frontend Developer",
    "Product Designer",
    "Data Analyst",
    "DevOps Engineer",
    "Engineering Manager",
    "QA Automation Engineer",
    "Technical Writer",
    "Mobile Developer",
    "Site Reliability Engineer",
    "Security Engineer",
    "Product Manager",
    "Machine Learning Engineer",
    "Customer Success Lead",
    "Solutions Architect",
];

const TAGS: &[&str] = &["Engineering", "Remote", "Full-time", "Part-time", "Hybrid", "Senior"];

const FIRST_NAMES: &[&str] = &[
    "Ava", "Liam", "Noah", "Mia", "Ethan", "Zoe", "Lucas", "Aria", "Mateo", "Nora", "Omar",
    "Priya", "Kenji", "Sofia", "Diego", "Hana", "Ivan", "Leila", "Tariq", "Elena",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Nguyen", "Patel", "Kowalski", "Okafor", "Silva", "Tanaka", "Haddad",
    "Novak", "Larsen", "Moreau", "Kim", "Rossi", "Ahmed", "Fischer",
];

struct SeedJob {
    id: Uuid,
    title: String,
    slug: String,
    status: JobStatus,
    tags: Vec<String>,
    order: i64,
    created_at: DateTime<Utc>,
}

struct SeedCandidate {
    id: Uuid,
    name: String,
    email: String,
    job_id: Uuid,
    stage: CandidateStage,
    applied_at: DateTime<Utc>,
    avatar_url: String,
}

/// Fills an empty database with demo jobs, candidates, team members and
/// assessments. Does nothing if any job already exists.
pub async fn seed_demo_data(pool: &SqlitePool, config: &Config) -> Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(jobs = existing, "database already seeded");
        return Ok(());
    }

    let (jobs, candidates) = {
        let mut rng = rand::thread_rng();
        let jobs = plan_jobs(config.seed_job_count, &mut rng);
        let candidates = plan_candidates(config.seed_candidate_count, &jobs, &mut rng);
        (jobs, candidates)
    };

    let mut tx = pool.begin().await?;
    for job in &jobs {
        sqlx::query(
            "INSERT INTO jobs (id, title, slug, status, tags, sort_order, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.slug)
        .bind(job.status)
        .bind(Json(&job.tags))
        .bind(job.order)
        .bind(job.created_at)
        .execute(&mut *tx)
        .await?;
    }
    for candidate in &candidates {
        sqlx::query(
            "INSERT INTO candidates (id, name, email, job_id, stage, applied_at, avatar_url) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(candidate.job_id)
        .bind(candidate.stage)
        .bind(candidate.applied_at)
        .bind(&candidate.avatar_url)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!(jobs = jobs.len(), candidates = candidates.len(), "seeded jobs and candidates");

    let team = TeamService::new(pool.clone());
    for member in team_members() {
        team.add(&member).await?;
    }

    let assessments = AssessmentService::new(pool.clone());
    for job in jobs.iter().take(3) {
        assessments
            .upsert(
                job.id,
                UpsertAssessmentPayload {
                    title: format!("{} - Skills Assessment", job.title),
                    description: Some("Complete every required question.".to_string()),
                    sections: demo_sections(),
                },
            )
            .await?;
    }

    info!("database seeding complete");
    Ok(())
}

fn plan_jobs(count: usize, rng: &mut impl Rng) -> Vec<SeedJob> {
    (0..count)
        .map(|i| {
            let title = JOB_TITLES[i % JOB_TITLES.len()].to_string();
            let tag_count = rng.gen_range(1..=3);
            let mut tags: Vec<String> = TAGS
                .choose_multiple(rng, tag_count)
                .map(|tag| tag.to_string())
                .collect();
            tags.sort();
            SeedJob {
                id: Uuid::new_v4(),
                slug: format!("{}-{}", slugify(&title), i),
                title,
                status: if rng.gen_bool(0.7) {
                    JobStatus::Active
                } else {
                    JobStatus::Archived
                },
                tags,
                order: i as i64,
                created_at: days_ago(rng, 365),
            }
        })
        .collect()
}

fn plan_candidates(count: usize, jobs: &[SeedJob], rng: &mut impl Rng) -> Vec<SeedCandidate> {
    if jobs.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let job = &jobs[rng.gen_range(0..jobs.len())];
            SeedCandidate {
                id: Uuid::new_v4(),
                name: format!("{} {}", first, last),
                email: format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i),
                job_id: job.id,
                stage: CandidateStage::ALL[rng.gen_range(0..CandidateStage::ALL.len())],
                applied_at: days_ago(rng, 180),
                avatar_url: format!("https://i.pravatar.cc/150?u={}", i),
            }
        })
        .collect()
}

fn days_ago(rng: &mut impl Rng, max_days: i64) -> DateTime<Utc> {
    now() - Duration::minutes(rng.gen_range(0..max_days * 24 * 60))
}

fn team_members() -> Vec<TeamMember> {
    [
        ("1", "Sarah Johnson", "sarah.johnson@talentflow.com"),
        ("2", "Michael Chen", "michael.chen@talentflow.com"),
        ("3", "Emily Rodriguez", "emily.rodriguez@talentflow.com"),
        ("4", "David Kim", "david.kim@talentflow.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: Some(format!("https://i.pravatar.cc/150?u={}", email)),
    })
    .collect()
}

fn question(id: &str, question_type: QuestionType, text: &str, required: bool) -> Question {
    Question {
        id: id.to_string(),
        question_type,
        text: text.to_string(),
        description: None,
        required,
        options: None,
        min_value: None,
        max_value: None,
        max_length: None,
        conditional_on: None,
        conditional_value: None,
    }
}

fn demo_sections() -> Vec<Section> {
    let mut arithmetic = question("q-arithmetic", QuestionType::SingleChoice, "What is 2 + 2?", true);
    arithmetic.options = Some(vec!["3".into(), "4".into(), "5".into()]);

    let capital = question(
        "q-capital",
        QuestionType::ShortText,
        "What is the capital of France?",
        true,
    );

    let mut experience = question(
        "q-experience",
        QuestionType::Numeric,
        "Years of professional experience",
        true,
    );
    experience.min_value = Some(0.0);
    experience.max_value = Some(50.0);

    let mut led_team = question(
        "q-led-team",
        QuestionType::SingleChoice,
        "Have you led a team before?",
        true,
    );
    led_team.options = Some(vec!["Yes".into(), "No".into()]);

    let mut team_size = question(
        "q-team-size",
        QuestionType::ShortText,
        "How many people did you lead?",
        true,
    );
    team_size.conditional_on = Some("q-led-team".into());
    team_size.conditional_value = Some("Yes".into());

    let mut project = question(
        "q-project",
        QuestionType::LongText,
        "Describe a complex project you worked on.",
        true,
    );
    project.max_length = Some(2000);

    vec![
        Section {
            id: "s-general".into(),
            title: "General Logic".into(),
            description: None,
            questions: vec![arithmetic, capital],
        },
        Section {
            id: "s-role".into(),
            title: "Role-Specific Skills".into(),
            description: None,
            questions: vec![experience, led_team, team_size, project],
        },
    ]
}
