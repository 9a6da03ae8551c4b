//! Seeds the administrator, sample staff, employer accounts and sample
//! talent requests. Safe to run repeatedly.
//! Run with: cargo run --bin seed

use sqlx::PgPool;

use flexi_careers::config::Config;
use flexi_careers::db::Database;
use flexi_careers::models::DEFAULT_STAFF_PASSWORD;
use flexi_careers::utils::hash_password;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@flexi-careers.com";

struct SampleStaff {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    role: &'static str,
    department: &'static str,
    can_assign_requests: bool,
}

const SAMPLE_STAFF: [SampleStaff; 5] = [
    SampleStaff {
        first_name: "Sarah",
        last_name: "Johnson",
        email: "sarah.johnson@flexicareers.com",
        phone: "+1-555-0101",
        role: "Talent Acquisition Manager",
        department: "Talent Acquisition",
        can_assign_requests: true,
    },
    SampleStaff {
        first_name: "Michael",
        last_name: "Chen",
        email: "michael.chen@flexicareers.com",
        phone: "+1-555-0102",
        role: "Senior Recruiter",
        department: "Talent Acquisition",
        can_assign_requests: true,
    },
    SampleStaff {
        first_name: "Emily",
        last_name: "Rodriguez",
        email: "emily.rodriguez@flexicareers.com",
        phone: "+1-555-0103",
        role: "Client Success Manager",
        department: "Client Success",
        can_assign_requests: true,
    },
    SampleStaff {
        first_name: "David",
        last_name: "Thompson",
        email: "david.thompson@flexicareers.com",
        phone: "+1-555-0104",
        role: "Recruiter",
        department: "Sales",
        can_assign_requests: false,
    },
    SampleStaff {
        first_name: "Lisa",
        last_name: "Wang",
        email: "lisa.wang@flexicareers.com",
        phone: "+1-555-0105",
        role: "Operations Coordinator",
        department: "Operations",
        can_assign_requests: false,
    },
];

struct SampleEmployer {
    company: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
}

const SAMPLE_EMPLOYERS: [SampleEmployer; 3] = [
    SampleEmployer {
        company: "TechStart Inc.",
        email: "contact@techstart.com",
        first_name: "Tech",
        last_name: "Startup",
    },
    SampleEmployer {
        company: "HealthTech Innovations",
        email: "admin@healthtech.com",
        first_name: "HealthTech",
        last_name: "Startup",
    },
    SampleEmployer {
        company: "FinanceFlow Corp",
        email: "contact@financeflow.com",
        first_name: "FinTech",
        last_name: "Corporation",
    },
];

struct SampleRequest {
    company_name: &'static str,
    contact_name: &'static str,
    email: &'static str,
    phone: &'static str,
    role_type: &'static str,
    role_title: &'static str,
    time_commitment: &'static str,
    timeline: &'static str,
    requirements: &'static str,
    budget_range: &'static str,
    status: &'static str,
    priority: &'static str,
    assigned_to: Option<&'static str>,
}

const SAMPLE_REQUESTS: [SampleRequest; 3] = [
    SampleRequest {
        company_name: "TechStart Inc.",
        contact_name: "John Doe",
        email: "john@techstart.com",
        phone: "+1-555-0201",
        role_type: "Technology",
        role_title: "CTO",
        time_commitment: "30-40 hours",
        timeline: "2-3 weeks",
        requirements: "Looking for experienced CTO to lead technical strategy...",
        budget_range: "$150-200",
        status: "new",
        priority: "high",
        assigned_to: None,
    },
    SampleRequest {
        company_name: "HealthTech Solutions",
        contact_name: "Jane Smith",
        email: "jane@healthtech.com",
        phone: "+1-555-0202",
        role_type: "Executive",
        role_title: "CMO",
        time_commitment: "20-30 hours",
        timeline: "1 month",
        requirements: "Need CMO to develop go-to-market strategy...",
        budget_range: "$120-180",
        status: "contacted",
        priority: "medium",
        assigned_to: Some("Sarah Johnson"),
    },
    SampleRequest {
        company_name: "FinanceFlow",
        contact_name: "Bob Wilson",
        email: "bob@financeflow.com",
        phone: "+1-555-0203",
        role_type: "Finance",
        role_title: "CFO",
        time_commitment: "25-35 hours",
        timeline: "immediate",
        requirements: "Seeking CFO for Series B preparation...",
        budget_range: "$180-250",
        status: "in_progress",
        priority: "urgent",
        assigned_to: Some("Michael Chen"),
    },
];

/// Login name for a seeded employer, e.g. `contact_techstartinc.`.
fn employer_username(company: &str, email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    format!("{}_{}", local, company.replace(' ', "").to_lowercase())
}

async fn seed_admin(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO admin_users (username, email, password_hash, first_name, last_name, role)
        VALUES ($1, $2, $3, 'System', 'Administrator', 'admin')
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(ADMIN_USERNAME)
    .bind(ADMIN_EMAIL)
    .bind(hash_password("admin123"))
    .execute(pool)
    .await?;

    let admin_id: i32 = sqlx::query_scalar("SELECT id FROM admin_users WHERE username = $1")
        .bind(ADMIN_USERNAME)
        .fetch_one(pool)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO staff (first_name, last_name, email, phone, role, department,
                           hire_date, can_assign_requests, is_admin, user_id, status)
        VALUES ('System', 'Administrator', $1, '+1-555-0000', 'System Administrator',
                'Administration', CURRENT_DATE, TRUE, TRUE, $2, 'active')
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(ADMIN_EMAIL)
    .bind(admin_id)
    .execute(pool)
    .await?;

    println!("Administrator ready (admin / admin123)");
    Ok(())
}

async fn seed_staff(pool: &PgPool) -> anyhow::Result<()> {
    for staff in &SAMPLE_STAFF {
        sqlx::query(
            r#"
            INSERT INTO staff (first_name, last_name, email, phone, role, department,
                               hire_date, can_assign_requests, is_admin, status)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_DATE, $7, FALSE, 'active')
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(staff.first_name)
        .bind(staff.last_name)
        .bind(staff.email)
        .bind(staff.phone)
        .bind(staff.role)
        .bind(staff.department)
        .bind(staff.can_assign_requests)
        .execute(pool)
        .await?;
    }

    println!("{} sample staff members ready", SAMPLE_STAFF.len());
    Ok(())
}

async fn seed_employers(pool: &PgPool) -> anyhow::Result<()> {
    let password_hash = hash_password(DEFAULT_STAFF_PASSWORD);

    for employer in &SAMPLE_EMPLOYERS {
        sqlx::query(
            r#"
            INSERT INTO admin_users (username, email, password_hash, first_name, last_name, role)
            VALUES ($1, $2, $3, $4, $5, 'employer')
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(employer_username(employer.company, employer.email))
        .bind(employer.email)
        .bind(&password_hash)
        .bind(employer.first_name)
        .bind(employer.last_name)
        .execute(pool)
        .await?;

        let user_id: Option<i32> = sqlx::query_scalar("SELECT id FROM admin_users WHERE email = $1")
            .bind(employer.email)
            .fetch_optional(pool)
            .await?;

        if let Some(user_id) = user_id {
            sqlx::query(
                r#"
                INSERT INTO employer_access (company_name, contact_email, admin_user_id, access_level)
                VALUES ($1, $2, $3, 'employer')
                ON CONFLICT (contact_email) DO NOTHING
                "#,
            )
            .bind(employer.company)
            .bind(employer.email)
            .bind(user_id)
            .execute(pool)
            .await?;
        }

        println!(
            "  {} -> {} / {}",
            employer.company, employer.email, DEFAULT_STAFF_PASSWORD
        );
    }

    Ok(())
}

async fn seed_requests(pool: &PgPool) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employer_requests")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Employer requests already present, skipping samples");
        return Ok(());
    }

    for request in &SAMPLE_REQUESTS {
        sqlx::query(
            r#"
            INSERT INTO employer_requests (
                company_name, contact_name, email, phone, role_type, role_title,
                time_commitment, timeline, requirements, budget_range,
                status, priority, assigned_to
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(request.company_name)
        .bind(request.contact_name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.role_type)
        .bind(request.role_title)
        .bind(request.time_commitment)
        .bind(request.timeline)
        .bind(request.requirements)
        .bind(request.budget_range)
        .bind(request.status)
        .bind(request.priority)
        .bind(request.assigned_to)
        .execute(pool)
        .await?;
    }

    println!("{} sample employer requests created", SAMPLE_REQUESTS.len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    println!("Connecting to database...");
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;
    println!("Connected successfully!");

    seed_admin(&db.pg).await?;
    seed_staff(&db.pg).await?;
    println!("Employer accounts:");
    seed_employers(&db.pg).await?;
    seed_requests(&db.pg).await?;

    println!("\n========================================");
    println!("Seed complete");
    println!("========================================");
    println!("Admin:     {} / admin123", ADMIN_USERNAME);
    println!("Employers: email / {}", DEFAULT_STAFF_PASSWORD);
    println!("========================================");

    Ok(())
}
