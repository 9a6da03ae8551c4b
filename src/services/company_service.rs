// Company service - public company directory and platform statistics
use crate::db::Database;
use crate::error::Result;
use crate::models::{Company, IndustryCount, PlatformStats};

pub struct CompanyService {
    db: Database,
}

impl CompanyService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Companies by name, each with its number of active jobs
    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        let companies = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.description, c.industry, c.website, c.location,
                   c.size, c.founded_year, c.logo_url, c.created_at, c.updated_at,
                   COUNT(j.id) AS job_count
            FROM companies c
            LEFT JOIN jobs j ON c.id = j.company_id AND j.status = 'active'
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.db.pg)
        .await?;

        Ok(companies)
    }

    pub async fn active_job_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'active'")
            .fetch_one(&self.db.pg)
            .await?;

        Ok(count)
    }

    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let active_jobs = self.active_job_count().await?;

        let companies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.db.pg)
            .await?;

        let total_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.db.pg)
            .await?;

        let recent_applications: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM applications WHERE applied_at >= NOW() - INTERVAL '30 days'",
        )
        .fetch_one(&self.db.pg)
        .await?;

        let top_industries: Vec<IndustryCount> = sqlx::query_as(
            r#"
            SELECT industry, COUNT(*) AS count
            FROM companies
            WHERE industry IS NOT NULL
            GROUP BY industry
            ORDER BY count DESC, industry
            LIMIT 5
            "#,
        )
        .fetch_all(&self.db.pg)
        .await?;

        Ok(PlatformStats {
            active_jobs,
            companies,
            total_applications,
            recent_applications,
            top_industries,
        })
    }
}
