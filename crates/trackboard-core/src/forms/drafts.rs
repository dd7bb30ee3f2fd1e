use chrono::{DateTime, Utc};

use super::{bounded_text, optional, record_id, required, split_comma_list, split_lines, FormError};
use crate::models::{
    clamp_progress, Activity, Certificate, CertificateStatus, Difficulty, MiniProject,
    MiniProjectStatus, Phase, Project, ProjectStatus,
};

/// Raw input for a daily activity.
#[derive(Debug, Clone, Default)]
pub struct ActivityDraft {
    pub date: String,
    pub topic: String,
    pub duration: String,
    pub description: String,
    /// Comma separated
    pub skills: String,
    pub progress: i64,
    /// One per line
    pub objectives: String,
    /// One per line
    pub resources: String,
    pub files: Vec<String>,
}

impl ActivityDraft {
    pub fn build(self, created_at: DateTime<Utc>) -> Result<Activity, FormError> {
        Ok(Activity {
            id: record_id(created_at),
            date: required("date", &self.date)?,
            topic: required("topic", &self.topic)?,
            duration: required("duration", &self.duration)?,
            description: bounded_text(&required("description", &self.description)?),
            skills: split_comma_list(&self.skills),
            progress: clamp_progress(self.progress),
            objectives: split_lines(&self.objectives),
            resources: split_lines(&self.resources),
            files: self.files,
        })
    }
}

/// Raw input for a certification.
#[derive(Debug, Clone, Default)]
pub struct CertificateDraft {
    pub name: String,
    pub provider: String,
    pub status: CertificateStatus,
    pub progress: i64,
    pub date_earned: String,
    pub expiry_date: String,
    pub credential_id: String,
    /// One per line
    pub study_materials: String,
    pub notes: String,
    pub files: Vec<String>,
}

impl CertificateDraft {
    pub fn build(self, created_at: DateTime<Utc>) -> Result<Certificate, FormError> {
        Ok(Certificate {
            id: record_id(created_at),
            name: required("name", &self.name)?,
            provider: required("provider", &self.provider)?,
            status: self.status,
            progress: clamp_progress(self.progress),
            date_earned: optional(&self.date_earned),
            expiry_date: optional(&self.expiry_date),
            credential_id: optional(&self.credential_id),
            study_materials: split_lines(&self.study_materials),
            notes: bounded_text(&self.notes),
            files: self.files,
        })
    }
}

/// Raw input for a final project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: String,
    pub end_date: String,
    /// Comma separated
    pub technologies: String,
    /// One per line
    pub objectives: String,
    /// One phase name per line
    pub phases: String,
    /// One per line
    pub achievements: String,
    /// One per line
    pub challenges: String,
    pub repository: String,
    pub demo_url: String,
    pub progress: i64,
    pub files: Vec<String>,
}

impl ProjectDraft {
    pub fn build(self, created_at: DateTime<Utc>) -> Result<Project, FormError> {
        Ok(Project {
            id: record_id(created_at),
            title: required("title", &self.title)?,
            description: bounded_text(&required("description", &self.description)?),
            status: self.status,
            start_date: required("start date", &self.start_date)?,
            end_date: optional(&self.end_date),
            technologies: split_comma_list(&self.technologies),
            objectives: split_lines(&self.objectives),
            phases: split_lines(&self.phases).into_iter().map(Phase::pending).collect(),
            achievements: split_lines(&self.achievements),
            challenges: split_lines(&self.challenges),
            repository: optional(&self.repository),
            demo_url: optional(&self.demo_url),
            progress: clamp_progress(self.progress),
            files: self.files,
        })
    }
}

/// Raw input for a mini project.
#[derive(Debug, Clone, Default)]
pub struct MiniProjectDraft {
    pub title: String,
    pub description: String,
    pub status: MiniProjectStatus,
    pub difficulty: Difficulty,
    pub date_completed: String,
    /// Comma separated
    pub technologies: String,
    /// One per line
    pub learning_outcomes: String,
    pub repository: String,
    pub demo_url: String,
    pub time_spent: String,
    pub files: Vec<String>,
}

impl MiniProjectDraft {
    pub fn build(self, created_at: DateTime<Utc>) -> Result<MiniProject, FormError> {
        Ok(MiniProject {
            id: record_id(created_at),
            title: required("title", &self.title)?,
            description: bounded_text(&required("description", &self.description)?),
            status: self.status,
            difficulty: self.difficulty,
            date_completed: optional(&self.date_completed),
            technologies: split_comma_list(&self.technologies),
            learning_outcomes: split_lines(&self.learning_outcomes),
            repository: optional(&self.repository),
            demo_url: optional(&self.demo_url),
            time_spent: required("time spent", &self.time_spent)?,
            files: self.files,
        })
    }
}
