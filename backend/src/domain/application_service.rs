//! Application workflow and enriched listing services.
//!
//! Submission is fail-closed: the course, university and student must all
//! exist before the store's atomic insert runs. The store's unique key on
//! `(student_id, course_id)` is the only duplicate guard, so concurrent
//! submissions for the same pair resolve to exactly one success.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::ports::{
    ApplicationCommand, ApplicationQuery, ApplicationRepository, CourseRepository, Mailer,
    OutgoingMail, RepositoryPorts, StudentRepository, UniversityRepository,
};
use super::repository_errors::{entity_not_found, map_repository_error};
use super::{
    Application, ApplicationFilter, ApplicationId, ApplicationRequest, Course, CourseId,
    EnrichedApplication, Error, MissingReference, Page, Student, StudentId, University,
    UniversityId,
};

/// Repositories consulted by the application workflow.
#[derive(Clone)]
pub struct ApplicationWorkflowPorts {
    pub courses: Arc<dyn CourseRepository>,
    pub universities: Arc<dyn UniversityRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl From<&RepositoryPorts> for ApplicationWorkflowPorts {
    fn from(ports: &RepositoryPorts) -> Self {
        Self {
            courses: Arc::clone(&ports.courses),
            universities: Arc::clone(&ports.universities),
            students: Arc::clone(&ports.students),
            applications: Arc::clone(&ports.applications),
        }
    }
}

impl ApplicationWorkflowPorts {
    async fn course(&self, id: CourseId) -> Result<Option<Course>, Error> {
        self.courses
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("course", err))
    }

    async fn university(&self, id: UniversityId) -> Result<Option<University>, Error> {
        self.universities
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("university", err))
    }

    async fn student(&self, id: StudentId) -> Result<Option<Student>, Error> {
        self.students
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("student", err))
    }
}

fn confirmation_mail(student: &Student, course: &Course, university: &University) -> OutgoingMail {
    OutgoingMail {
        to: student.email.clone(),
        subject: "Application received".to_owned(),
        body: format!(
            "Dear {},\n\nYour application for {} at {} has been received.",
            student.full_name(),
            course.name,
            university.name
        ),
    }
}

/// Implements [`ApplicationCommand`].
#[derive(Clone)]
pub struct ApplicationWorkflowService {
    ports: ApplicationWorkflowPorts,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
}

impl ApplicationWorkflowService {
    pub fn new(
        ports: ApplicationWorkflowPorts,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ports,
            mailer,
            clock,
        }
    }
}

#[async_trait]
impl ApplicationCommand for ApplicationWorkflowService {
    async fn submit(&self, request: ApplicationRequest) -> Result<Application, Error> {
        let target = request.validate()?;

        let course = self
            .ports
            .course(target.course_id)
            .await?
            .ok_or_else(|| entity_not_found("course", target.course_id))?;
        let university = self
            .ports
            .university(target.university_id)
            .await?
            .ok_or_else(|| entity_not_found("university", target.university_id))?;
        let student = self
            .ports
            .student(target.student_id)
            .await?
            .ok_or_else(|| entity_not_found("student", target.student_id))?;

        let application = Application::submit(target, ApplicationId::random(), self.clock.utc());
        self.ports
            .applications
            .insert(&application)
            .await
            .map_err(|err| map_repository_error("application", err))?;
        info!(
            application_id = %application.id,
            student_id = %application.student_id,
            course_id = %application.course_id,
            "application submitted"
        );

        let mail = confirmation_mail(&student, &course, &university);
        if let Err(err) = self.mailer.send(&mail).await {
            warn!(application_id = %application.id, error = %err, "confirmation email not sent");
        }
        Ok(application)
    }

    async fn withdraw(&self, id: ApplicationId) -> Result<Application, Error> {
        let removed = self
            .ports
            .applications
            .delete(&id)
            .await
            .map_err(|err| map_repository_error("application", err))?
            .ok_or_else(|| entity_not_found("application", id))?;
        info!(application_id = %id, "application withdrawn");
        Ok(removed)
    }
}

/// Per-listing memo of display names, so each referenced entity is fetched
/// at most once.
struct NameCache<K> {
    names: HashMap<K, Option<String>>,
}

impl<K> NameCache<K>
where
    K: Copy + Eq + Hash,
{
    fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    async fn resolve<F, Fut>(&mut self, key: K, fetch: F) -> Result<Option<String>, Error>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<Option<String>, Error>>,
    {
        if let Some(name) = self.names.get(&key) {
            return Ok(name.clone());
        }
        let name = fetch(key).await?;
        self.names.insert(key, name.clone());
        Ok(name)
    }
}

/// Implements [`ApplicationQuery`], joining each row with display names.
#[derive(Clone)]
pub struct ApplicationQueryService {
    ports: ApplicationWorkflowPorts,
}

impl ApplicationQueryService {
    pub fn new(ports: ApplicationWorkflowPorts) -> Self {
        Self { ports }
    }
}

#[async_trait]
impl ApplicationQuery for ApplicationQueryService {
    async fn list(
        &self,
        filter: ApplicationFilter,
        page: Page,
    ) -> Result<Vec<EnrichedApplication>, Error> {
        let applications = self
            .ports
            .applications
            .list(&filter, &page)
            .await
            .map_err(|err| map_repository_error("application", err))?;

        let mut students = NameCache::new();
        let mut courses = NameCache::new();
        let mut universities = NameCache::new();
        let mut rows = Vec::with_capacity(applications.len());
        for application in applications {
            let student_name = students
                .resolve(application.student_id, |id| async move {
                    Ok(self.ports.student(id).await?.map(|s| s.full_name()))
                })
                .await?;
            let course_name = courses
                .resolve(application.course_id, |id| async move {
                    Ok(self.ports.course(id).await?.map(|c| c.name))
                })
                .await?;
            let university_name = universities
                .resolve(application.university_id, |id| async move {
                    Ok(self.ports.university(id).await?.map(|u| u.name))
                })
                .await?;

            let missing = [
                (student_name.is_none(), MissingReference::Student),
                (course_name.is_none(), MissingReference::Course),
                (university_name.is_none(), MissingReference::University),
            ]
            .into_iter()
            .filter_map(|(absent, reference)| absent.then_some(reference))
            .collect();

            rows.push(EnrichedApplication {
                application,
                student_name,
                course_name,
                university_name,
                missing,
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
