use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    Account, AccountId, ApplicationId, CandidateProfile, Education, EducationId, Experience,
    ExperienceId, JobId, JobPosting,
};
use super::intake::{AccountDraft, EducationDraft, ExperienceDraft, JobPostingDraft, ProfileDraft};
use super::repository::{BoardRepository, RepositoryError};
use super::service::{BoardServiceError, JobBoardService};
use super::views::{
    ApplicantView, ApplicationStatusView, CandidateApplicationView, CandidateOverview,
};
use crate::matching::{CandidateSignals, JobSignals, MatchBreakdown};

/// Header carrying the account asserted by the upstream gateway.
pub const ACTOR_HEADER: &str = "x-account-id";

type ServiceState<R> = State<Arc<JobBoardService<R>>>;
type Handled<T> = Result<T, BoardServiceError>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Router builder exposing the job board JSON API.
pub fn board_router<R>(service: Arc<JobBoardService<R>>) -> Router
where
    R: BoardRepository + 'static,
{
    Router::new()
        .route("/api/v1/accounts", post(register_handler::<R>))
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler::<R>).post(create_job_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(job_handler::<R>).put(edit_job_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            get(applicants_handler::<R>).post(apply_handler::<R>),
        )
        .route("/api/v1/jobs/:job_id/match", get(match_handler::<R>))
        .route(
            "/api/v1/applications/:application_id/status",
            put(status_handler::<R>),
        )
        .route("/api/v1/me/applications", get(my_applications_handler::<R>))
        .route("/api/v1/me/jobs", get(my_jobs_handler::<R>))
        .route(
            "/api/v1/me/profile",
            get(profile_handler::<R>).put(save_profile_handler::<R>),
        )
        .route("/api/v1/me/experiences", post(add_experience_handler::<R>))
        .route(
            "/api/v1/me/experiences/:experience_id",
            put(edit_experience_handler::<R>).delete(remove_experience_handler::<R>),
        )
        .route("/api/v1/me/education", post(add_education_handler::<R>))
        .route(
            "/api/v1/me/education/:education_id",
            put(edit_education_handler::<R>).delete(remove_education_handler::<R>),
        )
        .route("/api/v1/match/score", post(score_handler::<R>))
        .with_state(service)
}

fn actor(headers: &HeaderMap) -> Result<AccountId, BoardServiceError> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| AccountId(value.to_string()))
        .ok_or(BoardServiceError::MissingActor)
}

pub(crate) async fn register_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    body: JsonBody<AccountDraft>,
) -> Handled<(StatusCode, Json<Account>)> {
    let Json(draft) = body?;
    let account = service.register(draft)?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub(crate) async fn list_jobs_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
) -> Handled<Json<Vec<JobPosting>>> {
    Ok(Json(service.list_jobs()?))
}

pub(crate) async fn job_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Handled<Json<JobPosting>> {
    service.account(&actor(&headers)?)?;
    Ok(Json(service.job(&JobId(job_id))?))
}

pub(crate) async fn create_job_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    body: JsonBody<JobPostingDraft>,
) -> Handled<(StatusCode, Json<JobPosting>)> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    let job = service.create_job(&actor, draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn edit_job_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    body: JsonBody<JobPostingDraft>,
) -> Handled<Json<JobPosting>> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    Ok(Json(service.edit_job(&actor, &JobId(job_id), draft)?))
}

pub(crate) async fn applicants_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Handled<Json<Vec<ApplicantView>>> {
    Ok(Json(
        service.ranked_applicants(&actor(&headers)?, &JobId(job_id))?,
    ))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplyRequest {
    #[serde(default)]
    message: String,
}

pub(crate) async fn apply_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    body: JsonBody<ApplyRequest>,
) -> Handled<(StatusCode, Json<ApplicationStatusView>)> {
    let actor = actor(&headers)?;
    let Json(request) = body?;
    let application = service.apply(&actor, &JobId(job_id), request.message)?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationStatusView::from(&application)),
    ))
}

pub(crate) async fn match_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Handled<Json<MatchBreakdown>> {
    Ok(Json(
        service.match_candidate(&actor(&headers)?, &JobId(job_id))?,
    ))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    status: String,
}

pub(crate) async fn status_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    body: JsonBody<StatusRequest>,
) -> Handled<Json<ApplicationStatusView>> {
    let actor = actor(&headers)?;
    let Json(request) = body?;
    let application = service.update_application_status(
        &actor,
        &ApplicationId(application_id),
        &request.status,
    )?;
    Ok(Json(ApplicationStatusView::from(&application)))
}

pub(crate) async fn my_applications_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
) -> Handled<Json<Vec<CandidateApplicationView>>> {
    Ok(Json(service.candidate_applications(&actor(&headers)?)?))
}

pub(crate) async fn my_jobs_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
) -> Handled<Json<Vec<JobPosting>>> {
    Ok(Json(service.company_jobs(&actor(&headers)?)?))
}

pub(crate) async fn profile_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
) -> Handled<Json<CandidateOverview>> {
    Ok(Json(service.profile(&actor(&headers)?)?))
}

pub(crate) async fn save_profile_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    body: JsonBody<ProfileDraft>,
) -> Handled<Json<CandidateProfile>> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    Ok(Json(service.save_profile(&actor, draft)?))
}

pub(crate) async fn add_experience_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    body: JsonBody<ExperienceDraft>,
) -> Handled<(StatusCode, Json<Experience>)> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    let experience = service.add_experience(&actor, draft)?;
    Ok((StatusCode::CREATED, Json(experience)))
}

pub(crate) async fn edit_experience_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(experience_id): Path<String>,
    body: JsonBody<ExperienceDraft>,
) -> Handled<Json<Experience>> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    Ok(Json(service.edit_experience(
        &actor,
        &ExperienceId(experience_id),
        draft,
    )?))
}

pub(crate) async fn remove_experience_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(experience_id): Path<String>,
) -> Handled<StatusCode> {
    service.remove_experience(&actor(&headers)?, &ExperienceId(experience_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn add_education_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    body: JsonBody<EducationDraft>,
) -> Handled<(StatusCode, Json<Education>)> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    let education = service.add_education(&actor, draft)?;
    Ok((StatusCode::CREATED, Json(education)))
}

pub(crate) async fn edit_education_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(education_id): Path<String>,
    body: JsonBody<EducationDraft>,
) -> Handled<Json<Education>> {
    let actor = actor(&headers)?;
    let Json(draft) = body?;
    Ok(Json(service.edit_education(
        &actor,
        &EducationId(education_id),
        draft,
    )?))
}

pub(crate) async fn remove_education_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    headers: HeaderMap,
    Path(education_id): Path<String>,
) -> Handled<StatusCode> {
    service.remove_education(&actor(&headers)?, &EducationId(education_id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    job: JobSignals,
    candidate: CandidateSignals,
}

pub(crate) async fn score_handler<R: BoardRepository + 'static>(
    State(service): ServiceState<R>,
    body: JsonBody<ScoreRequest>,
) -> Handled<Json<MatchBreakdown>> {
    let Json(request) = body?;
    Ok(Json(
        service.scorer().evaluate(&request.job, &request.candidate),
    ))
}

impl From<JsonRejection> for BoardServiceError {
    fn from(rejection: JsonRejection) -> Self {
        BoardServiceError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for BoardServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            BoardServiceError::Validation(_)
            | BoardServiceError::ProfileIncomplete
            | BoardServiceError::InvalidStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BoardServiceError::MissingActor | BoardServiceError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            BoardServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            BoardServiceError::NotFound(_) | BoardServiceError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            BoardServiceError::AlreadyApplied(_)
            | BoardServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            BoardServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            BoardServiceError::InvalidBody { status, .. } => *status,
        };

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}
