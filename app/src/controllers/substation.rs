//! Breaker record handlers

use web::{
    Flash, FlashKey, FormRequest, FrameworkError, HttpResponse, Redirect, Request, Response,
    Submission, ValidationErrors, FLASH_COOKIE,
};

use crate::bootstrap::AppState;
use crate::query::ListFilters;
use crate::requests::SubstationForm;
use crate::validation;
use crate::views::substations::{self as views, FormAction, FormPage};

const REQUIRED_SUMMARY: &str = "All required fields must be filled!";
const INVALID_SUMMARY: &str = "Please correct the highlighted fields.";

/// GET / - list records, optionally filtered
pub async fn index(req: Request, state: AppState) -> Response {
    let filters = ListFilters::from_request(&req);
    let records = state.store.list_filtered(&filters.spec()).await?;
    let flash = state.flash.read(&req);

    let page = views::index(&state.app_name, &records, &filters, flash.as_ref());
    let mut response = HttpResponse::html(page);
    if req.cookie(FLASH_COOKIE).is_some() {
        response = response.cookie(FlashKey::clear_cookie());
    }
    Ok(response)
}

/// GET /create - empty form
pub async fn create(_req: Request, state: AppState) -> Response {
    Ok(render_form(
        &state,
        FormAction::Create,
        &SubstationForm::default(),
        &ValidationErrors::new(),
        None,
    ))
}

/// POST /create
pub async fn store(req: Request, state: AppState) -> Response {
    let form = match SubstationForm::submit(&req)? {
        Submission::Valid(form) => form,
        Submission::Invalid { input, errors } => {
            return Ok(rejected(&state, FormAction::Create, &input, &errors))
        }
    };

    let tx = state.store.begin_write().await?;
    let conflicts =
        validation::validate_unique_breaker(tx.connection(), &form.breaker_name, None).await?;
    if !conflicts.is_empty() {
        tx.rollback().await?;
        return Ok(rejected(&state, FormAction::Create, &form, &conflicts));
    }

    tx.insert(form.into_input()).await?;
    tx.commit().await?;

    Ok(redirect_home(&state, "Substation created successfully!"))
}

/// GET /{id}/edit - form prefilled from the record
pub async fn edit(req: Request, state: AppState) -> Response {
    let id = record_id(&req)?;
    let record = state.store.get_by_id(id).await?;

    Ok(render_form(
        &state,
        FormAction::Edit(id),
        &SubstationForm::from_record(&record),
        &ValidationErrors::new(),
        None,
    ))
}

/// POST /{id}/edit
pub async fn update(req: Request, state: AppState) -> Response {
    let id = record_id(&req)?;
    state.store.get_by_id(id).await?;

    let form = match SubstationForm::submit(&req)? {
        Submission::Valid(form) => form,
        Submission::Invalid { input, errors } => {
            return Ok(rejected(&state, FormAction::Edit(id), &input, &errors))
        }
    };

    let tx = state.store.begin_write().await?;
    let conflicts =
        validation::validate_unique_breaker(tx.connection(), &form.breaker_name, Some(id)).await?;
    if !conflicts.is_empty() {
        tx.rollback().await?;
        return Ok(rejected(&state, FormAction::Edit(id), &form, &conflicts));
    }

    tx.update(id, form.into_input()).await?;
    tx.commit().await?;

    Ok(redirect_home(&state, "Substation updated successfully!"))
}

/// POST /{id}/delete
pub async fn destroy(req: Request, state: AppState) -> Response {
    let id = record_id(&req)?;
    state.store.delete(id).await?;

    Ok(redirect_home(&state, "Substation deleted successfully!"))
}

/// Route ids that are not integers name no record
fn record_id(req: &Request) -> Result<i32, FrameworkError> {
    let raw = req.param("id")?;
    raw.parse()
        .map_err(|_| FrameworkError::model_not_found(format!("Substation {}", raw)))
}

fn rejected(
    state: &AppState,
    action: FormAction,
    form: &SubstationForm,
    errors: &ValidationErrors,
) -> HttpResponse {
    let summary = if validation::validate_required(form).is_empty() {
        INVALID_SUMMARY
    } else {
        REQUIRED_SUMMARY
    };
    tracing::debug!(?action, errors = errors.len(), "form rejected");
    render_form(state, action, form, errors, Some(summary)).status(422)
}

fn render_form(
    state: &AppState,
    action: FormAction,
    form: &SubstationForm,
    errors: &ValidationErrors,
    summary: Option<&str>,
) -> HttpResponse {
    HttpResponse::html(views::form(
        &state.app_name,
        &FormPage {
            action,
            form,
            errors,
            summary,
        },
    ))
}

fn redirect_home(state: &AppState, message: &str) -> HttpResponse {
    Redirect::to("/")
        .cookie(state.flash.cookie(&Flash::success(message)))
        .into()
}
