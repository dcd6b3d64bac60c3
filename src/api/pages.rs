//! Browser routes: the HTML page and the form posts behind its buttons.
//!
//! Form posts answer with a redirect back to the page, so a reload never
//! re-submits a form.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use super::handlers::project_not_found;
use crate::models::{ProjectInput, ValidationErrors};
use crate::render::{page, render_chart, render_page, PageView};
use crate::state::AppState;

fn page_html(state: &AppState, form: Option<&ProjectInput>, errors: Option<&ValidationErrors>) -> String {
    let submission = state.submission();
    let outline = state.outline().snapshot();
    let projections = state.projections();
    let current_form = page::form_for(submission.as_ref());

    render_page(&PageView {
        submission: submission.as_ref(),
        form: form.unwrap_or(&current_form),
        errors,
        outline: &outline,
        projections: projections.as_ref(),
    })
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page_html(&state, None, None))
}

pub async fn submit_project(
    State(state): State<AppState>,
    Form(input): Form<ProjectInput>,
) -> Response {
    match input.validate() {
        Ok(project) => {
            state.submit(project);
            Redirect::to("/#report").into_response()
        }
        Err(errors) => {
            tracing::warn!("Rejected project form: {}", errors);
            let html = page_html(&state, Some(&input), Some(&errors));
            (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
        }
    }
}

pub async fn generate_report(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.outline().generate() {
        tracing::warn!("Report conflict: {}", e);
    }
    Redirect::to("/#report")
}

/// Start an expansion in the background and go straight back to the page,
/// which shows the disabled button and refreshes until the expansion is done.
pub async fn expand_report(State(state): State<AppState>) -> Redirect {
    match state.outline().begin_expansion() {
        Ok(expansion) => {
            tokio::spawn(expansion.run());
        }
        Err(e) => tracing::warn!("Report conflict: {}", e),
    }
    Redirect::to("/#report")
}

pub async fn reset_report(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.outline().reset() {
        tracing::warn!("Report conflict: {}", e);
    }
    Redirect::to("/#report")
}

pub async fn chart(State(state): State<AppState>) -> Result<Response, (StatusCode, String)> {
    let projections = state.projections().ok_or_else(project_not_found)?;
    let svg = render_chart(&projections.rows);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
