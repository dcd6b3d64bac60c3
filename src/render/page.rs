//! Server-rendered HTML page for the browser UI.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::chart::chart_markup;
use crate::export::ExportFormat;
use crate::models::{format_usd, CapacityValue, Field, ProjectInput, Submission, ValidationErrors};
use crate::report::{OutlineSnapshot, OutlineState};
use crate::state::Projections;

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:linear-gradient(135deg,#dbeafe,#dcfce7)}\
header,footer{padding:1rem 2rem}header{background:#fff;display:flex;justify-content:space-between;align-items:center}\
footer{background:#1f2937;color:#fff;text-align:center}main{padding:2rem;max-width:960px;margin:auto}\
.card{background:#fff;border-radius:6px;padding:1.5rem 2rem;margin-bottom:1rem;box-shadow:0 1px 4px #0002}\
label{display:block;font-weight:bold;margin-top:1rem}input{width:100%;padding:.4rem;box-sizing:border-box}\
.error{color:#dc2626;font-size:.8rem;font-style:italic}.actions{display:flex;gap:1rem;margin-top:1rem}\
.actions form{margin:0}nav a{margin-left:1rem}";

/// Everything the page shows, borrowed from the current application state.
pub struct PageView<'a> {
    pub submission: Option<&'a Submission>,
    /// Values to show in the form fields.
    pub form: &'a ProjectInput,
    pub errors: Option<&'a ValidationErrors>,
    pub outline: &'a OutlineSnapshot,
    pub projections: Option<&'a Projections>,
}

/// Form values for a page showing the current project, or an empty form.
pub fn form_for(submission: Option<&Submission>) -> ProjectInput {
    match submission {
        Some(s) => ProjectInput {
            project_name: s.project.project_name.clone(),
            location: s.project.location.clone(),
            installed_capacity: Some(CapacityValue::Number(s.project.installed_capacity)),
            start_date: s.project.start_date.clone(),
        },
        None => ProjectInput::default(),
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    page_markup(view).into_string()
}

fn page_markup(view: &PageView<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "PV Feasibility Study Generator" }
                @if view.outline.expanding {
                    meta http-equiv="refresh" content="1";
                }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h1 { "PV Feasibility Study Generator" }
                    nav {
                        a href="#project-form" { "New Project" }
                        a href="#report" { "Generate Report" }
                        a href="#financials" { "Financial Projections" }
                    }
                }
                main {
                    (project_form(view.form, view.errors))
                    @if let Some(submission) = view.submission {
                        (report(view.outline))
                        @if let Some(projections) = view.projections {
                            (financials(projections))
                        }
                        p { small { "Submitted " (submission.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string()) } }
                    }
                }
                footer { "© 2024 PV Feasibility Study Generator. All rights reserved." }
            }
        }
    }
}

struct FormField<'a> {
    field: Field,
    label: &'static str,
    input_type: &'static str,
    value: &'a str,
    placeholder: &'static str,
    step: Option<&'static str>,
    min: Option<&'static str>,
}

fn project_form(form: &ProjectInput, errors: Option<&ValidationErrors>) -> Markup {
    let capacity = form
        .installed_capacity
        .as_ref()
        .map(CapacityValue::display)
        .unwrap_or_default();
    let fields = [
        FormField {
            field: Field::ProjectName,
            label: "Project Name",
            input_type: "text",
            value: &form.project_name,
            placeholder: "XXXX Photovoltaic Power Generation Project",
            step: None,
            min: None,
        },
        FormField {
            field: Field::Location,
            label: "Location",
            input_type: "text",
            value: &form.location,
            placeholder: "City, State, Country",
            step: None,
            min: None,
        },
        FormField {
            field: Field::InstalledCapacity,
            label: "Installed Capacity (MW)",
            input_type: "number",
            value: &capacity,
            placeholder: "100",
            step: Some("0.1"),
            min: Some("0"),
        },
        FormField {
            field: Field::StartDate,
            label: "Project Start Date",
            input_type: "date",
            value: &form.start_date,
            placeholder: "",
            step: None,
            min: None,
        },
    ];

    html! {
        section #project-form {
            h2 { "Project Information" }
            form.card method="post" action="/project" {
                @for input in &fields {
                    label for=(input.field.as_str()) { (input.label) }
                    input id=(input.field.as_str()) name=(input.field.as_str()) type=(input.input_type)
                        value=(input.value) placeholder=(input.placeholder)
                        step=[input.step] min=[input.min];
                    @if let Some(message) = errors.and_then(|e| e.message_for(input.field)) {
                        p.error { (message) }
                    }
                }
                div.actions { button type="submit" { "Generate Report" } }
            }
        }
    }
}

fn report(outline: &OutlineSnapshot) -> Markup {
    html! {
        section #report {
            h2 { "Feasibility Study Report" }
            div.card {
                h3 { "Report Content" }
                @if outline.state == OutlineState::Empty {
                    form method="post" action="/report/generate" {
                        button type="submit" { "Generate Initial Report" }
                    }
                } @else {
                    ul {
                        @for section in &outline.sections {
                            li data-depth=(section.depth()) { (section.as_str()) }
                        }
                    }
                    div.actions {
                        form method="post" action="/report/expand" {
                            @if outline.expanding {
                                button type="submit" disabled { "Expanding..." }
                            } @else {
                                button type="submit" { "Expand Report" }
                            }
                        }
                        @for (format, label) in [(ExportFormat::Pdf, "Export to PDF"), (ExportFormat::Docx, "Export to Word")] {
                            a href=(format!("/api/v1/report/export/{}", format.extension())) download { (label) }
                        }
                        form method="post" action="/report/reset" {
                            button type="submit" { "Reset" }
                        }
                    }
                }
            }
        }
    }
}

fn financials(projections: &Projections) -> Markup {
    let indicators = &projections.indicators;
    html! {
        section #financials {
            h2 { "Financial Projections" }
            div.card {
                (chart_markup(&projections.rows))
                h4 { "Key Financial Indicators:" }
                ul {
                    li { "Initial Investment: " (format_usd(indicators.initial_investment)) }
                    li { "Estimated Annual Revenue: " (format_usd(indicators.annual_revenue)) }
                    li { "Estimated Annual OPEX: " (format_usd(indicators.annual_opex)) }
                    li { "Payback Period: " (indicators.payback_display()) }
                }
            }
        }
    }
}
