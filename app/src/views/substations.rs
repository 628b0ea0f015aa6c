//! List page and create/edit form

use web::{Flash, ValidationErrors};

use super::{attr, layout, text};
use crate::models::substations::Model;
use crate::query::ListFilters;
use crate::requests::SubstationForm;

/// Which form is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Edit(i32),
}

impl FormAction {
    fn url(&self) -> String {
        match self {
            Self::Create => "/create".to_string(),
            Self::Edit(id) => format!("/{}/edit", id),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add Substation",
            Self::Edit(_) => "Edit Substation",
        }
    }
}

/// Everything the form page shows
pub struct FormPage<'a> {
    pub action: FormAction,
    pub form: &'a SubstationForm,
    pub errors: &'a ValidationErrors,
    pub summary: Option<&'a str>,
}

/// The record list with its filter form
pub fn index(
    app_name: &str,
    records: &[Model],
    filters: &ListFilters,
    flash: Option<&Flash>,
) -> String {
    let rows: String = records.iter().map(row).collect();
    let table = if records.is_empty() {
        "<p>No substations found.</p>".to_string()
    } else {
        format!(
            "<table>\n<thead><tr><th>Sr. No</th><th>Substation</th><th>Full name</th>\
             <th>Project number</th><th>Breaker</th><th>Feeding station</th><th>Bay</th>\
             <th></th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
            rows
        )
    };

    let body = format!(
        "<form method=\"get\" action=\"/\">\n\
         <input type=\"text\" name=\"substation_name\" placeholder=\"Substation name\" value=\"{name}\">\n\
         <input type=\"text\" name=\"breaker_name\" placeholder=\"Breaker name\" value=\"{breaker}\">\n\
         <button type=\"submit\">Filter</button> <a href=\"/\">Clear</a>\n\
         </form>\n<p><a href=\"/create\">Add substation</a></p>\n{table}",
        name = attr(filters.substation_name.as_deref().unwrap_or("")),
        breaker = attr(filters.breaker_name.as_deref().unwrap_or("")),
        table = table,
    );

    layout(app_name, "Substations", flash, &body)
}

fn row(record: &Model) -> String {
    format!(
        "<tr><td>{id}</td><td>{name}</td><td>{full}</td><td>{project}</td><td>{breaker}</td>\
         <td>{feeding}</td><td>{bay}</td><td><a href=\"/{id}/edit\">Edit</a> \
         <form class=\"inline\" method=\"post\" action=\"/{id}/delete\">\
         <button type=\"submit\">Delete</button></form></td></tr>\n",
        id = record.id,
        name = text(&record.substation_name),
        full = text(record.full_name.as_deref().unwrap_or("")),
        project = text(record.project_number.as_deref().unwrap_or("")),
        breaker = text(&record.breaker_name),
        feeding = text(&record.feeding_station_details),
        bay = text(&record.bay_name),
    )
}

/// The create/edit form, prefilled and annotated with errors
pub fn form(app_name: &str, page: &FormPage<'_>) -> String {
    let form = page.form;
    let fields = [
        ("substation_name", "Substation name", form.substation_name.as_str(), true),
        ("full_name", "Full name", form.full_name.as_deref().unwrap_or(""), false),
        (
            "p_number",
            "Project number",
            form.project_number.as_deref().unwrap_or(""),
            false,
        ),
        ("breaker_name", "Breaker name", form.breaker_name.as_str(), true),
        (
            "feeding_station_details",
            "Feeding station details",
            form.feeding_station_details.as_str(),
            true,
        ),
        ("bay_name", "Bay name", form.bay_name.as_str(), true),
    ];

    let inputs: String = fields
        .iter()
        .map(|(name, label, value, required)| {
            let errors: String = page
                .errors
                .field(name)
                .iter()
                .map(|m| format!("<div class=\"field-error\">{}</div>", text(m)))
                .collect();
            format!(
                "<p><label for=\"{name}\">{label}{mark}</label><br>\
                 <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">{errors}</p>\n",
                name = name,
                label = label,
                mark = if *required { " *" } else { "" },
                value = attr(value),
                errors = errors,
            )
        })
        .collect();

    let error_list = if page.errors.is_empty() {
        String::new()
    } else {
        let items: String = page
            .errors
            .messages()
            .iter()
            .map(|m| format!("<li>{}</li>", text(m)))
            .collect();
        format!("<ul class=\"errors\">{}</ul>\n", items)
    };

    let summary = page.summary.map(Flash::danger);
    let body = format!(
        "<h2>{title}</h2>\n{error_list}<form method=\"post\" action=\"{url}\">\n{inputs}\
         <button type=\"submit\">Save</button> <a href=\"/\">Cancel</a>\n</form>",
        title = page.action.title(),
        error_list = error_list,
        url = page.action.url(),
        inputs = inputs,
    );

    layout(app_name, page.action.title(), summary.as_ref(), &body)
}
