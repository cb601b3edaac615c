//! Create form for one entity kind.

use std::fmt::Write;

use super::layout::{self, Crumb, Page};
use super::{escape, Flash};
use crate::entity::FieldSpec;
use crate::forms::widgets::{widget_for, Widget, WidgetRole};
use crate::forms::{Choice, ChoiceSets, FormErrors, Submission};
use crate::registry::PageConfig;

pub struct FormView<'a> {
    pub site_title: &'a str,
    pub config: &'static PageConfig,
    pub action: &'a str,
    pub choices: &'a ChoiceSets,
    /// Values to re-display after a rejected submission.
    pub submitted: Option<&'a Submission>,
    pub errors: Option<&'a FormErrors>,
    pub flash: Option<Flash<'a>>,
}

pub fn render(view: &FormView<'_>) -> String {
    let config = view.config;
    let mut body = String::new();

    let _ = write!(
        body,
        "<section class=\"mb-8\"><div class=\"text-4xl\">{}</div>\
         <h1 class=\"mt-2 text-2xl font-semibold\">{}</h1>\
         <p class=\"mt-2 text-slate-600\">{}</p></section>\n",
        escape(config.icon),
        escape(config.title),
        escape(config.description)
    );

    let enctype = if config.entity.accepts_uploads() {
        " enctype=\"multipart/form-data\""
    } else {
        ""
    };
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{}\"{enctype} novalidate data-record-form=\"{}\" class=\"space-y-6 rounded-2xl bg-white p-8 shadow-sm\">\n",
        escape(view.action),
        config.entity.key()
    );

    if let Some(errors) = view.errors {
        let non_field = errors.non_field_errors();
        if !non_field.is_empty() {
            body.push_str(&error_list(non_field));
        }
    }

    for field in config.schema() {
        render_field(&mut body, view, field);
    }

    let _ = write!(
        body,
        "<div class=\"flex justify-end gap-3\">\
         <a href=\"{}\" class=\"rounded-xl px-4 py-2.5 text-sm text-slate-600\">{}</a>\
         <button type=\"submit\" class=\"rounded-xl bg-indigo-600 px-5 py-2.5 text-sm font-semibold text-white hover:bg-indigo-500\">{}</button>\
         </div>\n</form>",
        escape(config.entity.list_path()),
        escape(config.list_label),
        escape(config.submit_label)
    );

    let crumbs = [
        Crumb {
            label: "Dashboard",
            url: Some("/"),
        },
        Crumb {
            label: config.title,
            url: None,
        },
    ];
    layout::render(
        &Page {
            site_title: view.site_title,
            title: config.title,
            breadcrumbs: &crumbs,
            flash: view.flash,
        },
        &body,
    )
}

fn render_field(out: &mut String, view: &FormView<'_>, field: &FieldSpec) {
    let widget = widget_for(field);
    let label = field.label();
    let errors = view
        .errors
        .map(|errors| errors.for_field(field.name))
        .unwrap_or_default();

    let _ = write!(
        out,
        "<div class=\"field\" data-field=\"{name}\">\
         <label for=\"id_{name}\" class=\"mb-1 block text-sm font-medium text-slate-700\">{label}{required}</label>",
        name = field.name,
        label = escape(&label),
        required = if field.required { " <span class=\"text-rose-600\">*</span>" } else { "" },
    );

    let submitted = |name: &str| view.submitted.and_then(|s| s.first(name)).unwrap_or_default();
    match widget.role {
        WidgetRole::Select => {
            let choices = choices_for(view, field);
            let current = submitted(field.name);
            let _ = write!(
                out,
                "<select name=\"{name}\" id=\"id_{name}\" class=\"{class}\" data-field-input=\"{name}\"{required}>",
                name = field.name,
                class = widget.class,
                required = required_attr(field),
            );
            let _ = write!(
                out,
                "<option value=\"\">{}</option>",
                escape(widget.empty_label.as_deref().unwrap_or("---------"))
            );
            for choice in choices {
                let selected = choice.id.to_string() == current;
                push_option(out, choice, selected);
            }
            out.push_str("</select>");
        }
        WidgetRole::MultiSelect => {
            let choices = choices_for(view, field);
            let current = view
                .submitted
                .map(|s| s.all(field.name))
                .unwrap_or_default();
            let _ = write!(
                out,
                "<select name=\"{name}\" id=\"id_{name}\" class=\"{class}\" multiple data-field-input=\"{name}\">",
                name = field.name,
                class = widget.class,
            );
            for choice in choices {
                let id = choice.id.to_string();
                let selected = current.iter().any(|value| value.trim() == id);
                push_option(out, choice, selected);
            }
            out.push_str("</select>");
        }
        WidgetRole::Checkbox => {
            let checked = !matches!(submitted(field.name), "" | "false" | "0" | "off");
            let _ = write!(
                out,
                "<input type=\"checkbox\" name=\"{name}\" id=\"id_{name}\" class=\"{class}\" data-field-input=\"{name}\"{checked}>",
                name = field.name,
                class = widget.class,
                checked = if checked { " checked" } else { "" },
            );
        }
        WidgetRole::File => push_input(out, field, &widget, None),
        WidgetRole::Text | WidgetRole::Number | WidgetRole::Date => {
            push_input(out, field, &widget, Some(submitted(field.name)))
        }
    }

    if let Some(help) = field.help_text {
        let _ = write!(out, "<p class=\"mt-1 text-xs text-slate-500\">{}</p>", escape(help));
    }
    if !errors.is_empty() {
        out.push_str(&error_list(errors));
    }
    out.push_str("</div>\n");
}

fn push_input(out: &mut String, field: &FieldSpec, widget: &Widget, value: Option<&str>) {
    let input_type = widget.role.input_type().unwrap_or("text");
    let _ = write!(
        out,
        "<input type=\"{input_type}\" name=\"{name}\" id=\"id_{name}\" class=\"{class}\" data-field-input=\"{name}\"",
        name = field.name,
        class = widget.class,
    );
    if let Some(placeholder) = &widget.placeholder {
        let _ = write!(out, " placeholder=\"{}\"", escape(placeholder));
    }
    if let Some(max_length) = widget.max_length {
        let _ = write!(out, " maxlength=\"{max_length}\"");
    }
    if let Some(accept) = widget.accept {
        let _ = write!(out, " accept=\"{accept}\"");
    }
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let _ = write!(out, " value=\"{}\"", escape(value));
    }
    out.push_str(required_attr(field));
    out.push('>');
}

fn push_option(out: &mut String, choice: &Choice, selected: bool) {
    let _ = write!(
        out,
        "<option value=\"{}\"{}>{}</option>",
        choice.id,
        if selected { " selected" } else { "" },
        escape(&choice.label)
    );
}

fn choices_for<'a>(view: &FormView<'a>, field: &FieldSpec) -> &'a [Choice] {
    view.choices
        .get(field.name)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn required_attr(field: &FieldSpec) -> &'static str {
    if field.required {
        " required"
    } else {
        ""
    }
}

fn error_list(messages: &[String]) -> String {
    let mut html = String::from("<ul class=\"errorlist mt-1 text-sm text-rose-600\">");
    for message in messages {
        let _ = write!(html, "<li>{}</li>", escape(message));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::registry::page_config;

    fn view<'a>(
        config: &'static PageConfig,
        choices: &'a ChoiceSets,
        submitted: Option<&'a Submission>,
        errors: Option<&'a FormErrors>,
    ) -> FormView<'a> {
        FormView {
            site_title: "ZisoDB",
            config,
            action: config.entity.create_path(),
            choices,
            submitted,
            errors,
            flash: None,
        }
    }

    #[test]
    fn unbound_form_lists_every_field_once() {
        let choices = ChoiceSets::new();
        for kind in EntityKind::ALL {
            let html = render(&view(page_config(kind), &choices, None, None));
            for field in kind.fields() {
                let marker = format!("data-field-input=\"{}\"", field.name);
                assert_eq!(html.matches(&marker).count(), 1, "{kind}.{}", field.name);
            }
            assert_eq!(html.matches("data-field-input=").count(), kind.fields().len());
        }
    }

    #[test]
    fn uploads_switch_the_encoding() {
        let choices = ChoiceSets::new();
        let employee = render(&view(page_config(EntityKind::Employee), &choices, None, None));
        assert!(employee.contains("enctype=\"multipart/form-data\""));
        assert!(employee.contains("accept=\"image/*\""));

        let director = render(&view(page_config(EntityKind::Director), &choices, None, None));
        assert!(!director.contains("enctype="));
    }

    #[test]
    fn rejected_values_and_errors_are_shown() {
        let mut choices = ChoiceSets::new();
        choices.insert(
            "employment_record_employee",
            vec![Choice {
                id: 7,
                label: "Ana Li".into(),
            }],
        );
        let mut submitted = Submission::default();
        submitted.push("employment_record_description", "Promoted <senior>");
        submitted.push("employment_record_employee", "7");
        let mut errors = FormErrors::new();
        errors.add("employment_record_date", "Enter a valid date.");

        let html = render(&view(
            page_config(EntityKind::EmploymentRecord),
            &choices,
            Some(&submitted),
            Some(&errors),
        ));
        assert!(html.contains("value=\"Promoted &lt;senior&gt;\""));
        assert!(html.contains("<option value=\"7\" selected>Ana Li</option>"));
        assert!(html.contains("<option value=\"\">Select employment record employee</option>"));
        assert!(html.contains("<li>Enter a valid date.</li>"));
    }
}
