//! Presentation descriptors for form fields.

use crate::entity::{FieldKind, FieldSpec};

const TEXT_INPUT_CLASS: &str = "block w-full rounded-xl border border-slate-200 bg-white px-4 py-2.5 text-sm text-slate-900 shadow-sm transition focus:border-indigo-500 focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:ring-offset-1";
const FILE_INPUT_CLASS: &str = "block w-full text-sm text-slate-900 file:mr-4 file:rounded-lg file:border-0 file:bg-indigo-600 file:px-4 file:py-2 file:font-semibold file:text-white hover:file:bg-indigo-500 focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:ring-offset-1";
const CHECKBOX_CLASS: &str =
    "h-4 w-4 rounded border-slate-300 text-indigo-600 shadow-sm focus:ring-indigo-500";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetRole {
    Text,
    Number,
    Date,
    Checkbox,
    File,
    Select,
    MultiSelect,
}

impl WidgetRole {
    /// `type` attribute for `<input>` roles; selects render as `<select>`.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            WidgetRole::Text => Some("text"),
            WidgetRole::Number => Some("number"),
            WidgetRole::Date => Some("date"),
            WidgetRole::Checkbox => Some("checkbox"),
            WidgetRole::File => Some("file"),
            WidgetRole::Select | WidgetRole::MultiSelect => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub role: WidgetRole,
    pub class: &'static str,
    pub placeholder: Option<String>,
    pub empty_label: Option<String>,
    pub accept: Option<&'static str>,
    pub max_length: Option<usize>,
}

pub fn widget_for(field: &FieldSpec) -> Widget {
    let label = field.label();
    let role = match field.kind {
        FieldKind::Integer => WidgetRole::Number,
        FieldKind::Text { .. } => WidgetRole::Text,
        FieldKind::Date => WidgetRole::Date,
        FieldKind::Boolean => WidgetRole::Checkbox,
        FieldKind::Image | FieldKind::File => WidgetRole::File,
        FieldKind::ForeignKey(_) => WidgetRole::Select,
        FieldKind::ManyToMany(_) => WidgetRole::MultiSelect,
    };

    let class = match role {
        WidgetRole::Checkbox => CHECKBOX_CLASS,
        WidgetRole::File => FILE_INPUT_CLASS,
        _ => TEXT_INPUT_CLASS,
    };

    let placeholder = match role {
        WidgetRole::Text | WidgetRole::Number | WidgetRole::Date => Some(label.clone()),
        _ => None,
    };

    Widget {
        role,
        class,
        placeholder,
        empty_label: (role == WidgetRole::Select)
            .then(|| format!("Select {}", label.to_lowercase())),
        accept: (field.kind == FieldKind::Image).then_some("image/*"),
        max_length: match field.kind {
            FieldKind::Text { max_length } => Some(max_length),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    fn widget(kind: EntityKind, name: &str) -> Widget {
        widget_for(kind.field(name).unwrap())
    }

    #[test]
    fn roles_follow_field_kinds() {
        assert_eq!(widget(EntityKind::Employee, "employee_id").role, WidgetRole::Number);
        assert_eq!(widget(EntityKind::Employee, "first_name").role, WidgetRole::Text);
        assert_eq!(widget(EntityKind::Employee, "date_of_birth").role, WidgetRole::Date);
        assert_eq!(widget(EntityKind::Employee, "cv").role, WidgetRole::File);
        assert_eq!(
            widget(EntityKind::Employee, "court_cases").role,
            WidgetRole::MultiSelect
        );
        assert_eq!(
            widget(EntityKind::EmploymentRecord, "employment_record_employee").role,
            WidgetRole::Select
        );
    }

    #[test]
    fn text_inputs_carry_placeholder_and_limit() {
        let first_name = widget(EntityKind::Employee, "first_name");
        assert_eq!(first_name.placeholder.as_deref(), Some("First name"));
        assert_eq!(first_name.max_length, Some(30));
        assert_eq!(first_name.class, TEXT_INPUT_CLASS);
    }

    #[test]
    fn selects_get_an_empty_label_instead_of_placeholder() {
        let employee = widget(EntityKind::EmploymentRecord, "employment_record_employee");
        assert_eq!(employee.placeholder, None);
        assert_eq!(
            employee.empty_label.as_deref(),
            Some("Select employment record employee")
        );

        let many = widget(EntityKind::Company, "directors");
        assert_eq!(many.empty_label, None);
    }

    #[test]
    fn images_accept_only_images() {
        let image = widget(EntityKind::Employee, "id_image");
        assert_eq!(image.accept, Some("image/*"));
        assert_eq!(image.class, FILE_INPUT_CLASS);
        assert_eq!(widget(EntityKind::Employee, "cv").accept, None);
    }
}
