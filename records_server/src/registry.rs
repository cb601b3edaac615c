//! Metadata registry: display and UX configuration per entity kind.
//!
//! The table is static and indexed by [`EntityKind`] through an exhaustive
//! match, so a kind without an entry does not compile.

use crate::entity::{EntityKind, FieldSpec};

/// One table column on a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct PageConfig {
    pub entity: EntityKind,
    pub title: &'static str,
    pub description: &'static str,
    pub success_message: &'static str,
    pub submit_label: &'static str,
    pub cta: &'static str,
    pub icon: &'static str,
    pub url_name: &'static str,
    pub list_url_name: &'static str,
    pub list_label: &'static str,
    pub empty_message: &'static str,
    columns: Option<&'static [Column]>,
}

const fn column(field: &'static str, label: &'static str) -> Column {
    Column { field, label }
}

/// Columns used when an entry does not configure its own.
const DEFAULT_COLUMN_COUNT: usize = 5;

impl PageConfig {
    /// Configured columns, or the first five schema fields labelled from
    /// their names.
    pub fn columns(&self) -> Vec<(&'static FieldSpec, String)> {
        match self.columns {
            Some(columns) => columns
                .iter()
                .filter_map(|column| {
                    self.entity
                        .field(column.field)
                        .map(|field| (field, column.label.to_string()))
                })
                .collect(),
            None => self
                .entity
                .fields()
                .iter()
                .take(DEFAULT_COLUMN_COUNT)
                .map(|field| (field, field.label()))
                .collect(),
        }
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        self.entity.fields()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{entity}: column '{field}' is not a field of the entity")]
    UnknownColumn {
        entity: EntityKind,
        field: &'static str,
    },
    #[error("{entity}: route name '{name}' does not resolve")]
    UnknownRoute {
        entity: EntityKind,
        name: &'static str,
    },
    #[error("{entity}: registry entry is filed under {found}")]
    Mismatched {
        entity: EntityKind,
        found: EntityKind,
    },
}

/// Look up the registry entry for a kind.
pub fn page_config(kind: EntityKind) -> &'static PageConfig {
    match kind {
        EntityKind::Employee => &EMPLOYEE,
        EntityKind::NextOfKin => &NEXT_OF_KIN,
        EntityKind::Company => &COMPANY,
        EntityKind::Director => &DIRECTOR,
        EntityKind::CourtCases => &COURT_CASES,
        EntityKind::CriminalRecord => &CRIMINAL_RECORD,
        EntityKind::PrevTransactions => &PREV_TRANSACTIONS,
        EntityKind::EmploymentRecord => &EMPLOYMENT_RECORD,
        EntityKind::Customer => &CUSTOMER,
    }
}

/// Check every entry against the schema and the route table.
///
/// Run once at startup; a failure is a deployment defect.
pub fn validate() -> Result<(), RegistryError> {
    for kind in EntityKind::ALL {
        let config = page_config(kind);
        if config.entity != kind {
            return Err(RegistryError::Mismatched {
                entity: kind,
                found: config.entity,
            });
        }
        for column in config.columns.unwrap_or_default() {
            if kind.field(column.field).is_none() {
                return Err(RegistryError::UnknownColumn {
                    entity: kind,
                    field: column.field,
                });
            }
        }
        for name in [config.url_name, config.list_url_name] {
            if crate::routes::reverse(name).is_none() {
                return Err(RegistryError::UnknownRoute { entity: kind, name });
            }
        }
    }
    Ok(())
}

static EMPLOYEE: PageConfig = PageConfig {
    entity: EntityKind::Employee,
    title: "Employee Profile",
    description: "Capture detailed employee demographics, compliance checks, and onboarding details in a single, auditable record.",
    success_message: "Employee profile saved successfully.",
    submit_label: "Save employee profile",
    cta: "Create employee record",
    icon: "👤",
    url_name: "employee",
    list_url_name: "employee_list",
    list_label: "View employees",
    empty_message: "No employee profiles have been captured yet.",
    columns: Some(&[
        column("employee_id", "ID"),
        column("first_name", "First name"),
        column("last_name", "Last name"),
        column("position", "Position"),
        column("date_of_employment", "Employed since"),
        column("court_cases", "Court cases"),
        column("criminal_records", "Criminal records"),
    ]),
};

static NEXT_OF_KIN: PageConfig = PageConfig {
    entity: EntityKind::NextOfKin,
    title: "Next of Kin",
    description: "Register trusted contacts for employees or directors so you can respond quickly in critical situations.",
    success_message: "Next of kin information saved successfully.",
    submit_label: "Save next of kin details",
    cta: "Add next of kin record",
    icon: "👪",
    url_name: "next_of_kin",
    list_url_name: "next_of_kin_list",
    list_label: "View next of kin",
    empty_message: "No next of kin contacts have been registered yet.",
    columns: Some(&[
        column("next_of_kin_id", "ID"),
        column("next_of_kin_relationship", "Relationship"),
        column("next_of_kin_phone_number", "Phone"),
        column("next_of_kin_email", "Email"),
        column("next_of_kin_occupation", "Occupation"),
    ]),
};

static COMPANY: PageConfig = PageConfig {
    entity: EntityKind::Company,
    title: "Company Details",
    description: "Maintain an up-to-date company registry complete with governance relationships and compliance artefacts.",
    success_message: "Company record saved successfully.",
    submit_label: "Save company profile",
    cta: "Add company record",
    icon: "🏢",
    url_name: "company",
    list_url_name: "company_list",
    list_label: "View companies",
    empty_message: "No companies have been registered yet.",
    columns: Some(&[
        column("company_id", "ID"),
        column("company_name", "Name"),
        column("company_registration_number", "Registration no."),
        column("company_date_of_incorporation", "Incorporated"),
        column("directors", "Directors"),
        column("employees", "Employees"),
        column("court_cases", "Court cases"),
    ]),
};

static DIRECTOR: PageConfig = PageConfig {
    entity: EntityKind::Director,
    title: "Director Profile",
    description: "Keep track of director identity information, credentials, and governance responsibilities.",
    success_message: "Director details saved successfully.",
    submit_label: "Save director details",
    cta: "Register director",
    icon: "🧑‍💼",
    url_name: "director",
    list_url_name: "director_list",
    list_label: "View directors",
    empty_message: "No directors have been registered yet.",
    columns: Some(&[
        column("director_id", "ID"),
        column("director_first_name", "First name"),
        column("director_last_name", "Last name"),
        column("director_national_id", "National ID"),
        column("director_email", "Email"),
        column("director_phone_number", "Phone"),
    ]),
};

static COURT_CASES: PageConfig = PageConfig {
    entity: EntityKind::CourtCases,
    title: "Court Case",
    description: "Document ongoing or historical court cases that influence risk scoring and due diligence.",
    success_message: "Court case saved successfully.",
    submit_label: "Save court case information",
    cta: "Log court case",
    icon: "⚖️",
    url_name: "court_cases",
    list_url_name: "court_cases_list",
    list_label: "View court cases",
    empty_message: "No court cases have been logged yet.",
    columns: Some(&[
        column("court_case_id", "ID"),
        column("court_case_number", "Case number"),
        column("court_case_name", "Name"),
        column("court_case_type", "Type"),
        column("court_case_date", "Date"),
        column("court_case_judge", "Judge"),
    ]),
};

static CRIMINAL_RECORD: PageConfig = PageConfig {
    entity: EntityKind::CriminalRecord,
    title: "Criminal Record",
    description: "Track criminal record findings surfaced during background screening and compliance checks.",
    success_message: "Criminal record saved successfully.",
    submit_label: "Save criminal record",
    cta: "Add criminal record",
    icon: "🛡️",
    url_name: "criminal_record",
    list_url_name: "criminal_record_list",
    list_label: "View criminal records",
    empty_message: "No criminal records have been captured yet.",
    columns: Some(&[
        column("criminal_record_id", "ID"),
        column("criminal_record_type", "Type"),
        column("criminal_record_date", "Date"),
        column("criminal_record_location", "Location"),
        column("criminal_record_court_case", "Court case"),
    ]),
};

static PREV_TRANSACTIONS: PageConfig = PageConfig {
    entity: EntityKind::PrevTransactions,
    title: "Previous Transaction",
    description: "Record historical transactions to inform enhanced due diligence and monitoring activities.",
    success_message: "Previous transaction saved successfully.",
    submit_label: "Save transaction history",
    cta: "Log transaction",
    icon: "💳",
    url_name: "prev_transactions",
    list_url_name: "prev_transactions_list",
    list_label: "View transactions",
    empty_message: "No previous transactions have been logged yet.",
    columns: None,
};

static EMPLOYMENT_RECORD: PageConfig = PageConfig {
    entity: EntityKind::EmploymentRecord,
    title: "Employment Record",
    description: "Maintain a chronological employment history to evidence role changes and performance checkpoints.",
    success_message: "Employment record saved successfully.",
    submit_label: "Save employment record",
    cta: "Add employment record",
    icon: "📁",
    url_name: "employment_record",
    list_url_name: "employment_record_list",
    list_label: "View employment history",
    empty_message: "No employment records have been added yet.",
    columns: Some(&[
        column("employment_record_id", "ID"),
        column("employment_record_employee", "Employee"),
        column("employment_record_date", "Date"),
        column("employment_record_description", "Description"),
    ]),
};

static CUSTOMER: PageConfig = PageConfig {
    entity: EntityKind::Customer,
    title: "Customer Profile",
    description: "Collect KYC information, linked transactions, and compliance indicators for each customer.",
    success_message: "Customer profile saved successfully.",
    submit_label: "Save customer profile",
    cta: "Create customer profile",
    icon: "🙍",
    url_name: "customer",
    list_url_name: "customer_list",
    list_label: "View customers",
    empty_message: "No customer profiles have been created yet.",
    columns: Some(&[
        column("customer_id", "ID"),
        column("customer_first_name", "First name"),
        column("customer_last_name", "Last name"),
        column("customer_national_id", "National ID"),
        column("criminal_records", "Criminal records"),
        column("previous_transactions", "Transactions"),
        column("court_cases", "Court cases"),
    ]),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        validate().unwrap();
    }

    #[test]
    fn configured_columns_keep_their_order() {
        let labels: Vec<_> = page_config(EntityKind::Employee)
            .columns()
            .into_iter()
            .map(|(_, label)| label)
            .collect();
        assert_eq!(
            labels,
            [
                "ID",
                "First name",
                "Last name",
                "Position",
                "Employed since",
                "Court cases",
                "Criminal records"
            ]
        );
    }

    #[test]
    fn unset_columns_fall_back_to_first_five_fields() {
        let columns = page_config(EntityKind::PrevTransactions).columns();
        let names: Vec<_> = columns.iter().map(|(field, _)| field.name).collect();
        assert_eq!(
            names,
            EntityKind::PrevTransactions.fields()[..5]
                .iter()
                .map(|f| f.name)
                .collect::<Vec<_>>()
        );
        assert_eq!(columns[0].1, "Previous transaction id");
    }
}
