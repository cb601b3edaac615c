//! Field lists and default orderings for every kind.

use super::{
    Direction, EntityKind, FieldKind, FieldSpec, Link, SortKey, TEXT_MAX_LENGTH,
};

const fn id(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Integer,
        required: true,
        help_text: None,
    }
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text {
            max_length: TEXT_MAX_LENGTH,
        },
        required: true,
        help_text: None,
    }
}

const fn optional_text(name: &'static str) -> FieldSpec {
    FieldSpec {
        required: false,
        ..text(name)
    }
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Date,
        required: true,
        help_text: None,
    }
}

const fn attachment(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: false,
        help_text: None,
    }
}

const fn many(name: &'static str, link: Link, help_text: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::ManyToMany(link),
        required: false,
        help_text: Some(help_text),
    }
}

const fn link(
    target: EntityKind,
    table: &'static str,
    owner_column: &'static str,
    target_column: &'static str,
) -> Link {
    Link {
        target,
        table,
        owner_column,
        target_column,
    }
}

const fn asc(field: &'static str) -> SortKey {
    SortKey {
        field,
        direction: Direction::Asc,
    }
}

const fn desc(field: &'static str) -> SortKey {
    SortKey {
        field,
        direction: Direction::Desc,
    }
}

static EMPLOYEE: [FieldSpec; 16] = [
    id("employee_id"),
    text("first_name"),
    text("last_name"),
    text("address"),
    text("phone_number"),
    text("email"),
    date("date_of_birth"),
    text("national_id"),
    attachment("id_image", FieldKind::Image),
    optional_text("passport_number"),
    date("date_of_employment"),
    text("position"),
    many(
        "court_cases",
        link(EntityKind::CourtCases, "employee_court_cases", "employee_id", "court_case_id"),
        "Select any court cases that are relevant to this employee.",
    ),
    many(
        "criminal_records",
        link(
            EntityKind::CriminalRecord,
            "employee_criminal_records",
            "employee_id",
            "criminal_record_id",
        ),
        "Link any criminal records associated with this employee.",
    ),
    attachment("cv", FieldKind::File),
    optional_text("vehicle_registration_number"),
];

static NEXT_OF_KIN: [FieldSpec; 8] = [
    id("next_of_kin_id"),
    text("next_of_kin_phone_number"),
    text("next_of_kin_email"),
    text("next_of_kin_address"),
    text("next_of_kin_relationship"),
    date("next_of_kin_date_of_birth"),
    text("next_of_kin_occupation"),
    text("next_of_kin_id_number"),
];

static DIRECTOR: [FieldSpec; 10] = [
    id("director_id"),
    text("director_first_name"),
    text("director_last_name"),
    text("director_address"),
    text("director_phone_number"),
    text("director_email"),
    date("director_date_of_birth"),
    text("director_national_id"),
    optional_text("director_passport_number"),
    optional_text("director_vehicle_registration_number"),
];

static COMPANY: [FieldSpec; 11] = [
    id("company_id"),
    text("company_name"),
    text("company_address"),
    text("company_phone_number"),
    text("company_email"),
    date("company_date_of_incorporation"),
    text("company_registration_number"),
    many(
        "directors",
        link(EntityKind::Director, "company_directors", "company_id", "director_id"),
        "Associate directors responsible for this company.",
    ),
    many(
        "employees",
        link(EntityKind::Employee, "company_employees", "company_id", "employee_id"),
        "Attach employees working for this company.",
    ),
    many(
        "next_of_kin",
        link(EntityKind::NextOfKin, "company_next_of_kin", "company_id", "next_of_kin_id"),
        "Reference next of kin contacts for company stakeholders.",
    ),
    many(
        "court_cases",
        link(EntityKind::CourtCases, "company_court_cases", "company_id", "court_case_id"),
        "Log relevant court cases for this company.",
    ),
];

static COURT_CASES: [FieldSpec; 10] = [
    id("court_case_id"),
    text("court_case_number"),
    text("court_case_name"),
    text("court_case_type"),
    date("court_case_date"),
    text("court_case_time"),
    text("court_case_location"),
    text("court_case_description"),
    text("court_case_parties"),
    text("court_case_judge"),
];

static CUSTOMER: [FieldSpec; 13] = [
    id("customer_id"),
    text("customer_first_name"),
    text("customer_last_name"),
    text("customer_address"),
    text("customer_phone_number"),
    text("customer_email"),
    date("customer_date_of_birth"),
    text("customer_national_id"),
    optional_text("customer_passport_number"),
    optional_text("customer_vehicle_registration_number"),
    many(
        "criminal_records",
        link(
            EntityKind::CriminalRecord,
            "customer_criminal_records",
            "customer_id",
            "criminal_record_id",
        ),
        "Link background screening findings to this customer.",
    ),
    many(
        "previous_transactions",
        link(
            EntityKind::PrevTransactions,
            "customer_previous_transactions",
            "customer_id",
            "previous_transaction_id",
        ),
        "Associate historical transactions for this customer.",
    ),
    many(
        "court_cases",
        link(EntityKind::CourtCases, "customer_court_cases", "customer_id", "court_case_id"),
        "Attach any court cases involving this customer.",
    ),
];

static CRIMINAL_RECORD: [FieldSpec; 7] = [
    id("criminal_record_id"),
    text("criminal_record_description"),
    date("criminal_record_date"),
    text("criminal_record_time"),
    text("criminal_record_location"),
    text("criminal_record_type"),
    FieldSpec {
        name: "criminal_record_court_case",
        kind: FieldKind::ForeignKey(EntityKind::CourtCases),
        required: false,
        help_text: Some("Optional reference to the court case linked to this record."),
    },
];

static PREV_TRANSACTIONS: [FieldSpec; 5] = [
    id("previous_transaction_id"),
    date("previous_transaction_date"),
    text("previous_transaction_time"),
    text("previous_transaction_amount"),
    text("previous_transaction_description"),
];

static EMPLOYMENT_RECORD: [FieldSpec; 5] = [
    id("employment_record_id"),
    date("employment_record_date"),
    text("employment_record_time"),
    text("employment_record_description"),
    FieldSpec {
        name: "employment_record_employee",
        kind: FieldKind::ForeignKey(EntityKind::Employee),
        required: true,
        help_text: None,
    },
];

pub(super) fn fields(kind: EntityKind) -> &'static [FieldSpec] {
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

pub(super) fn ordering(kind: EntityKind) -> &'static [SortKey] {
    static EMPLOYEE_ORDER: [SortKey; 2] = [asc("last_name"), asc("first_name")];
    static NEXT_OF_KIN_ORDER: [SortKey; 2] =
        [asc("next_of_kin_relationship"), asc("next_of_kin_id_number")];
    static DIRECTOR_ORDER: [SortKey; 2] =
        [asc("director_last_name"), asc("director_first_name")];
    static COMPANY_ORDER: [SortKey; 1] = [asc("company_name")];
    static COURT_CASES_ORDER: [SortKey; 2] =
        [desc("court_case_date"), asc("court_case_number")];
    static CUSTOMER_ORDER: [SortKey; 2] =
        [asc("customer_last_name"), asc("customer_first_name")];
    static CRIMINAL_RECORD_ORDER: [SortKey; 2] =
        [desc("criminal_record_date"), asc("criminal_record_id")];
    static PREV_TRANSACTIONS_ORDER: [SortKey; 2] =
        [desc("previous_transaction_date"), asc("previous_transaction_id")];
    static EMPLOYMENT_RECORD_ORDER: [SortKey; 2] =
        [desc("employment_record_date"), asc("employment_record_id")];

    match kind {
        EntityKind::Employee => &EMPLOYEE_ORDER,
        EntityKind::NextOfKin => &NEXT_OF_KIN_ORDER,
        EntityKind::Company => &COMPANY_ORDER,
        EntityKind::Director => &DIRECTOR_ORDER,
        EntityKind::CourtCases => &COURT_CASES_ORDER,
        EntityKind::CriminalRecord => &CRIMINAL_RECORD_ORDER,
        EntityKind::PrevTransactions => &PREV_TRANSACTIONS_ORDER,
        EntityKind::EmploymentRecord => &EMPLOYMENT_RECORD_ORDER,
        EntityKind::Customer => &CUSTOMER_ORDER,
    }
}
