//! Diesel table definitions for the records workspace.
//!
//! Many-to-many link tables are not declared here; `store::postgres` reads
//! and writes them by name from the entity link descriptors.

diesel::table! {
    employees (employee_id) {
        employee_id -> Int4,
        #[max_length = 30]
        first_name -> Varchar,
        #[max_length = 30]
        last_name -> Varchar,
        #[max_length = 30]
        address -> Varchar,
        #[max_length = 30]
        phone_number -> Varchar,
        #[max_length = 30]
        email -> Varchar,
        date_of_birth -> Date,
        #[max_length = 30]
        national_id -> Varchar,
        #[max_length = 100]
        id_image -> Nullable<Varchar>,
        #[max_length = 30]
        passport_number -> Varchar,
        date_of_employment -> Date,
        #[max_length = 30]
        position -> Varchar,
        #[max_length = 100]
        cv -> Nullable<Varchar>,
        #[max_length = 30]
        vehicle_registration_number -> Varchar,
    }
}

diesel::table! {
    next_of_kin (next_of_kin_id) {
        next_of_kin_id -> Int4,
        #[max_length = 30]
        next_of_kin_phone_number -> Varchar,
        #[max_length = 30]
        next_of_kin_email -> Varchar,
        #[max_length = 30]
        next_of_kin_address -> Varchar,
        #[max_length = 30]
        next_of_kin_relationship -> Varchar,
        next_of_kin_date_of_birth -> Date,
        #[max_length = 30]
        next_of_kin_occupation -> Varchar,
        #[max_length = 30]
        next_of_kin_id_number -> Varchar,
    }
}

diesel::table! {
    directors (director_id) {
        director_id -> Int4,
        #[max_length = 30]
        director_first_name -> Varchar,
        #[max_length = 30]
        director_last_name -> Varchar,
        #[max_length = 30]
        director_address -> Varchar,
        #[max_length = 30]
        director_phone_number -> Varchar,
        #[max_length = 30]
        director_email -> Varchar,
        director_date_of_birth -> Date,
        #[max_length = 30]
        director_national_id -> Varchar,
        #[max_length = 30]
        director_passport_number -> Varchar,
        #[max_length = 30]
        director_vehicle_registration_number -> Varchar,
    }
}

diesel::table! {
    companies (company_id) {
        company_id -> Int4,
        #[max_length = 30]
        company_name -> Varchar,
        #[max_length = 30]
        company_address -> Varchar,
        #[max_length = 30]
        company_phone_number -> Varchar,
        #[max_length = 30]
        company_email -> Varchar,
        company_date_of_incorporation -> Date,
        #[max_length = 30]
        company_registration_number -> Varchar,
    }
}

diesel::table! {
    court_cases (court_case_id) {
        court_case_id -> Int4,
        #[max_length = 30]
        court_case_number -> Varchar,
        #[max_length = 30]
        court_case_name -> Varchar,
        #[max_length = 30]
        court_case_type -> Varchar,
        court_case_date -> Date,
        #[max_length = 30]
        court_case_time -> Varchar,
        #[max_length = 30]
        court_case_location -> Varchar,
        #[max_length = 30]
        court_case_description -> Varchar,
        #[max_length = 30]
        court_case_parties -> Varchar,
        #[max_length = 30]
        court_case_judge -> Varchar,
    }
}

diesel::table! {
    customers (customer_id) {
        customer_id -> Int4,
        #[max_length = 30]
        customer_first_name -> Varchar,
        #[max_length = 30]
        customer_last_name -> Varchar,
        #[max_length = 30]
        customer_address -> Varchar,
        #[max_length = 30]
        customer_phone_number -> Varchar,
        #[max_length = 30]
        customer_email -> Varchar,
        customer_date_of_birth -> Date,
        #[max_length = 30]
        customer_national_id -> Varchar,
        #[max_length = 30]
        customer_passport_number -> Varchar,
        #[max_length = 30]
        customer_vehicle_registration_number -> Varchar,
    }
}

diesel::table! {
    criminal_records (criminal_record_id) {
        criminal_record_id -> Int4,
        #[max_length = 30]
        criminal_record_description -> Varchar,
        criminal_record_date -> Date,
        #[max_length = 30]
        criminal_record_time -> Varchar,
        #[max_length = 30]
        criminal_record_location -> Varchar,
        #[max_length = 30]
        criminal_record_type -> Varchar,
        criminal_record_court_case_id -> Nullable<Int4>,
    }
}

diesel::table! {
    previous_transactions (previous_transaction_id) {
        previous_transaction_id -> Int4,
        previous_transaction_date -> Date,
        #[max_length = 30]
        previous_transaction_time -> Varchar,
        #[max_length = 30]
        previous_transaction_amount -> Varchar,
        #[max_length = 30]
        previous_transaction_description -> Varchar,
    }
}

diesel::table! {
    employment_records (employment_record_id) {
        employment_record_id -> Int4,
        employment_record_date -> Date,
        #[max_length = 30]
        employment_record_time -> Varchar,
        #[max_length = 30]
        employment_record_description -> Varchar,
        employment_record_employee_id -> Int4,
    }
}

diesel::joinable!(criminal_records -> court_cases (criminal_record_court_case_id));
diesel::joinable!(employment_records -> employees (employment_record_employee_id));

diesel::allow_tables_to_appear_in_same_query!(
    companies,
    court_cases,
    criminal_records,
    customers,
    directors,
    employees,
    employment_records,
    next_of_kin,
    previous_transactions,
);
