//! Declarative schema for the nine record kinds.
//!
//! Forms, widgets, storage and the list view all read these descriptors;
//! nothing downstream inspects a value to learn what kind of field it is.

mod catalog;
mod display;

use std::fmt;

use serde::Serialize;

pub use display::display;

/// Upper bound for every short text column.
pub const TEXT_MAX_LENGTH: usize = 30;
/// Upper bound for stored attachment names (relative path included).
pub const ATTACHMENT_MAX_LENGTH: usize = 100;

/// The closed set of record kinds, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    NextOfKin,
    Company,
    Director,
    CourtCases,
    CriminalRecord,
    PrevTransactions,
    EmploymentRecord,
    Customer,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Employee,
        EntityKind::NextOfKin,
        EntityKind::Company,
        EntityKind::Director,
        EntityKind::CourtCases,
        EntityKind::CriminalRecord,
        EntityKind::PrevTransactions,
        EntityKind::EmploymentRecord,
        EntityKind::Customer,
    ];

    /// Stable key used in route names, metrics labels and JSON.
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Employee => "employee",
            EntityKind::NextOfKin => "next_of_kin",
            EntityKind::Company => "company",
            EntityKind::Director => "director",
            EntityKind::CourtCases => "court_cases",
            EntityKind::CriminalRecord => "criminal_record",
            EntityKind::PrevTransactions => "prev_transactions",
            EntityKind::EmploymentRecord => "employment_record",
            EntityKind::Customer => "customer",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// Human-readable singular name, used in uniqueness messages.
    pub fn verbose_name(self) -> &'static str {
        match self {
            EntityKind::Employee => "Employee",
            EntityKind::NextOfKin => "Next of kin",
            EntityKind::Company => "Company",
            EntityKind::Director => "Director",
            EntityKind::CourtCases => "Court cases",
            EntityKind::CriminalRecord => "Criminal record",
            EntityKind::PrevTransactions => "Previous transactions",
            EntityKind::EmploymentRecord => "Employment record",
            EntityKind::Customer => "Customer",
        }
    }

    /// Backing table in the Postgres store.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Employee => "employees",
            EntityKind::NextOfKin => "next_of_kin",
            EntityKind::Company => "companies",
            EntityKind::Director => "directors",
            EntityKind::CourtCases => "court_cases",
            EntityKind::CriminalRecord => "criminal_records",
            EntityKind::PrevTransactions => "previous_transactions",
            EntityKind::EmploymentRecord => "employment_records",
            EntityKind::Customer => "customers",
        }
    }

    pub fn create_path(self) -> &'static str {
        match self {
            EntityKind::Employee => "/employee/",
            EntityKind::NextOfKin => "/next-of-kin/",
            EntityKind::Company => "/company/",
            EntityKind::Director => "/director/",
            EntityKind::CourtCases => "/court-cases/",
            EntityKind::CriminalRecord => "/criminal-record/",
            EntityKind::PrevTransactions => "/prev-transactions/",
            EntityKind::EmploymentRecord => "/employment-record/",
            EntityKind::Customer => "/customer/",
        }
    }

    pub fn list_path(self) -> &'static str {
        match self {
            EntityKind::Employee => "/employee/records/",
            EntityKind::NextOfKin => "/next-of-kin/records/",
            EntityKind::Company => "/company/records/",
            EntityKind::Director => "/director/records/",
            EntityKind::CourtCases => "/court-cases/records/",
            EntityKind::CriminalRecord => "/criminal-record/records/",
            EntityKind::PrevTransactions => "/prev-transactions/records/",
            EntityKind::EmploymentRecord => "/employment-record/records/",
            EntityKind::Customer => "/customer/records/",
        }
    }

    /// Ordered field descriptors. The first entry is always the primary key.
    pub fn fields(self) -> &'static [FieldSpec] {
        catalog::fields(self)
    }

    pub fn primary_key(self) -> &'static FieldSpec {
        &self.fields()[0]
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Default list ordering.
    pub fn ordering(self) -> &'static [SortKey] {
        catalog::ordering(self)
    }

    /// Whether the form needs a multipart encoding.
    pub fn accepts_uploads(self) -> bool {
        self.fields().iter().any(|field| field.kind.is_attachment())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One declared attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help_text: Option<&'static str>,
}

impl FieldSpec {
    /// Display label derived from the field name (`employee_id` -> "Employee id").
    pub fn label(&self) -> String {
        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Target kind for foreign keys and many-to-many links.
    pub fn relation_target(&self) -> Option<EntityKind> {
        match self.kind {
            FieldKind::ForeignKey(target) => Some(target),
            FieldKind::ManyToMany(link) => Some(link.target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text { max_length: usize },
    Date,
    Boolean,
    Image,
    File,
    ForeignKey(EntityKind),
    ManyToMany(Link),
}

impl FieldKind {
    pub fn is_attachment(&self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::File)
    }

    pub fn is_many(&self) -> bool {
        matches!(self, FieldKind::ManyToMany(_))
    }
}

/// Join table backing a many-to-many field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub target: EntityKind,
    pub table: &'static str,
    pub owner_column: &'static str,
    pub target_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(EntityKind::from_key("employees"), None);
    }

    #[test]
    fn primary_key_is_a_required_integer() {
        for kind in EntityKind::ALL {
            let pk = kind.primary_key();
            assert_eq!(pk.kind, FieldKind::Integer, "{kind}");
            assert!(pk.required, "{kind}");
            assert!(pk.name.ends_with("_id"), "{kind}");
        }
    }

    #[test]
    fn ordering_names_declared_fields() {
        for kind in EntityKind::ALL {
            for key in kind.ordering() {
                assert!(kind.field(key.field).is_some(), "{kind}: {}", key.field);
            }
        }
    }

    #[test]
    fn field_names_are_unique_per_kind() {
        for kind in EntityKind::ALL {
            let mut names: Vec<_> = kind.fields().iter().map(|f| f.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), kind.fields().len(), "{kind}");
        }
    }

    #[test]
    fn labels_are_humanized() {
        let field = EntityKind::CriminalRecord
            .field("criminal_record_court_case")
            .unwrap();
        assert_eq!(field.label(), "Criminal record court case");
        assert_eq!(EntityKind::Employee.primary_key().label(), "Employee id");
    }

    #[test]
    fn only_employee_takes_uploads() {
        let with_uploads: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|kind| kind.accepts_uploads())
            .collect();
        assert_eq!(with_uploads, vec![EntityKind::Employee]);
    }

    #[test]
    fn paths_are_distinct() {
        let mut paths: Vec<_> = EntityKind::ALL
            .into_iter()
            .flat_map(|kind| [kind.create_path(), kind.list_path()])
            .collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), EntityKind::ALL.len() * 2);
    }
}
