//! The resource catalogue: one schema per administrative screen.
//!
//! Numeric strictness differs between resources (credits accept `0`,
//! durations start at `1`). That is kept as configured here rather than
//! unified.

use serde::{Deserialize, Serialize};

use super::{
    AssetSpec, AssetUrlConvention, DOCUMENT_TYPES, FieldSpec, IMAGE_TYPES, MAX_ASSET_BYTES,
    PairRule, ResourceSchema,
};
use crate::api::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    LabCategories,
    Organisations,
    Departments,
    Programs,
    AcademicBodies,
    Users,
    Patents,
}

const USER_ROLES: &[&str] = &["admin", "faculty", "staff", "student"];

const BODY_TYPES: &[&str] = &[
    "Board of Studies",
    "Academic Council",
    "Governing Body",
    "Finance Committee",
];

const PATENT_STATUSES: &[&str] = &["Filed", "Published", "Granted", "Rejected"];

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::LabCategories,
        ResourceKind::Organisations,
        ResourceKind::Departments,
        ResourceKind::Programs,
        ResourceKind::AcademicBodies,
        ResourceKind::Users,
        ResourceKind::Patents,
    ];

    pub fn slug(self) -> &'static str {
        self.endpoint().resource
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::LabCategories => "Lab Categories",
            ResourceKind::Organisations => "Organisation Details",
            ResourceKind::Departments => "Departments",
            ResourceKind::Programs => "Programs",
            ResourceKind::AcademicBodies => "Academic Bodies",
            ResourceKind::Users => "Users",
            ResourceKind::Patents => "Patents & Innovation",
        }
    }

    pub fn endpoint(self) -> Endpoint {
        match self {
            ResourceKind::LabCategories => Endpoint::new("masters", "lab-categories"),
            ResourceKind::Organisations => Endpoint::new("masters", "organisations"),
            ResourceKind::Departments => Endpoint::new("masters", "departments"),
            ResourceKind::Programs => Endpoint::new("academics", "programs"),
            ResourceKind::AcademicBodies => Endpoint::new("academics", "academic-bodies"),
            ResourceKind::Users => Endpoint::new("users", "users"),
            ResourceKind::Patents => Endpoint::new("research", "patents"),
        }
    }

    pub fn schema(self) -> ResourceSchema {
        match self {
            ResourceKind::LabCategories => lab_categories(),
            ResourceKind::Organisations => organisations(),
            ResourceKind::Departments => departments(),
            ResourceKind::Programs => programs(),
            ResourceKind::AcademicBodies => academic_bodies(),
            ResourceKind::Users => users(),
            ResourceKind::Patents => patents(),
        }
    }
}

fn description() -> FieldSpec {
    FieldSpec::long_text("description", "Description").max_len(500)
}

fn lab_categories() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::LabCategories,
        singular: "Lab category",
        plural: "lab categories",
        endpoint: ResourceKind::LabCategories.endpoint(),
        fields: vec![
            FieldSpec::text("category_name", "Category name")
                .required()
                .length(2, 50),
            description(),
            FieldSpec::boolean("is_active", "Active").checked(),
        ],
        pairs: vec![],
        columns: vec!["category_name", "description", "is_active"],
        asset: None,
    }
}

fn organisations() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::Organisations,
        singular: "Organisation",
        plural: "organisations",
        endpoint: ResourceKind::Organisations.endpoint(),
        fields: vec![
            FieldSpec::text("organisation_name", "Organisation name")
                .required()
                .length(2, 100),
            FieldSpec::text("acronym", "Acronym").required().length(2, 10),
            FieldSpec::email("email", "Email").required(),
            FieldSpec::text("phone", "Phone").max_len(20),
            FieldSpec::text("website", "Website").max_len(200),
            FieldSpec::long_text("address", "Address").max_len(500),
            FieldSpec::integer("established_year", "Established year").range(1800, 2100),
            FieldSpec::long_text("mission", "Mission").required().min_len(10),
            FieldSpec::long_text("vision", "Vision").required().min_len(10),
        ],
        pairs: vec![],
        columns: vec!["organisation_name", "acronym", "email", "established_year"],
        asset: Some(AssetSpec {
            field: "logo",
            delete_flag: "delete_logo",
            label: "Logo",
            accept: IMAGE_TYPES,
            max_bytes: MAX_ASSET_BYTES,
            convention: AssetUrlConvention::LogoDirectory,
        }),
    }
}

fn departments() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::Departments,
        singular: "Department",
        plural: "departments",
        endpoint: ResourceKind::Departments.endpoint(),
        fields: vec![
            FieldSpec::text("department_name", "Department name")
                .required()
                .length(2, 100),
            FieldSpec::text("department_code", "Department code")
                .required()
                .length(2, 10),
            FieldSpec::integer("organisation_id", "Organisation ID")
                .required()
                .at_least(1),
            FieldSpec::text("hod_name", "Head of department").max_len(50),
            FieldSpec::email("email", "Email"),
            FieldSpec::boolean("is_active", "Active").checked(),
        ],
        pairs: vec![],
        columns: vec!["department_name", "department_code", "hod_name", "is_active"],
        asset: None,
    }
}

fn programs() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::Programs,
        singular: "Program",
        plural: "programs",
        endpoint: ResourceKind::Programs.endpoint(),
        fields: vec![
            FieldSpec::text("program_title", "Program title")
                .required()
                .length(3, 100),
            FieldSpec::text("acronym", "Acronym").required().length(2, 10),
            FieldSpec::integer("organisation_id", "Organisation ID")
                .required()
                .at_least(1),
            FieldSpec::integer("program_min_duration", "Minimum duration")
                .required()
                .at_least(1),
            FieldSpec::integer("program_max_duration", "Maximum duration")
                .required()
                .at_least(1),
            FieldSpec::integer("term_min_duration", "Minimum term duration")
                .required()
                .at_least(1),
            FieldSpec::integer("term_max_duration", "Maximum term duration")
                .required()
                .at_least(1),
            FieldSpec::integer("term_min_credits", "Minimum term credits")
                .required()
                .at_least(0),
            FieldSpec::integer("term_max_credits", "Maximum term credits")
                .required()
                .at_least(0),
            FieldSpec::comma_list("specializations", "Specializations").required(),
            FieldSpec::comma_list("course_types", "Course types").required(),
            description(),
        ],
        pairs: vec![
            PairRule {
                min_field: "program_min_duration",
                max_field: "program_max_duration",
                message: "Maximum duration must be greater than or equal to minimum duration",
            },
            PairRule {
                min_field: "term_min_duration",
                max_field: "term_max_duration",
                message: "Maximum term duration must be greater than or equal to minimum term duration",
            },
            PairRule {
                min_field: "term_min_credits",
                max_field: "term_max_credits",
                message: "Maximum term credits must be greater than or equal to minimum term credits",
            },
        ],
        columns: vec![
            "program_title",
            "acronym",
            "program_min_duration",
            "program_max_duration",
            "specializations",
        ],
        asset: None,
    }
}

fn academic_bodies() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::AcademicBodies,
        singular: "Academic body",
        plural: "academic bodies",
        endpoint: ResourceKind::AcademicBodies.endpoint(),
        fields: vec![
            FieldSpec::text("body_name", "Body name").required().length(2, 100),
            FieldSpec::text("acronym", "Acronym").required().length(2, 10),
            FieldSpec::select("body_type", "Body type", BODY_TYPES).required(),
            FieldSpec::integer("constituted_year", "Constituted year").range(1900, 2100),
            FieldSpec::comma_list("members", "Members"),
            description(),
        ],
        pairs: vec![],
        columns: vec!["body_name", "acronym", "body_type", "constituted_year"],
        asset: Some(AssetSpec {
            field: "document",
            delete_flag: "delete_document",
            label: "Constitution document",
            accept: DOCUMENT_TYPES,
            max_bytes: MAX_ASSET_BYTES,
            convention: AssetUrlConvention::Uploads,
        }),
    }
}

fn users() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::Users,
        singular: "User",
        plural: "users",
        endpoint: ResourceKind::Users.endpoint(),
        fields: vec![
            FieldSpec::text("full_name", "Full name").required().length(2, 50),
            FieldSpec::email("email", "Email").required().unique(),
            FieldSpec::select("role", "Role", USER_ROLES).required(),
            FieldSpec::text("phone", "Phone").max_len(15),
            FieldSpec::boolean("is_active", "Active").checked(),
        ],
        pairs: vec![],
        columns: vec!["full_name", "email", "role", "is_active"],
        asset: None,
    }
}

fn patents() -> ResourceSchema {
    ResourceSchema {
        kind: ResourceKind::Patents,
        singular: "Patent",
        plural: "patents",
        endpoint: ResourceKind::Patents.endpoint(),
        fields: vec![
            FieldSpec::text("patent_title", "Patent title")
                .required()
                .length(3, 200),
            FieldSpec::text("application_number", "Application number")
                .required()
                .length(2, 50),
            FieldSpec::comma_list("inventors", "Inventors").required(),
            FieldSpec::select("status", "Status", PATENT_STATUSES).required(),
            FieldSpec::integer("filing_year", "Filing year")
                .required()
                .range(1900, 2100),
            FieldSpec::integer("grant_year", "Grant year").range(1900, 2100),
            description(),
        ],
        pairs: vec![PairRule {
            min_field: "filing_year",
            max_field: "grant_year",
            message: "Grant year must not be earlier than filing year",
        }],
        columns: vec![
            "patent_title",
            "application_number",
            "status",
            "filing_year",
        ],
        asset: Some(AssetSpec {
            field: "document",
            delete_flag: "delete_document",
            label: "Patent document",
            accept: DOCUMENT_TYPES,
            max_bytes: MAX_ASSET_BYTES,
            convention: AssetUrlConvention::Uploads,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_is_self_consistent() {
        for kind in ResourceKind::ALL {
            let schema = kind.schema();
            assert_eq!(schema.kind, kind);
            for column in &schema.columns {
                assert!(schema.field(column).is_some(), "{kind:?}: unknown column {column}");
            }
            for pair in &schema.pairs {
                assert!(schema.field(pair.min_field).is_some());
                assert!(schema.field(pair.max_field).is_some());
            }
        }
    }

    #[test]
    fn slugs_are_distinct() {
        let mut slugs: Vec<_> = ResourceKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), ResourceKind::ALL.len());
    }
}
