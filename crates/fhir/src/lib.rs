//! ODS FHIR wire/boundary support for the directory gateway.
//!
//! This crate provides **wire models** and **parsing helpers** for the NHS ODS FHIR STU3 API:
//! - `Organization` resources and search `Bundle`s
//! - the generic URL-keyed `Extension` list those resources carry
//!
//! This crate focuses on:
//! - serialisation/deserialisation of upstream JSON
//! - tolerant reading of optional and single-or-array fields
//! - small typed accessors (dates, timestamps) over the raw strings
//!
//! Interpreting extensions (which URL means what) belongs to the mapper in `ods-core`.

pub mod datatypes;
pub mod organization;

pub use datatypes::{
    parse_fhir_date, Address, CodeableConcept, Coding, Extension, Identifier, Meta, Period,
};
pub use organization::{OrganizationBundle, OrganizationEntry, OrganizationResource};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
