//! Domain logic for the registration service.
//!
//! Everything here is pure and synchronous: the age calculator, the
//! field validators, the registrant record and the form state machine
//! that gates submission. Persistence lives in `signup-db`, HTTP in
//! `signup-api`.

pub mod age;
pub mod error;
pub mod form;
pub mod registrant;
pub mod types;
pub mod validation;
