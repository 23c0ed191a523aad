//! Static portfolio data: pages, project catalogues and the contact form

mod contact;
mod projects;
mod routes;

pub use contact::{ContactFields, ContactForm, FormError, FormStatus, SUBMIT_DELAY_SECS};
pub use projects::{all_projects, catalogue, find, Category, Project, GRAPHIC_PROJECTS, INTERIOR_PROJECTS};
pub use routes::{Navigator, Route};
