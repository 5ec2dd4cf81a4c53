// Projects: creation, listing, and the section generation workflow.
// Ownership is enforced here; a project owned by someone else is reported
// as not found.

pub mod handlers;
pub mod service;
