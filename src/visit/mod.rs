//! Composite visitor (§4.8-§4.11): the document walker plus the three
//! per-construct visitors it dispatches to. Reused recursively by the loop
//! visitor on each iteration's cloned body (§9 "Composite visitor").

pub(crate) mod composite;
pub(crate) mod conditional;
pub(crate) mod loop_visitor;
pub(crate) mod placeholder;
