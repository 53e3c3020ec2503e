// Content generation: resume + cover letter for one job posting.
// Readers → job application writer → composer → client → splitter → attacher,
// sequenced by the pipeline. All provider calls go through llm_client.

pub mod client;
pub mod composer;
pub mod documents;
pub mod experience;
pub mod handlers;
pub mod job_application;
pub mod pipeline;
pub mod profile;
pub mod splitter;
