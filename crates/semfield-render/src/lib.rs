//! Flavor-specific rendering of field definition collections.
//!
//! A canonical [`FieldDocument`](semfield_model::FieldDocument) renders into
//! one of five fixed output flavors: three TriG forms (platform-neutral,
//! ResearchSpace, Metaphacts), a JSON form, and an inline form that wraps
//! the JSON in a backend template partial. Each flavor carries an embedded
//! template; rendering happens through a single preconfigured
//! [`Renderer`].

pub mod error;
pub mod flavor;
pub mod renderer;

pub use error::RenderError;
pub use flavor::Flavor;
pub use renderer::Renderer;
