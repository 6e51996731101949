//! Language-neutral intermediate representation of a generated API client.
//!
//! The tree is built once by the model builder, handed by exclusive ownership to a refinement pipeline that
//! rewrites it in place for one target, then passed to an emitter. This crate holds the data model and the generic
//! infrastructure every pass relies on:
//! - [`CodeDom`]: arena of elements addressed by stable [`ElementId`]s,
//! - kind tags ([`ClassKind`], [`MethodKind`], ...) telling structurally identical elements apart,
//! - [`CodeType`] references, which may point weakly at the element defining them,
//! - [`crawl`] for pre-order traversal with mutation, [`validate`] for structural integrity.
//!
//! ## Examples
//! ```rust
//! use refinery_dom::{ClassKind, CodeClass, CodeDom, CodeNamespace};
//!
//! let mut dom = CodeDom::new("ApiSdk");
//! let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
//! let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
//! assert_eq!(dom.namespace_of(user), Some(models));
//! assert!(refinery_dom::validate(&dom).is_ok());
//! ```

pub mod crawl;
pub mod dom;
pub mod element;
pub mod errors;
pub mod kinds;
pub mod outline;
pub mod types;
pub mod using;
pub mod validate;

pub use crawl::{crawl, descendants, walk};
pub use dom::{CodeDom, ElementId, Node};
pub use element::{
    CodeClass, CodeEnum, CodeIndexer, CodeInterface, CodeMethod, CodeNamespace, CodeParameter, CodeProperty, Element,
    ElementCategory,
};
pub use errors::{DomError, DomResult};
pub use kinds::{Access, ClassKind, InterfaceKind, MethodKind, ParameterKind, PropertyKind};
pub use outline::outline;
pub use types::{CodeType, CollectionKind, ComposedKind, ComposedType, DiscriminatorInformation, DiscriminatorMapping};
pub use using::{CodeUsing, UsingSet};
pub use validate::validate;
