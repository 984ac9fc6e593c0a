pub mod fields;
pub mod labels;
pub mod params;
pub mod validate;

mod error;

pub use error::{Error, Result};
pub use fields::{Scope, resolve_field};
pub use labels::{CodeKind, Labels, ReferenceCodes};
pub use params::{
	PageRequest, RawParams, ResponseOptions, SearchParameters, SearchRequest, check_empty_params,
	extract_geo_parameters, extract_search_parameters,
};
