//! Outer surface of punkt-core
//!
//! Loading and saving trained parameters. The methods live on
//! [`ParameterSet`](crate::domain::ParameterSet) itself; this module holds
//! the serialized representation.

mod persist;
