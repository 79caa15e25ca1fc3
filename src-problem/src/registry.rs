//! Name and id lookup of problem factories.
//!
//! Registries are plain values built once by the caller: [`bbob_registry`]
//! and [`pbo_registry`] fill an explicit table from the suite catalogues.
//! Nothing registers itself at load time.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::{debug, warn};

use crate::bbob;
use crate::error::ProblemError;
use crate::pbo;
use crate::problem::Problem;
use crate::structures::Variable;

/// Builds a problem from `(instance, n_variables)`.
pub type Factory<T> = Box<dyn Fn(i32, usize) -> Result<Problem<T>, ProblemError> + Send + Sync>;

/// Selects a registered problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKey {
	Name(String),
	Id(i32),
}

impl From<&str> for ProblemKey {
	fn from(name: &str) -> Self {
		ProblemKey::Name(name.to_string())
	}
}

impl From<i32> for ProblemKey {
	fn from(id: i32) -> Self {
		ProblemKey::Id(id)
	}
}

impl fmt::Display for ProblemKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProblemKey::Name(name) => write!(f, "name {}", name),
			ProblemKey::Id(id) => write!(f, "id {}", id),
		}
	}
}

/// Factories indexed by unique name and unique id.
pub struct Registry<T: Variable> {
	factories: HashMap<String, (i32, Factory<T>)>,
	ids: BTreeMap<i32, String>,
}

impl<T: Variable> Default for Registry<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Variable> Registry<T> {
	pub fn new() -> Self {
		Self { factories: HashMap::new(), ids: BTreeMap::new() }
	}

	/// Registers `factory` under `name` and `id`, returning the id used.
	///
	/// Names must be unique. A taken id is replaced by one more than the
	/// largest registered id.
	pub fn add<F>(&mut self, name: &str, id: i32, factory: F) -> Result<i32, ProblemError>
	where
		F: Fn(i32, usize) -> Result<Problem<T>, ProblemError> + Send + Sync + 'static,
	{
		if self.factories.contains_key(name) {
			return Err(ProblemError::DuplicateName(name.to_string()));
		}
		let id = if self.ids.contains_key(&id) {
			let next = self.ids.keys().next_back().map_or(id, |max| max + 1);
			warn!("id {} is taken, registering {} as {}", id, name, next);
			next
		} else {
			id
		};
		self.ids.insert(id, name.to_string());
		self.factories.insert(name.to_string(), (id, Box::new(factory)));
		debug!("registered {} as {}", name, id);
		Ok(id)
	}

	pub fn create(
		&self,
		key: impl Into<ProblemKey>,
		instance: i32,
		n_variables: usize,
	) -> Result<Problem<T>, ProblemError> {
		let key = key.into();
		let name = self.resolve(&key).ok_or_else(|| ProblemError::NotFound(key.to_string()))?;
		let (_, factory) = &self.factories[name];
		factory(instance, n_variables)
	}

	fn resolve(&self, key: &ProblemKey) -> Option<&str> {
		match key {
			ProblemKey::Name(name) => self.factories.get_key_value(name.as_str()).map(|(k, _)| k.as_str()),
			ProblemKey::Id(id) => self.ids.get(id).map(String::as_str),
		}
	}

	pub fn contains(&self, key: impl Into<ProblemKey>) -> bool {
		self.resolve(&key.into()).is_some()
	}

	/// Registered names in id order.
	pub fn names(&self) -> Vec<String> {
		self.ids.values().cloned().collect()
	}

	pub fn ids(&self) -> Vec<i32> {
		self.ids.keys().copied().collect()
	}

	pub fn id_of(&self, name: &str) -> Option<i32> {
		self.factories.get(name).map(|(id, _)| *id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}

impl<T: Variable> fmt::Debug for Registry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry").field("problems", &self.ids).finish()
	}
}

/// The 24 BBOB functions under their names and ids.
pub fn bbob_registry() -> Registry<f64> {
	let mut registry = Registry::new();
	for (id, name) in bbob::FUNCTIONS {
		if let Err(e) = registry.add(name, id, move |instance, n| bbob::create_by_id(id, instance, n)) {
			warn!("skipping {}: {}", name, e);
		}
	}
	registry
}

/// The 25 PBO functions under their names and ids.
pub fn pbo_registry() -> Registry<i32> {
	let mut registry = Registry::new();
	for (id, name) in pbo::FUNCTIONS {
		if let Err(e) = registry.add(name, id, move |instance, n| pbo::create_by_id(id, instance, n)) {
			warn!("skipping {}: {}", name, e);
		}
	}
	registry
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_suite_registries() {
		let bbob = bbob_registry();
		assert_eq!(bbob.len(), 24);
		assert_eq!(bbob.ids(), (1..=24).collect::<Vec<_>>());
		assert_eq!(bbob.names()[0], "Sphere");
		assert!(bbob.contains("Katsuura"));
		assert!(bbob.contains(24));

		let pbo = pbo_registry();
		assert_eq!(pbo.len(), 25);
		assert_eq!(pbo.id_of("NQueens"), Some(23));
	}

	#[test]
	fn test_create_by_name_and_id() {
		let bbob = bbob_registry();
		let by_name = bbob.create("Rastrigin", 2, 5).unwrap();
		let by_id = bbob.create(3, 2, 5).unwrap();
		assert_eq!(by_name.meta_data(), by_id.meta_data());
		assert_eq!(by_name.optimum(), by_id.optimum());
		assert!(matches!(bbob.create("Nope", 1, 5), Err(ProblemError::NotFound(_))));
		assert!(matches!(bbob.create(99, 1, 5), Err(ProblemError::NotFound(_))));
	}

	#[test]
	fn test_duplicates() {
		let mut registry: Registry<i32> = Registry::new();
		assert_eq!(registry.add("OneMax", 1, pbo::OneMax::create).unwrap(), 1);
		assert!(matches!(registry.add("OneMax", 7, pbo::OneMax::create), Err(ProblemError::DuplicateName(_))));
		assert_eq!(registry.add("LeadingOnes", 5, pbo::LeadingOnes::create).unwrap(), 5);
		// id 1 is taken, so the next free id after the maximum is used
		assert_eq!(registry.add("Linear", 1, pbo::Linear::create).unwrap(), 6);
		assert_eq!(registry.names(), vec!["OneMax", "LeadingOnes", "Linear"]);
	}
}
