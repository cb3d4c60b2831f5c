use std::collections::HashSet;

use serde::Serialize;

use crate::{Error, Result};
use gleaner_config::BoostDef;

/// Largest absolute strength a boost may carry, and the clamp applied to combined boosts.
pub const MAX_BOOST: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boost {
	field: String,
	value: String,
	strength: i32,
}
impl Boost {
	pub fn new(field: impl Into<String>, value: impl Into<String>, strength: i32) -> Result<Self> {
		let field = field.into();
		let value = value.into();

		if field.trim().is_empty() {
			return Err(Error::InvalidBoost { message: "field must be non-empty.".to_string() });
		}
		if value.trim().is_empty() {
			return Err(Error::InvalidBoost { message: "value must be non-empty.".to_string() });
		}
		if strength == 0 {
			return Err(Error::InvalidBoost { message: "strength must not be zero.".to_string() });
		}
		if !(-MAX_BOOST..=MAX_BOOST).contains(&strength) {
			return Err(Error::InvalidBoost {
				message: format!("strength must be between -{MAX_BOOST} and {MAX_BOOST}."),
			});
		}

		Ok(Self { field, value, strength })
	}

	pub fn field(&self) -> &str {
		&self.field
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn strength(&self) -> i32 {
		self.strength
	}
}
impl TryFrom<&BoostDef> for Boost {
	type Error = Error;

	fn try_from(def: &BoostDef) -> Result<Self> {
		Self::new(def.field.clone(), def.value.clone(), def.strength)
	}
}

/// Ordered boosts, unique on (field, value).
#[derive(Debug, Clone, Default)]
pub struct BoostTable {
	boosts: Vec<Boost>,
}
impl BoostTable {
	pub fn new(boosts: Vec<Boost>) -> Result<Self> {
		let mut seen = HashSet::new();

		for boost in &boosts {
			if !seen.insert((boost.field.as_str(), boost.value.as_str())) {
				return Err(Error::DuplicateBoost {
					field: boost.field.clone(),
					value: boost.value.clone(),
				});
			}
		}

		Ok(Self { boosts })
	}

	pub fn from_defs(defs: &[BoostDef]) -> Result<Self> {
		let boosts = defs.iter().map(Boost::try_from).collect::<Result<Vec<_>>>()?;

		Self::new(boosts)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Boost> {
		self.boosts.iter()
	}

	pub fn is_empty(&self) -> bool {
		self.boosts.is_empty()
	}

	pub fn len(&self) -> usize {
		self.boosts.len()
	}
}
