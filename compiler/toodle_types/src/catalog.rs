//! The type lattice and its substitutability rules.

use rustc_hash::{FxHashMap, FxHashSet};
use toodle_ir::Expr;

use crate::names::{ANY, ARRAY, BOOL, INT, MAP, NUMBER, PRIMITIVE, STRING};
use crate::DataType;

/// Direction in which a type parameter follows its owner's subtyping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    /// `F<Sub>` substitutes for `F<Super>`.
    Covariant,
    /// `F<Super>` substitutes for `F<Sub>`.
    Contravariant,
}

/// One parameter slot of a parametric type: its bound and variance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTypeParamDefinition {
    pub bound: DataType,
    pub variance: Variance,
}

impl DataTypeParamDefinition {
    pub fn covariant(bound: &str) -> Self {
        DataTypeParamDefinition {
            bound: DataType::simple(bound),
            variance: Variance::Covariant,
        }
    }

    pub fn contravariant(bound: &str) -> Self {
        DataTypeParamDefinition {
            bound: DataType::simple(bound),
            variance: Variance::Contravariant,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTypeDefinition {
    pub name: String,
    pub params: Vec<DataTypeParamDefinition>,
    /// `None` only for the top type.
    pub super_type: Option<String>,
}

impl DataTypeDefinition {
    pub fn new(name: &str, super_type: Option<&str>, params: Vec<DataTypeParamDefinition>) -> Self {
        DataTypeDefinition {
            name: name.to_owned(),
            params,
            super_type: super_type.map(str::to_owned),
        }
    }

    pub fn is_top(&self) -> bool {
        self.super_type.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("data type '{0}' is already defined")]
    Duplicate(String),
    #[error("data type '{name}' extends unknown type '{super_type}'")]
    UnknownSuperType { name: String, super_type: String },
    #[error("data type '{name}' has a parameter bounded by unknown type '{bound}'")]
    UnknownBound { name: String, bound: String },
    #[error("data type '{0}' has no super type but the catalog already has a top type")]
    SecondTop(String),
}

/// A single-rooted lattice of data type definitions.
///
/// Definitions can only be added below types already in the catalog, so
/// every super type chain is finite and ends at the top type.
#[derive(Clone, Debug, Default)]
pub struct DataTypeCatalog {
    defs: FxHashMap<String, DataTypeDefinition>,
}

impl DataTypeCatalog {
    /// An empty catalog. The first definition added must be the top type.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin lattice (see the crate docs).
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for def in [
            DataTypeDefinition::new(ANY, None, Vec::new()),
            DataTypeDefinition::new(ARRAY, Some(ANY), vec![DataTypeParamDefinition::covariant(ANY)]),
            DataTypeDefinition::new(
                MAP,
                Some(ANY),
                vec![
                    DataTypeParamDefinition::covariant(PRIMITIVE),
                    DataTypeParamDefinition::covariant(ANY),
                ],
            ),
            DataTypeDefinition::new(PRIMITIVE, Some(ANY), Vec::new()),
            DataTypeDefinition::new(STRING, Some(PRIMITIVE), Vec::new()),
            DataTypeDefinition::new(BOOL, Some(STRING), Vec::new()),
            DataTypeDefinition::new(NUMBER, Some(PRIMITIVE), Vec::new()),
            DataTypeDefinition::new(INT, Some(NUMBER), Vec::new()),
        ] {
            catalog.defs.insert(def.name.clone(), def);
        }
        catalog
    }

    /// Add a definition below an existing type.
    pub fn add(&mut self, def: DataTypeDefinition) -> Result<(), CatalogError> {
        if self.defs.contains_key(&def.name) {
            return Err(CatalogError::Duplicate(def.name));
        }
        match &def.super_type {
            Some(super_type) if !self.defs.contains_key(super_type) => {
                return Err(CatalogError::UnknownSuperType {
                    super_type: super_type.clone(),
                    name: def.name,
                });
            }
            None if self.defs.values().any(DataTypeDefinition::is_top) => {
                return Err(CatalogError::SecondTop(def.name));
            }
            _ => {}
        }
        if let Some(param) = def.params.iter().find(|p| !self.defs.contains_key(&p.bound.name)) {
            return Err(CatalogError::UnknownBound {
                bound: param.bound.name.clone(),
                name: def.name,
            });
        }
        self.defs.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DataTypeDefinition> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// `name` followed by its super types, up to the top type. Empty for
    /// unknown names.
    pub fn ancestors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a DataTypeDefinition> + 'a {
        std::iter::successors(self.get(name), move |def| {
            def.super_type.as_deref().and_then(|parent| self.get(parent))
        })
    }

    /// Known name, matching arity, and every parameter well-formed and
    /// within its slot's bound.
    pub fn is_valid(&self, ty: &DataType) -> bool {
        let Some(def) = self.get(&ty.name) else {
            return false;
        };
        def.params.len() == ty.params.len()
            && def.params.iter().zip(&ty.params).all(|(slot, param)| {
                self.is_valid(param) && self.substitutes(param, &slot.bound, slot.variance)
            })
    }

    /// Whether `actual` can be used where `expected` is required.
    ///
    /// `expected` must be valid. The top type accepts anything; otherwise
    /// `actual` must be `expected` or one of its descendants, and parameters
    /// are compared under the variance of `expected`'s slots.
    pub fn is_substitute(&self, actual: &DataType, expected: &DataType) -> bool {
        self.is_valid(expected) && self.substitutes(actual, expected, Variance::Covariant)
    }

    fn substitutes(&self, actual: &DataType, expected: &DataType, variance: Variance) -> bool {
        let Some(def) = self.get(&expected.name) else {
            return false;
        };
        if def.is_top() {
            return true;
        }
        if !self.is_name_substitute(&actual.name, &expected.name, variance) {
            return false;
        }
        actual.params.len() == def.params.len()
            && expected.params.len() == def.params.len()
            && def
                .params
                .iter()
                .zip(actual.params.iter().zip(&expected.params))
                .all(|(slot, (a, e))| self.substitutes(a, e, slot.variance))
    }

    /// Name-level subtyping: covariant walks `actual`'s chain looking for
    /// `expected`, contravariant walks `expected`'s chain looking for `actual`.
    pub fn is_name_substitute(&self, actual: &str, expected: &str, variance: Variance) -> bool {
        match variance {
            Variance::Covariant => self.ancestors(actual).any(|def| def.name == expected),
            Variance::Contravariant => self.ancestors(expected).any(|def| def.name == actual),
        }
    }

    /// The nearest type both `a` and `b` descend from (either may be the
    /// answer itself).
    pub fn lowest_common_ancestor(&self, a: &str, b: &str) -> Option<&DataTypeDefinition> {
        let a_chain: FxHashSet<&str> = self.ancestors(a).map(|def| def.name.as_str()).collect();
        self.ancestors(b).find(|def| a_chain.contains(def.name.as_str()))
    }

    /// Whether a literal expression is a value of `expected`.
    ///
    /// User-defined types classify like their nearest builtin ancestor.
    /// `array<T>` accepts a list whose items are all `T` literals; `map` has
    /// no literal form.
    pub fn is_literal_of(&self, expr: &Expr, expected: &DataType) -> bool {
        for def in self.ancestors(&expected.name) {
            match def.name.as_str() {
                ANY => return true,
                PRIMITIVE => return expr.is_scalar(),
                STRING => return expr.as_str().is_some(),
                BOOL => return expr.as_bool().is_some(),
                NUMBER => return expr.as_number().is_some(),
                INT => return expr.is_integer(),
                ARRAY => {
                    let Some(items) = expr.as_list() else {
                        return false;
                    };
                    return expected
                        .params
                        .first()
                        .is_none_or(|item_type| items.iter().all(|item| self.is_literal_of(item, item_type)));
                }
                MAP => return false,
                _ => {}
            }
        }
        false
    }
}
