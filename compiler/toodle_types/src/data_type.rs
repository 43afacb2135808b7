//! Type instantiations.

use std::fmt;

use toodle_ir::{ensure_sufficient_stack, Tree, TypeId};

/// A type name applied to zero or more parameter types, e.g. `map<string, int>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataType {
    pub name: String,
    pub params: Vec<DataType>,
}

impl DataType {
    pub fn new(name: impl Into<String>, params: Vec<DataType>) -> Self {
        DataType {
            name: name.into(),
            params,
        }
    }

    /// A type without parameters.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// The data type written at `id`: its name and, recursively, its type
    /// parameters. Annotations and children play no part.
    pub fn from_tree(tree: &Tree, id: TypeId) -> Self {
        ensure_sufficient_stack(|| {
            let node = &tree[id];
            DataType {
                name: node.name.clone(),
                params: node
                    .type_params
                    .iter()
                    .map(|&param| DataType::from_tree(tree, param))
                    .collect(),
            }
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl From<&str> for DataType {
    fn from(name: &str) -> Self {
        DataType::simple(name)
    }
}
