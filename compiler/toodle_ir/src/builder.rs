//! Tree construction from build events.
//!
//! The parser reports what it recognizes as a flat stream of [`BuildEvent`]s
//! shaped like a recursive-descent parse. [`TreeBuilder`] turns that stream
//! into a [`Tree`], tracking where it is with an explicit scope stack.
//!
//! Misuse of the event protocol (unbalanced enter/exit pairs, literals with
//! nowhere to go) is a bug in the producer and surfaces as a [`BuildError`].

use tracing::{trace, warn};

use crate::{decode_string, Annotation, Decimal, Definition, Expr, Tree, TypeId};

/// Kind of construct the builder is currently inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// The document, or a definition within a type's braces.
    TypeDefinition,
    /// `<...>` after a type name.
    TypeParam,
    /// `alias name = <type>`.
    Alias,
    /// `let $name = <expr>`.
    Const,
}

/// Raw text of a literal token, decoded by the builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralToken {
    /// Quoted text including its quotes, single or triple.
    String(String),
    Number(String),
    /// Variable name without the `$`.
    Variable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildEvent {
    EnterType,
    ExitType {
        name: String,
    },
    EnterDefinition,
    /// `modifiers` are the identifiers before the definition name.
    ExitDefinition {
        modifiers: Vec<String>,
        name: String,
        line: u32,
    },
    EnterAnnotation,
    ExitAnnotation {
        name: String,
    },
    EnterAlias,
    ExitAlias {
        name: String,
    },
    EnterConst,
    ExitConst {
        name: String,
    },
    EnterTypeParamList,
    ExitTypeParamList,
    EnterList,
    ExitList,
    Literal(LiteralToken),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("unbalanced scope: expected to leave {expected:?}, found {found:?}")]
    UnbalancedScope {
        expected: Scope,
        found: Option<Scope>,
    },
    #[error("invalid literal {text}: {reason}")]
    InvalidLiteral { text: String, reason: String },
    #[error("constant ${name} has no value")]
    MissingConstValue { name: String },
    #[error("alias {name} has no type")]
    MissingAliasType { name: String },
    #[error("annotation events are not balanced")]
    DanglingAnnotation,
    #[error("list events are not balanced")]
    DanglingList,
    #[error("literal outside of an annotation or constant")]
    UnexpectedLiteral,
    #[error("{depth} scope(s) still open at end of input")]
    UnclosedScopes { depth: usize },
}

/// Assembles a [`Tree`] from [`BuildEvent`]s.
///
/// `current` always points at the innermost type being built. Entering a
/// type moves it down, leaving a definition, alias or type parameter moves
/// it back up through the node's `parent`.
pub struct TreeBuilder {
    tree: Tree,
    current: TypeId,
    scopes: Vec<Scope>,
    /// Value of `current` when each open definition/alias started.
    marks: Vec<TypeId>,
    annotation: Option<Vec<Expr>>,
    lists: Vec<Vec<Expr>>,
    const_value: Option<Expr>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            tree: Tree::new(),
            current: TypeId::ROOT,
            scopes: vec![Scope::TypeDefinition],
            marks: Vec::new(),
            annotation: None,
            lists: Vec::new(),
            const_value: None,
        }
    }

    /// Innermost open scope.
    pub fn scope(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    pub fn apply(&mut self, event: BuildEvent) -> Result<(), BuildError> {
        trace!(?event, scope = ?self.scope(), "build event");
        match event {
            BuildEvent::EnterType => {
                let child = self.tree.alloc(String::new(), Some(self.current));
                if self.scope() == Some(Scope::TypeParam) {
                    self.tree[self.current].type_params.push(child);
                }
                self.current = child;
            }
            BuildEvent::ExitType { name } => {
                self.tree[self.current].name = name;
                if self.scope() == Some(Scope::TypeParam) {
                    self.current = self.parent_of_current();
                }
            }
            BuildEvent::EnterDefinition => {
                self.scopes.push(Scope::TypeDefinition);
                self.marks.push(self.current);
            }
            BuildEvent::ExitDefinition {
                modifiers,
                name,
                line,
            } => {
                self.pop_scope(Scope::TypeDefinition)?;
                let mark = self.pop_mark(Scope::TypeDefinition)?;
                if self.current == mark {
                    warn!(name = %name, line, "definition without a type is ignored");
                    return Ok(());
                }
                let ty = self.current;
                let parent = self.parent_of_current();
                self.tree[parent]
                    .children
                    .push(Definition::new(name, modifiers, ty, line));
                self.current = parent;
            }
            BuildEvent::EnterAnnotation => {
                if self.annotation.replace(Vec::new()).is_some() {
                    return Err(BuildError::DanglingAnnotation);
                }
            }
            BuildEvent::ExitAnnotation { name } => {
                let params = self.annotation.take().ok_or(BuildError::DanglingAnnotation)?;
                self.tree[self.current].set_annotation(Annotation::new(name, params));
            }
            BuildEvent::EnterAlias => {
                self.scopes.push(Scope::Alias);
                self.marks.push(self.current);
            }
            BuildEvent::ExitAlias { name } => {
                self.pop_scope(Scope::Alias)?;
                let mark = self.pop_mark(Scope::Alias)?;
                if self.current == mark {
                    return Err(BuildError::MissingAliasType { name });
                }
                let target = self.current;
                let parent = self.parent_of_current();
                self.tree[parent].add_alias(name, target);
                self.current = parent;
            }
            BuildEvent::EnterConst => {
                self.scopes.push(Scope::Const);
                self.const_value = None;
            }
            BuildEvent::ExitConst { name } => {
                self.pop_scope(Scope::Const)?;
                let value = self
                    .const_value
                    .take()
                    .ok_or_else(|| BuildError::MissingConstValue { name: name.clone() })?;
                self.tree[self.current].add_const(name, value);
            }
            BuildEvent::EnterTypeParamList => self.scopes.push(Scope::TypeParam),
            BuildEvent::ExitTypeParamList => self.pop_scope(Scope::TypeParam)?,
            BuildEvent::EnterList => self.lists.push(Vec::new()),
            BuildEvent::ExitList => {
                let items = self.lists.pop().ok_or(BuildError::DanglingList)?;
                self.reduce(Expr::List(items))?;
            }
            BuildEvent::Literal(token) => {
                let expr = decode_literal(token)?;
                self.reduce(expr)?;
            }
        }
        Ok(())
    }

    /// Apply every event in order, stopping at the first error.
    pub fn extend(&mut self, events: impl IntoIterator<Item = BuildEvent>) -> Result<(), BuildError> {
        events.into_iter().try_for_each(|event| self.apply(event))
    }

    /// Finish building. Every scope but the document's must be closed.
    pub fn finish(self) -> Result<Tree, BuildError> {
        if self.annotation.is_some() {
            return Err(BuildError::DanglingAnnotation);
        }
        if !self.lists.is_empty() {
            return Err(BuildError::DanglingList);
        }
        if self.scopes.len() != 1 || self.current != TypeId::ROOT {
            return Err(BuildError::UnclosedScopes {
                depth: self.scopes.len().saturating_sub(1),
            });
        }
        Ok(self.tree)
    }

    /// Hand a finished expression to whatever is waiting for it.
    fn reduce(&mut self, expr: Expr) -> Result<(), BuildError> {
        if let Some(list) = self.lists.last_mut() {
            list.push(expr);
        } else if self.scope() == Some(Scope::Const) {
            self.const_value = Some(expr);
        } else if let Some(params) = self.annotation.as_mut() {
            params.push(expr);
        } else {
            return Err(BuildError::UnexpectedLiteral);
        }
        Ok(())
    }

    fn parent_of_current(&self) -> TypeId {
        self.tree.parent(self.current).unwrap_or(TypeId::ROOT)
    }

    fn pop_scope(&mut self, expected: Scope) -> Result<(), BuildError> {
        match self.scopes.pop() {
            Some(found) if found == expected && !self.scopes.is_empty() => Ok(()),
            found => Err(BuildError::UnbalancedScope { expected, found }),
        }
    }

    fn pop_mark(&mut self, expected: Scope) -> Result<TypeId, BuildError> {
        self.marks.pop().ok_or(BuildError::UnbalancedScope {
            expected,
            found: None,
        })
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_literal(token: LiteralToken) -> Result<Expr, BuildError> {
    match token {
        LiteralToken::String(raw) => decode_string(&raw)
            .map(Expr::Str)
            .map_err(|err| BuildError::InvalidLiteral {
                reason: err.to_string(),
                text: raw,
            }),
        LiteralToken::Number(raw) => raw
            .parse::<Decimal>()
            .map(Expr::Number)
            .map_err(|err| BuildError::InvalidLiteral {
                reason: err.to_string(),
                text: raw,
            }),
        LiteralToken::Variable(name) => Ok(Expr::Var(name)),
    }
}
