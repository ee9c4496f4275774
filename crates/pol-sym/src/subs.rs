use std::collections::{BTreeMap, BTreeSet};

use crate::expr::{Condition, Expr, Function, Symbol};

impl Expr {
    /// Replaces `symbol` by `value` everywhere and re-canonicalizes.
    pub fn subs(&self, symbol: &Symbol, value: &Expr) -> Expr {
        let mut mapping = BTreeMap::new();
        mapping.insert(symbol.clone(), value.clone());
        self.substitute(&mapping)
    }

    /// Simultaneous substitution of several symbols.
    pub fn substitute(&self, mapping: &BTreeMap<Symbol, Expr>) -> Expr {
        if mapping.is_empty() {
            return self.clone();
        }
        match self {
            Expr::Symbol(symbol) => match mapping.get(symbol) {
                Some(value) => value.clone(),
                None => self.clone(),
            },
            Expr::Sum(sum) => sum.substitute(mapping),
            _ => self.map_children(&mut |child| child.substitute(mapping)),
        }
    }

    /// Evaluates unevaluated sums. With `deep`, sums nested anywhere in the
    /// tree are expanded as well; otherwise only a top-level sum is.
    pub fn doit(&self, deep: bool) -> Expr {
        match self {
            Expr::Sum(sum) => sum.doit(deep),
            _ if !deep => self.clone(),
            _ => self.map_children(&mut |child| child.doit(true)),
        }
    }

    /// Free symbols, excluding summation indices bound by a [`crate::PoolSum`].
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut symbols = BTreeSet::new();
        self.collect_free_symbols(&mut symbols);
        symbols
    }

    pub(crate) fn collect_free_symbols(&self, symbols: &mut BTreeSet<Symbol>) {
        match self {
            Expr::Number(_) | Expr::Float(_) | Expr::ImaginaryUnit => {}
            Expr::Symbol(symbol) => {
                symbols.insert(symbol.clone());
            }
            Expr::Indexed(indexed) => {
                symbols.insert(indexed.base.clone());
                for index in &indexed.indices {
                    index.collect_free_symbols(symbols);
                }
            }
            Expr::Function(function) => {
                for arg in &function.args {
                    arg.collect_free_symbols(symbols);
                }
            }
            Expr::Add(children) | Expr::Mul(children) => {
                for child in children {
                    child.collect_free_symbols(symbols);
                }
            }
            Expr::Pow(base, exponent) => {
                base.collect_free_symbols(symbols);
                exponent.collect_free_symbols(symbols);
            }
            Expr::Conjugate(inner) => inner.collect_free_symbols(symbols),
            Expr::Piecewise(pieces) => {
                for (value, condition) in pieces {
                    value.collect_free_symbols(symbols);
                    if let Condition::Less(lhs, rhs) = condition {
                        lhs.collect_free_symbols(symbols);
                        rhs.collect_free_symbols(symbols);
                    }
                }
            }
            Expr::MatrixElement(element) => {
                element.row.collect_free_symbols(symbols);
                element.col.collect_free_symbols(symbols);
            }
            Expr::Sum(sum) => symbols.extend(sum.free_symbols()),
        }
    }

    /// Rebuilds the node from transformed children through the canonical
    /// constructors.
    pub(crate) fn map_children(&self, f: &mut dyn FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Number(_) | Expr::Float(_) | Expr::ImaginaryUnit | Expr::Symbol(_) => {
                self.clone()
            }
            Expr::Indexed(indexed) => Expr::indexed(
                indexed.base.clone(),
                indexed.indices.iter().map(|index| f(index)).collect(),
            ),
            Expr::Function(function) => Expr::Function(Function {
                args: function.args.iter().map(|arg| f(arg)).collect(),
                ..function.clone()
            }),
            Expr::Add(terms) => Expr::add(terms.iter().map(|term| f(term)).collect::<Vec<_>>()),
            Expr::Mul(factors) => {
                Expr::mul(factors.iter().map(|factor| f(factor)).collect::<Vec<_>>())
            }
            Expr::Pow(base, exponent) => Expr::pow(f(&**base), f(&**exponent)),
            Expr::Conjugate(inner) => f(&**inner).conjugate(),
            Expr::Piecewise(pieces) => Expr::piecewise(
                pieces
                    .iter()
                    .map(|(value, condition)| {
                        let condition = match condition {
                            Condition::Less(lhs, rhs) => Condition::less(f(&**lhs), f(&**rhs)),
                            decided => decided.clone(),
                        };
                        (f(value), condition)
                    })
                    .collect(),
            ),
            Expr::MatrixElement(element) => Expr::matrix_element(
                element.matrix.clone(),
                f(&*element.row),
                f(&*element.col),
            ),
            Expr::Sum(sum) => Expr::Sum(sum.map_parts(f)),
        }
    }
}
