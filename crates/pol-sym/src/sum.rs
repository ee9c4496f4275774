use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Symbol};

/// Unevaluated sum of an expression over explicit index values.
///
/// `PoolSum(f(a, b), (a, [1, 2]), (b, [x, y]))` stands for
/// `f(1, x) + f(1, y) + f(2, x) + f(2, y)` until [`PoolSum::doit`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSum {
    expression: Box<Expr>,
    indices: Vec<(Symbol, Vec<Expr>)>,
}

impl PoolSum {
    /// Creates the sum of `expression` over all combinations of `indices`.
    pub fn new(expression: Expr, indices: Vec<(Symbol, Vec<Expr>)>) -> Self {
        Self {
            expression: Box::new(expression),
            indices,
        }
    }

    /// The summand.
    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    /// Summation indices with their values, outermost first.
    pub fn indices(&self) -> &[(Symbol, Vec<Expr>)] {
        &self.indices
    }

    /// Number of terms the sum expands to.
    pub fn num_terms(&self) -> usize {
        self.indices.iter().map(|(_, values)| values.len()).product()
    }

    /// Removes redundant summations.
    ///
    /// Single-valued indices are substituted into the summand. Indices that
    /// the summand does not depend on are dropped and replaced by their
    /// multiplicity. Returns the summand itself when no index remains.
    pub fn cleanup(&self) -> Expr {
        let used = self.expression.free_symbols();
        let mut expression = (*self.expression).clone();
        let mut multiplicity: i64 = 1;
        let mut kept = Vec::with_capacity(self.indices.len());
        for (symbol, values) in &self.indices {
            if !used.contains(symbol) {
                multiplicity *= values.len() as i64;
                continue;
            }
            if values.len() == 1 {
                expression = expression.subs(symbol, &values[0]);
            } else {
                kept.push((symbol.clone(), values.clone()));
            }
        }
        let body = if kept.is_empty() {
            expression
        } else {
            Expr::Sum(PoolSum::new(expression, kept))
        };
        Expr::mul([Expr::integer(multiplicity), body])
    }

    /// Expands the sum into explicit terms.
    pub fn doit(&self, deep: bool) -> Expr {
        if self.indices.iter().any(|(_, values)| values.is_empty()) {
            return Expr::zero();
        }
        let mut terms = Vec::with_capacity(self.num_terms());
        let mut counters = vec![0usize; self.indices.len()];
        loop {
            let mapping: BTreeMap<Symbol, Expr> = self
                .indices
                .iter()
                .zip(&counters)
                .map(|((symbol, values), &position)| (symbol.clone(), values[position].clone()))
                .collect();
            let term = self.expression.substitute(&mapping);
            terms.push(if deep { term.doit(true) } else { term });

            let mut axis = counters.len();
            loop {
                if axis == 0 {
                    return Expr::add(terms);
                }
                axis -= 1;
                counters[axis] += 1;
                if counters[axis] < self.indices[axis].1.len() {
                    break;
                }
                counters[axis] = 0;
            }
        }
    }

    /// Free symbols of the summand and index values, minus the indices.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut symbols = self.expression.free_symbols();
        for (symbol, _) in &self.indices {
            symbols.remove(symbol);
        }
        for (_, values) in &self.indices {
            for value in values {
                value.collect_free_symbols(&mut symbols);
            }
        }
        symbols
    }

    /// Substitution that leaves bound indices untouched inside the summand.
    pub(crate) fn substitute(&self, mapping: &BTreeMap<Symbol, Expr>) -> Expr {
        let mut inner = mapping.clone();
        for (symbol, _) in &self.indices {
            inner.remove(symbol);
        }
        Expr::Sum(PoolSum {
            expression: Box::new(self.expression.substitute(&inner)),
            indices: self
                .indices
                .iter()
                .map(|(symbol, values)| {
                    let values = values.iter().map(|value| value.substitute(mapping)).collect();
                    (symbol.clone(), values)
                })
                .collect(),
        })
    }

    pub(crate) fn map_expression(&self, f: impl FnOnce(&Expr) -> Expr) -> PoolSum {
        PoolSum {
            expression: Box::new(f(&self.expression)),
            indices: self.indices.clone(),
        }
    }

    pub(crate) fn map_parts(&self, f: &mut dyn FnMut(&Expr) -> Expr) -> PoolSum {
        PoolSum {
            expression: Box::new(f(&self.expression)),
            indices: self
                .indices
                .iter()
                .map(|(symbol, values)| (symbol.clone(), values.iter().map(|v| f(v)).collect()))
                .collect(),
        }
    }
}

impl From<PoolSum> for Expr {
    fn from(sum: PoolSum) -> Self {
        Expr::Sum(sum)
    }
}
