//! Matrix-free Hamiltonian

extern crate nalgebra as na;

use integrals::IntegralProvider;
use na::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::{debug, info};

use super::slater_condon::SlaterCondon;

/// A symmetric linear map that can only be applied, never inspected.
///
/// This is everything an iterative eigensolver needs: it calls [`LinearOperator::apply`]
/// on trial vectors until its own convergence test passes.
pub trait LinearOperator: Sync {
    fn dimension(&self) -> usize;

    /// `y = A x`, overwriting `y`.
    fn apply_into(&self, x: &DVector<f64>, y: &mut DVector<f64>);

    fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        let mut y = DVector::zeros(self.dimension());
        self.apply_into(x, &mut y);
        y
    }
}

/// `H` over a determinant space, evaluated element by element on every application.
pub struct HamiltonianOperator<'a, I: IntegralProvider> {
    evaluator: SlaterCondon<'a, I>,
    /// Unfolded local indices of every determinant, `n_channels` per row.
    digits: Vec<usize>,
    n_channels: usize,
    dimension: usize,
}

impl<'a, I: IntegralProvider> HamiltonianOperator<'a, I> {
    pub fn new(evaluator: SlaterCondon<'a, I>) -> Self {
        let indexer = evaluator.space().indexer();
        let n_channels = indexer.n_channels();
        let dimension = indexer.n_dets();

        let mut digits = vec![0; dimension * n_channels];
        digits
            .par_chunks_mut(n_channels.max(1))
            .enumerate()
            .for_each(|(index, row)| indexer.unfold_flat(index, row));

        Self {
            evaluator,
            digits,
            n_channels,
            dimension,
        }
    }

    #[inline]
    fn unfolded(&self, index: usize) -> &[usize] {
        &self.digits[index * self.n_channels..(index + 1) * self.n_channels]
    }

    /// `H_ij`.
    pub fn element(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.dimension && j < self.dimension,
            "element ({}, {}) out of range for dimension {}",
            i,
            j,
            self.dimension
        );
        self.evaluator
            .element_unfolded(self.unfolded(i), self.unfolded(j))
    }

    /// `H_ii` for every determinant, e.g. as a Davidson preconditioner.
    pub fn diagonal(&self) -> DVector<f64> {
        let diagonal: Vec<f64> = (0..self.dimension)
            .into_par_iter()
            .map(|i| self.element(i, i))
            .collect();
        DVector::from_vec(diagonal)
    }

    /// Evaluates every element into a dense matrix. Only sensible for small spaces.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.dimension;
        info!("Computing {} Hamiltonian matrix elements...", n * n);

        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| (0..n).map(|j| self.element(i, j)).collect())
            .collect();

        DMatrix::from_fn(n, n, |i, j| rows[i][j])
    }
}

impl<I: IntegralProvider> LinearOperator for HamiltonianOperator<'_, I> {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn apply_into(&self, x: &DVector<f64>, y: &mut DVector<f64>) {
        assert_eq!(x.len(), self.dimension, "input vector has the wrong dimension");
        assert_eq!(y.len(), self.dimension, "output vector has the wrong dimension");
        debug!("Performing H*x over {} determinants", self.dimension);

        y.as_mut_slice()
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, y_i)| {
                let digits_i = self.unfolded(i);
                *y_i = (0..self.dimension)
                    .filter(|&j| x[j] != 0.0)
                    .map(|j| x[j] * self.evaluator.element_unfolded(digits_i, self.unfolded(j)))
                    .sum();
            });
    }
}
