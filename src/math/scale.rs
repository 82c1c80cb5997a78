use nalgebra::DMatrix;

use crate::expr::ExprMatrix;

/// Per-feature centre and scale fitted on a samples x features matrix.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Population mean and standard deviation of every column. A constant
    /// column gets scale 1 so it maps to zeros instead of NaN.
    pub fn fit(x: &DMatrix<f64>) -> Self {
        let n = x.nrows().max(1) as f64;
        let mut mean = Vec::with_capacity(x.ncols());
        let mut scale = Vec::with_capacity(x.ncols());
        for col in x.column_iter() {
            let m = col.sum() / n;
            let var = col.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
            let sd = var.sqrt();
            mean.push(m);
            scale.push(if sd > f64::EPSILON { sd } else { 1.0 });
        }
        Self { mean, scale }
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - self.mean[j]) / self.scale[j]
        })
    }

    pub fn fit_transform(x: &DMatrix<f64>) -> (Self, DMatrix<f64>) {
        let scaler = Self::fit(x);
        let scaled = scaler.transform(x);
        (scaler, scaled)
    }
}

/// Samples become rows and genes become features.
pub fn samples_by_genes(matrix: &ExprMatrix) -> DMatrix<f64> {
    DMatrix::from_fn(matrix.n_samples(), matrix.n_genes(), |s, g| {
        matrix.value(g, s)
    })
}
