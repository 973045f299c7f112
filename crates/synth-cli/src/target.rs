//! Reads a target unitary from the JSON array-of-arrays-of-`[re, im]` format
//! named in §6's CLI surface.

use std::path::Path;

use anyhow::{bail, Context, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use synth_ir::Matrix;

/// On-disk shape: a square matrix of `[re, im]` pairs, row-major.
#[derive(Debug, Serialize, Deserialize)]
struct TargetFile(Vec<Vec<[f64; 2]>>);

/// Load a target unitary from a JSON file at `path`.
pub fn load(path: &Path) -> Result<Matrix> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read target file: {}", path.display()))?;
    let parsed: TargetFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse target file: {}", path.display()))?;
    let rows = parsed.0.len();
    if rows == 0 {
        bail!("target matrix has no rows");
    }
    for row in &parsed.0 {
        if row.len() != rows {
            bail!("target matrix is not square: {} rows but a row of length {}", rows, row.len());
        }
    }
    let data: Vec<Complex64> = parsed
        .0
        .into_iter()
        .flatten()
        .map(|[re, im]| Complex64::new(re, im))
        .collect();
    Matrix::from_shape_vec((rows, rows), data).context("failed to build matrix from target file")
}

/// Serialize `matrix` to the same `[re, im]` row-major JSON format `load` reads.
pub fn save(matrix: &Matrix, path: &Path) -> Result<()> {
    let (rows, cols) = matrix.dim();
    let mut out = Vec::with_capacity(rows);
    for r in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for c in 0..cols {
            let z = matrix[[r, c]];
            row.push([z.re, z.im]);
        }
        out.push(row);
    }
    let json = serde_json::to_string_pretty(&TargetFile(out))?;
    std::fs::write(path, json).with_context(|| format!("failed to write target file: {}", path.display()))?;
    Ok(())
}
